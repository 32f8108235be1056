use crate::error::Result;
use crate::model::device::{DeviceId, StateChange};
use crate::model::value::{HostFn, HostValue};
use crate::plugin::host_fns::Host;
use crate::plugin::scope::{device_arg, text_arg};

/// Write a device variable under the plugin's service.
///
/// With `reload` the value goes to the durable store and takes effect once
/// the controller reloads; without it the value applies immediately but does
/// not survive a restart.
pub fn save_var(
    host: &mut dyn Host,
    service: &str,
    device: DeviceId,
    name: &str,
    value: &str,
    reload: bool,
) -> Result<()> {
    let change = if reload {
        StateChange::Persisted
    } else {
        StateChange::Dynamic
    };

    tracing::debug!(
        "set {service}/{name} on device {device} ({}, flag {})",
        change.label(),
        change.flag()
    );
    host.set_device_state(device, service, name, value, change)
}

/// `saveVar(device, service, name, value, reload)` as exposed to the
/// dashboard. The service argument is accepted for call compatibility; the
/// write always targets `service`.
pub fn save_var_function(service: &str) -> HostFn {
    let service = service.to_string();
    HostFn::new("saveVar", move |host: &mut dyn Host, args: &[HostValue]| {
        let device = device_arg(args, 0)?;
        let name = text_arg(args, 2);
        let value = text_arg(args, 3);
        let reload = args.get(4).is_some_and(HostValue::equals_true);

        save_var(host, &service, device, &name, &value, reload)?;
        Ok(HostValue::Undefined)
    })
}
