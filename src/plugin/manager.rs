use crate::error::{Error, Result};
use crate::model::config::AppConfig;
use crate::model::device::DeviceId;
use crate::model::value::HostValue;
use crate::plugin::host_fns::Host;
use crate::plugin::manifest::{PluginManifest, TabDef};
use crate::plugin::scope::PluginScope;
use crate::plugin::state::save_var_function;
use crate::plugin::tabs::tab_function;

/// Global holding the plugin's service id.
pub const SERVICE_GLOBAL: &str = "razb_Svs";
pub const SAVE_VAR_FN: &str = "saveVar";

#[derive(Debug)]
pub struct PluginManager {
    manifest: PluginManifest,
    scope: PluginScope,
}

impl PluginManager {
    pub fn new(manifest: PluginManifest, config: &AppConfig) -> Self {
        let service = manifest.service_id.clone();
        let mut scope = PluginScope::new();

        scope.define(SERVICE_GLOBAL, service.as_str());
        for tab in &manifest.tabs {
            scope.define(
                tab.function.clone(),
                tab_function(&tab.function, tab.kind, &config.settings, &config.donate, &service),
            );
        }
        scope.define(SAVE_VAR_FN, save_var_function(&service));

        tracing::debug!(
            "plugin {} {}: {} functions",
            manifest.name,
            manifest.version,
            scope.functions().len()
        );

        Self { manifest, scope }
    }

    pub fn scope(&self) -> &PluginScope {
        &self.scope
    }

    pub fn service_id(&self) -> &str {
        &self.manifest.service_id
    }

    pub fn tab_labels(&self) -> Vec<String> {
        self.manifest.tabs.iter().map(|tab| tab.label.clone()).collect()
    }

    pub fn summary(&self) -> String {
        format!(
            "plugin {} {} ({}): {} tabs",
            self.manifest.name,
            self.manifest.version,
            self.manifest.device_type,
            self.manifest.tabs.len()
        )
    }

    /// Find a tab by label (case-insensitive) or by its function name.
    pub fn resolve_tab(&self, selector: &str) -> Result<&TabDef> {
        let mut matches = self.manifest.tabs.iter().filter(|tab| {
            tab.label.eq_ignore_ascii_case(selector) || tab.function == selector
        });

        let Some(tab) = matches.next() else {
            return Err(Error::TabNotFound(selector.to_string()));
        };

        if matches.next().is_some() {
            return Err(Error::AmbiguousTab(selector.to_string()));
        }

        Ok(tab)
    }

    /// Render a tab for `device` and return the panel HTML.
    pub fn open_tab(&self, selector: &str, device: DeviceId, host: &mut dyn Host) -> Result<String> {
        let tab = self.resolve_tab(selector)?;
        let result = self
            .scope
            .call(&tab.function, host, &[HostValue::from(device.0)])?;

        Ok(result.to_string())
    }

    pub fn save_var(
        &self,
        host: &mut dyn Host,
        device: DeviceId,
        name: &str,
        value: &str,
        reload: bool,
    ) -> Result<()> {
        self.scope.call(
            SAVE_VAR_FN,
            host,
            &[
                HostValue::from(device.0),
                HostValue::from(self.service_id()),
                HostValue::from(name),
                HostValue::from(value),
                HostValue::from(reload),
            ],
        )?;
        Ok(())
    }

    pub fn get_var(&self, host: &dyn Host, device: DeviceId, name: &str) -> Option<String> {
        host.get_device_state(device, self.service_id(), name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::device::StateChange;
    use crate::plugin::host_fns::MemoryHost;
    use crate::plugin::manifest::TabKind;

    fn manager() -> PluginManager {
        let config = AppConfig::defaults().unwrap();
        PluginManager::new(PluginManifest::builtin().unwrap(), &config)
    }

    #[test]
    fn test_scope_bindings() {
        let manager = manager();
        assert_eq!(
            manager.scope().functions(),
            vec!["razb_Donate", "razb_Settings", "saveVar"]
        );
        assert_eq!(
            manager.scope().get(SERVICE_GLOBAL).and_then(HostValue::as_text),
            Some("urn:upnp-org:serviceId:razb1")
        );
    }

    #[test]
    fn test_resolve_by_label_or_function() {
        let manager = manager();
        assert_eq!(manager.resolve_tab("settings").unwrap().kind, TabKind::Settings);
        assert_eq!(manager.resolve_tab("razb_Donate").unwrap().kind, TabKind::Donate);
    }

    #[test]
    fn test_resolve_unknown_tab() {
        let err = manager().resolve_tab("graphs").unwrap_err();
        assert_eq!(err.to_string(), "tab not found: graphs");
    }

    #[test]
    fn test_resolve_ambiguous_tab() {
        let config = AppConfig::defaults().unwrap();
        let manifest = PluginManifest::parse(
            r#"
            name = "X"
            version = "1"
            device_type = "d"
            [[tabs]]
            label = "Main"
            function = "a"
            kind = "settings"
            [[tabs]]
            label = "MAIN"
            function = "b"
            kind = "donate"
            "#,
        )
        .unwrap();

        let err = PluginManager::new(manifest, &config).resolve_tab("main").unwrap_err();
        assert!(matches!(err, Error::AmbiguousTab(_)));
    }

    #[test]
    fn test_open_tab_sets_panel() {
        let manager = manager();
        let mut host = MemoryHost::new();

        let html = manager.open_tab("Settings", DeviceId(3), &mut host).unwrap();

        assert_eq!(host.panel_html(), Some(html.as_str()));
        assert!(html.contains("razb_table"));
    }

    #[test]
    fn test_save_then_render_shows_value() {
        let manager = manager();
        let mut host = MemoryHost::new();

        manager
            .save_var(&mut host, DeviceId(3), "Debug", "1", true)
            .unwrap();
        assert_eq!(manager.get_var(&host, DeviceId(3), "Debug").as_deref(), Some("1"));
        assert_eq!(host.writes()[0].change, StateChange::Persisted);

        let html = manager.open_tab("settings", DeviceId(3), &mut host).unwrap();
        assert!(html.contains("data-variable=\"Debug\" value=\"1\""));
    }

    #[test]
    fn test_summary() {
        assert_eq!(
            manager().summary(),
            "plugin RAZB 0.1.0 (urn:schemas-upnp-org:device:razb:1): 2 tabs"
        );
    }
}
