use crate::error::Result;
use crate::model::config::{DonateConfig, SettingsConfig};
use crate::model::device::DeviceId;
use crate::model::value::{HostFn, HostValue};
use crate::plugin::host_fns::Host;
use crate::plugin::manifest::TabKind;
use crate::plugin::scope::device_arg;
use crate::text::{Template, html_encode, html_encode_attribute};

const SETTINGS_PANE: Template<'static> = Template::new(
    "<style>{0}</style><div class=\"pane\" id=\"pane\"> <table class=\"{1}\" id=\"{1}\">{2}</table></div>",
);
const SETTINGS_ROW: Template<'static> = Template::new(
    "<tr><td>{0}</td><td><input type=\"text\" id=\"{1}_{2}\" data-variable=\"{2}\" value=\"{3}\"></td></tr>",
);

const DONATE_PANE: Template<'static> = Template::new("<div class=\"donate\">{0}{1}</div>");
const DONATE_FORM: Template<'static> = Template::new(concat!(
    "<form action=\"https://www.paypal.com/cgi-bin/webscr\" method=\"post\" target=\"_top\">",
    "<input type=\"hidden\" name=\"cmd\" value=\"_donations\">",
    "<input type=\"hidden\" name=\"business\" value=\"{0}\">",
    "<input type=\"hidden\" name=\"lc\" value=\"{1}\">",
    "<input type=\"hidden\" name=\"item_name\" value=\"{2}\">",
    "<input type=\"hidden\" name=\"item_number\" value=\"{3}\">",
    "<input type=\"hidden\" name=\"no_note\" value=\"0\">",
    "<input type=\"hidden\" name=\"currency_code\" value=\"{4}\">",
    "<input type=\"hidden\" name=\"bn\" value=\"PP-DonationsBF:btn_donateCC_LG.gif:NonHostedGuest\">",
    "<input type=\"image\" src=\"https://www.paypalobjects.com/en_US/FR/i/btn/btn_donateCC_LG.gif\" ",
    "border=\"0\" name=\"submit\" alt=\"PayPal - The safer, easier way to pay online!\">",
    "<img alt=\"\" border=\"0\" src=\"https://www.paypalobjects.com/fr_FR/i/scr/pixel.gif\" width=\"1\" height=\"1\">",
    "</form>",
));

/// Settings panel: one editable row per configured device variable,
/// pre-filled with the host's current value or the configured default.
pub fn render_settings(
    settings: &SettingsConfig,
    service: &str,
    device: DeviceId,
    host: &dyn Host,
) -> String {
    let table_class = html_encode_attribute(&settings.table_class);

    let rows: String = settings
        .variables
        .iter()
        .map(|var| {
            let value = host
                .get_device_state(device, service, &var.name)
                .unwrap_or_else(|| var.default.clone());
            SETTINGS_ROW.render(&[
                &html_encode(&var.label),
                &table_class,
                &html_encode_attribute(&var.name),
                &html_encode_attribute(&value),
            ])
        })
        .collect();

    SETTINGS_PANE.render(&[&settings.style, &table_class, &rows])
}

pub fn render_donate(donate: &DonateConfig) -> String {
    let form = if donate.business.trim().is_empty() {
        String::new()
    } else {
        DONATE_FORM.render(&[
            &html_encode_attribute(&donate.business),
            &html_encode_attribute(&donate.locale),
            &html_encode_attribute(&donate.item_name),
            &html_encode_attribute(&donate.item_number),
            &html_encode_attribute(&donate.currency),
        ])
    };

    DONATE_PANE.render(&[&html_encode(&donate.message), &form])
}

/// Build the callable bound to a tab's function name. It takes the device
/// number as its only argument, hands the panel to the host and returns it.
pub fn tab_function(
    name: &str,
    kind: TabKind,
    settings: &SettingsConfig,
    donate: &DonateConfig,
    service: &str,
) -> HostFn {
    match kind {
        TabKind::Settings => {
            let settings = settings.clone();
            let service = service.to_string();
            HostFn::new(name, move |host: &mut dyn Host, args: &[HostValue]| {
                let device = device_arg(args, 0)?;
                let html = render_settings(&settings, &service, device, host);
                publish(host, device, "settings", html)
            })
        }
        TabKind::Donate => {
            let donate = donate.clone();
            HostFn::new(name, move |host: &mut dyn Host, args: &[HostValue]| {
                let device = device_arg(args, 0)?;
                publish(host, device, "donate", render_donate(&donate))
            })
        }
    }
}

fn publish(host: &mut dyn Host, device: DeviceId, tab: &str, html: String) -> Result<HostValue> {
    tracing::debug!("rendered {tab} panel for device {device} ({} bytes)", html.len());
    host.set_panel_html(&html);
    Ok(HostValue::Text(html))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::config::AppConfig;
    use crate::plugin::host_fns::MemoryHost;

    const SVC: &str = "urn:upnp-org:serviceId:razb1";

    #[test]
    fn test_settings_uses_host_value_then_default() {
        let config = AppConfig::defaults().unwrap();
        let host = MemoryHost::new().with_variable(DeviceId(5), SVC, "Debug", "1");

        let html = render_settings(&config.settings, SVC, DeviceId(5), &host);

        assert!(html.starts_with("<style></style><div class=\"pane\" id=\"pane\">"));
        assert!(html.contains("<table class=\"razb_table\" id=\"razb_table\">"));
        assert!(html.contains(
            "<tr><td>Debug mode</td><td><input type=\"text\" id=\"razb_table_Debug\" data-variable=\"Debug\" value=\"1\"></td></tr>"
        ));
        assert!(html.contains("data-variable=\"Version\" value=\"\""));
        assert!(html.ends_with("</table></div>"));
    }

    #[test]
    fn test_settings_escapes_values() {
        let config = AppConfig::defaults().unwrap();
        let host = MemoryHost::new().with_variable(DeviceId(1), SVC, "Debug", "\"><script>{1}");

        let html = render_settings(&config.settings, SVC, DeviceId(1), &host);

        assert!(html.contains("value=\"&quot;&gt;&lt;script&gt;{1}\""));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_settings_without_variables_renders_empty_table() {
        let mut config = AppConfig::defaults().unwrap();
        config.settings.variables.clear();
        let html = render_settings(&config.settings, SVC, DeviceId(1), &MemoryHost::new());
        assert!(html.contains("id=\"razb_table\"></table>"));
    }

    #[test]
    fn test_donate_form() {
        let config = AppConfig::defaults().unwrap();
        let html = render_donate(&config.donate);

        assert!(html.starts_with("<div class=\"donate\">For those who really like this plugin"));
        assert!(html.contains("name=\"item_number\" value=\"RAZB\""));
        assert!(html.contains("name=\"currency_code\" value=\"EUR\""));
        assert!(html.contains("name=\"lc\" value=\"FR\""));
        assert!(html.ends_with("</form></div>"));
    }

    #[test]
    fn test_donate_without_business_has_no_form() {
        let mut config = AppConfig::defaults().unwrap();
        config.donate.business = String::new();
        config.donate.message = "thanks & <3".to_string();

        assert_eq!(
            render_donate(&config.donate),
            "<div class=\"donate\">thanks &amp; &lt;3</div>"
        );
    }

    #[test]
    fn test_tab_function_sets_panel() {
        let config = AppConfig::defaults().unwrap();
        let func = tab_function("razb_Donate", TabKind::Donate, &config.settings, &config.donate, SVC);
        let mut host = MemoryHost::new();

        let out = func.call(&mut host, &[9_u32.into()]).unwrap();

        assert_eq!(host.panel_html(), out.as_text());
        assert_eq!(func.name(), "razb_Donate");
    }

    #[test]
    fn test_tab_function_requires_device() {
        let config = AppConfig::defaults().unwrap();
        let func = tab_function("razb_Settings", TabKind::Settings, &config.settings, &config.donate, SVC);
        let mut host = MemoryHost::new();

        assert!(func.call(&mut host, &[]).is_err());
        assert_eq!(host.panel_html(), None);
    }
}
