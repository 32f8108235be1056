use std::fmt::Display;
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};

use crate::model::config::AppConfig;
use crate::msg::Msg;
use crate::plugin::{FileHost, Host, PluginManager, PluginManifest};
use crate::text::{Template, html_decode, html_encode};

pub struct App<H: Host> {
    pub config: AppConfig,
    pub manager: PluginManager,
    host: H,
}

impl App<FileHost> {
    /// Harness app backed by the state file from `config`, or `state_path`
    /// when given.
    pub fn open(config: AppConfig, state_path: Option<PathBuf>) -> Result<Self> {
        let manifest = match config.manifest_path() {
            Some(path) => PluginManifest::from_path(&path)
                .with_context(|| format!("loading manifest {}", path.display()))?,
            None => PluginManifest::builtin().context("loading built-in manifest")?,
        };

        let state_path = state_path.unwrap_or_else(|| config.state_path());
        let host = FileHost::open(&state_path)
            .with_context(|| format!("opening state file {}", state_path.display()))?;

        Ok(Self::new(config, manifest, host))
    }
}

impl<H: Host> App<H> {
    pub fn new(config: AppConfig, manifest: PluginManifest, host: H) -> Self {
        let manager = PluginManager::new(manifest, &config);
        tracing::info!("{}", manager.summary());
        Self {
            config,
            manager,
            host,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Process one message and return the lines to show the user.
    pub fn update(&mut self, msg: Msg) -> Result<Vec<String>> {
        match msg {
            Msg::ListTabs => Ok(self.manager.tab_labels()),
            Msg::OpenTab { tab, device } => {
                let html = self.manager.open_tab(&tab, device, &mut self.host)?;
                Ok(vec![html])
            }
            Msg::SetVar {
                device,
                name,
                value,
                reload,
            } => {
                self.manager
                    .save_var(&mut self.host, device, &name, &value, reload)
                    .with_context(|| format!("saving {name} on device {device}"))?;
                Ok(Vec::new())
            }
            Msg::GetVar { device, name } => self
                .manager
                .get_var(&self.host, device, &name)
                .map(|value| vec![value])
                .ok_or_else(|| anyhow!("{name} is not set on device {device}")),
            Msg::Format { template, args } => {
                let template = Template::new(&template);
                if args.len() < template.arity() {
                    tracing::warn!(
                        "template expects {} arguments, got {}",
                        template.arity(),
                        args.len()
                    );
                }
                let args: Vec<&dyn Display> = args.iter().map(|a| a as &dyn Display).collect();
                Ok(vec![template.format(&args)])
            }
            Msg::Encode(text) => Ok(vec![html_encode(&text)]),
            Msg::Decode(text) => Ok(vec![html_decode(&text)]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::device::DeviceId;
    use crate::plugin::MemoryHost;

    fn app() -> App<MemoryHost> {
        App::new(
            AppConfig::defaults().unwrap(),
            PluginManifest::builtin().unwrap(),
            MemoryHost::new(),
        )
    }

    #[test]
    fn test_list_tabs() {
        assert_eq!(app().update(Msg::ListTabs).unwrap(), vec!["Settings", "Donate"]);
    }

    #[test]
    fn test_set_then_get() {
        let mut app = app();
        app.update(Msg::SetVar {
            device: DeviceId(8),
            name: "Debug".to_string(),
            value: "1".to_string(),
            reload: false,
        })
        .unwrap();

        let out = app
            .update(Msg::GetVar {
                device: DeviceId(8),
                name: "Debug".to_string(),
            })
            .unwrap();
        assert_eq!(out, vec!["1"]);
        assert_eq!(app.host().writes().len(), 1);
    }

    #[test]
    fn test_get_missing_var_fails() {
        let err = app()
            .update(Msg::GetVar {
                device: DeviceId(8),
                name: "Nope".to_string(),
            })
            .unwrap_err();
        assert_eq!(err.to_string(), "Nope is not set on device 8");
    }

    #[test]
    fn test_open_unknown_tab_fails() {
        let err = app()
            .update(Msg::OpenTab {
                tab: "graphs".to_string(),
                device: DeviceId(1),
            })
            .unwrap_err();
        assert!(err.to_string().contains("tab not found"));
    }

    #[test]
    fn test_text_messages() {
        let mut app = app();
        let out = app
            .update(Msg::Format {
                template: "{0}-{1}-{2}".to_string(),
                args: vec!["a".to_string(), "b".to_string()],
            })
            .unwrap();
        assert_eq!(out, vec!["a-b-{2}"]);

        assert_eq!(
            app.update(Msg::Encode("<b>&</b>".to_string())).unwrap(),
            vec!["&lt;b&gt;&amp;&lt;/b&gt;"]
        );
        assert_eq!(
            app.update(Msg::Decode("<i>x</i> &amp; y".to_string())).unwrap(),
            vec!["x & y"]
        );
    }
}
