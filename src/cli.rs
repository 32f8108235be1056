use std::path::PathBuf;

use clap::{Parser, Subcommand};

use razb_ui::model::device::DeviceId;
use razb_ui::msg::Msg;

#[derive(Parser, Debug)]
#[command(name = "razb-ui", version, about = "Render RAZB dashboard tabs and manage device variables")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// User config file merged over the defaults
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// State file used as the controller's variable store
    #[arg(long, global = true)]
    pub state: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the plugin's tabs
    Tabs,

    /// Render a tab and print its HTML
    Tab {
        /// Tab label or function name
        tab: String,
        #[arg(long, short)]
        device: u32,
    },

    /// Set a device variable
    Set {
        name: String,
        value: String,
        #[arg(long, short)]
        device: u32,
        /// Persist the value; it takes effect after a reload
        #[arg(long)]
        reload: bool,
    },

    /// Print a device variable
    Get {
        name: String,
        #[arg(long, short)]
        device: u32,
    },

    /// Substitute {0}, {1}, ... in a template
    Format {
        template: String,
        args: Vec<String>,
    },

    /// HTML-encode text
    Encode { text: String },

    /// Decode HTML to plain text
    Decode { text: String },
}

impl From<Commands> for Msg {
    fn from(command: Commands) -> Self {
        match command {
            Commands::Tabs => Msg::ListTabs,
            Commands::Tab { tab, device } => Msg::OpenTab {
                tab,
                device: DeviceId(device),
            },
            Commands::Set {
                name,
                value,
                device,
                reload,
            } => Msg::SetVar {
                device: DeviceId(device),
                name,
                value,
                reload,
            },
            Commands::Get { name, device } => Msg::GetVar {
                device: DeviceId(device),
                name,
            },
            Commands::Format { template, args } => Msg::Format { template, args },
            Commands::Encode { text } => Msg::Encode(text),
            Commands::Decode { text } => Msg::Decode(text),
        }
    }
}
