use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{ArgGroup, Parser};
use deckbright::{DeckbrightError, HostLog, HostRuntime, Lifecycle, PluginBuilder};

/// Drive the plugin surface the way a plugin host would.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(group(
            ArgGroup::new("action")
                .required(true)
                .args(["get", "add", "log", "migrate"]),
        ))]
struct Args {
    /// Regular expression for the backlight device to use
    #[arg(long, value_name = "regex", default_value_t = String::from("."))]
    device: String,

    /// Print the current backlight brightness as a percentage of the
    /// maximum brightness supported.
    #[arg(long)]
    get: bool,

    /// Add two numbers through the plugin surface and print the sum.
    #[arg(long, num_args = 2, value_names = ["left", "right"])]
    add: Option<Vec<f64>>,

    /// Send a message to the host logger.
    #[arg(long, value_name = "message")]
    log: Option<String>,

    /// Run the one-time migration of legacy plugin data.
    #[arg(long)]
    migrate: bool,
}

/// Stand-in for the plugin host: logs through the `log` crate and relocates
/// legacy files under the XDG data directory.
struct CliHost {
    user_home: PathBuf,
    plugin_home: PathBuf,
}

impl CliHost {
    fn new() -> Result<Self, DeckbrightError> {
        let user_home = dirs::home_dir()
            .ok_or_else(|| DeckbrightError::Other("No home directory".into()))?;
        let plugin_home = dirs::data_dir()
            .ok_or_else(|| DeckbrightError::Other("No data directory".into()))?
            .join("deckbright");
        Ok(Self {
            user_home,
            plugin_home,
        })
    }

    fn relocate(&self, sources: &[PathBuf], dest: &Path) -> Result<(), DeckbrightError> {
        for source in sources {
            if !source.exists() {
                continue;
            }
            fs::create_dir_all(dest)?;
            let target = dest.join(
                source
                    .file_name()
                    .ok_or_else(|| DeckbrightError::Other("Source has no file name".into()))?,
            );
            fs::rename(source, &target)?;
            log::info!("moved {} to {}", source.display(), target.display());
        }
        Ok(())
    }
}

impl HostLog for CliHost {
    fn info(&self, message: &str) {
        log::info!(target: "host", "{message}");
    }

    fn warn(&self, message: &str) {
        log::warn!(target: "host", "{message}");
    }

    fn error(&self, message: &str) {
        log::error!(target: "host", "{message}");
    }
}

impl HostRuntime for CliHost {
    fn user_home(&self) -> PathBuf {
        self.user_home.clone()
    }

    fn plugin_home(&self) -> PathBuf {
        self.plugin_home.clone()
    }

    fn migrate_logs(&self, sources: &[PathBuf]) -> Result<(), DeckbrightError> {
        self.relocate(sources, &self.plugin_home.join("logs"))
    }

    fn migrate_settings(&self, sources: &[PathBuf]) -> Result<(), DeckbrightError> {
        self.relocate(sources, &self.plugin_home.join("settings"))
    }

    fn migrate_runtime(&self, sources: &[PathBuf]) -> Result<(), DeckbrightError> {
        self.relocate(sources, &self.plugin_home.join("runtime"))
    }
}

#[tokio::main]
async fn main() -> Result<(), DeckbrightError> {
    env_logger::init();
    let args = Args::parse();

    let host = Arc::new(CliHost::new()?);
    let mut plugin = PluginBuilder::new(host)
        .with_device_regex(args.device.as_str())
        .build()
        .await?;

    plugin.on_start().await?;

    if args.get {
        println!("{}", plugin.get_brightness_level().await?);
    } else if let Some(operands) = &args.add {
        println!("{}", plugin.add(operands[0], operands[1]));
    } else if let Some(message) = &args.log {
        plugin.log_info(message);
    } else if args.migrate {
        plugin.on_migrate().await?;
    }

    plugin.on_stop().await?;

    Ok(())
}
