#![warn(clippy::match_same_arms)]
#![warn(clippy::semicolon_if_nothing_returned)]
#![warn(clippy::unnecessary_wraps)]

#[macro_use]
mod util;
mod brightness;
mod config;
mod consts;
mod errors;
mod host;
mod mock;

use std::path::Path;
use std::sync::Arc;

use regex::Regex;
use tokio::fs::read_dir;

pub use crate::brightness::BrightnessReader;
pub use crate::config::{PluginConfig, ReaderConfig};
pub use crate::errors::{DeckbrightError, Result};
pub use crate::host::{HostLog, HostRuntime, Lifecycle};
pub use crate::mock::MockHost;
use crate::consts::*;

make_log_macro!(debug, "deckbright");

/// Used to construct [`Plugin`]
pub struct PluginBuilder<'a> {
    device_regex: &'a str,
    config: Option<PluginConfig>,
    host: Arc<dyn HostRuntime>,
}

impl<'a> PluginBuilder<'a> {
    /// Create a new [`PluginBuilder`] around the host capabilities handle.
    pub fn new(host: Arc<dyn HostRuntime>) -> Self {
        Self {
            device_regex: ".",
            config: None,
            host,
        }
    }

    /// Defaults to `"."` (matches all devices).
    pub fn with_device_regex(mut self, device_regex: &'a str) -> Self {
        self.device_regex = device_regex;
        self
    }

    /// Defaults to [`PluginConfig::new()`].
    pub fn with_config(mut self, config: PluginConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Returns the constructed [`Plugin`] instance.
    pub async fn build(self) -> Result<Plugin> {
        let config = match self.config {
            Some(config) => config,
            None => PluginConfig::new().await?,
        };

        Plugin::new(Regex::new(self.device_regex)?, config, self.host).await
    }
}

/// Pick the first device under `sysfs_root` that matches the regex and can
/// actually be read.
pub(crate) async fn discover_reader(
    sysfs_root: &Path,
    device_regex: &Regex,
    config: &PluginConfig,
) -> Result<BrightnessReader> {
    let mut sysfs_paths = read_dir(sysfs_root).await?;

    let mut device_names = Vec::new();
    while let Some(sysfs_path) = sysfs_paths.next_entry().await? {
        let device_name = sysfs_path.file_name().to_string_lossy().to_string();
        if device_regex.is_match(&device_name) {
            debug!("{:?} matched {}", device_name, device_regex.as_str());
            device_names.push(device_name);
        }
    }
    device_names.sort();

    for device_name in &device_names {
        match BrightnessReader::new(
            sysfs_root,
            device_name,
            config.get_reader_config(device_name),
        )
        .await
        {
            Ok(reader) => return Ok(reader),
            Err(e) => debug!("skipping {device_name}: {e}"),
        }
    }

    Err(DeckbrightError::NoDevices)
}

/// The remote method surface the host exposes to its callers.
pub struct Plugin {
    reader: BrightnessReader,
    host: Arc<dyn HostRuntime>,
}

impl Plugin {
    pub(crate) async fn new(
        device_regex: Regex,
        config: PluginConfig,
        host: Arc<dyn HostRuntime>,
    ) -> Result<Self> {
        let reader = discover_reader(Path::new(DEVICES_PATH), &device_regex, &config).await?;
        Ok(Plugin { reader, host })
    }

    /// Query the current backlight brightness, as a percent (0..=100).
    pub async fn get_brightness_level(&self) -> Result<u8> {
        self.reader.get_brightness_level().await
    }

    /// Add two numbers.
    pub fn add(&self, left: f64, right: f64) -> f64 {
        left + right
    }

    /// Write a message through the host's logger.
    pub fn log_info(&self, message: &str) {
        self.host.info(message);
    }
}

impl Lifecycle for Plugin {
    async fn on_start(&mut self) -> Result<()> {
        self.host.info("deckbright loaded");
        Ok(())
    }

    async fn on_stop(&mut self) -> Result<()> {
        self.host.info("deckbright unloading");
        Ok(())
    }

    async fn on_migrate(&mut self) -> Result<()> {
        self.host.info("migrating legacy plugin data");
        let user_home = self.host.user_home();
        let plugin_home = self.host.plugin_home();

        self.host
            .migrate_logs(&[user_home.join(".config/deckbright/deckbright.log")])?;
        self.host.migrate_settings(&[
            plugin_home.join("settings/deckbright.json"),
            user_home.join(".config/deckbright"),
        ])?;
        self.host.migrate_runtime(&[
            plugin_home.join("deckbright"),
            user_home.join(".local/share/deckbright"),
        ])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn fake_sysfs() -> TempDir {
        let dir = TempDir::new().unwrap();

        let amd = dir.path().join("amdgpu_bl0");
        fs::create_dir_all(&amd).unwrap();
        fs::write(amd.join(FILE_BRIGHTNESS_AMD), "1217").unwrap();
        fs::write(amd.join(FILE_MAX_BRIGHTNESS), "4095").unwrap();

        let intel = dir.path().join("intel_backlight");
        fs::create_dir_all(&intel).unwrap();
        fs::write(intel.join(FILE_BRIGHTNESS), "200").unwrap();
        fs::write(intel.join(FILE_MAX_BRIGHTNESS), "400").unwrap();

        dir
    }

    async fn plugin_over(dir: &TempDir, host: Arc<MockHost>) -> Plugin {
        let reader = discover_reader(
            dir.path(),
            &Regex::new(".").unwrap(),
            &PluginConfig::default(),
        )
        .await
        .unwrap();
        Plugin { reader, host }
    }

    #[tokio::test]
    async fn discovery_honors_the_device_regex() {
        let dir = fake_sysfs();
        let reader = discover_reader(
            dir.path(),
            &Regex::new("intel").unwrap(),
            &PluginConfig::default(),
        )
        .await
        .unwrap();
        assert_eq!(reader.device_name, "intel_backlight");
        // 200 / 400, no step table hit on this panel's scale
        assert_eq!(reader.get_brightness_level().await.unwrap(), 50);
    }

    #[tokio::test]
    async fn discovery_skips_devices_it_cannot_read() {
        let dir = fake_sysfs();
        // Sorts before amdgpu_bl0 but has no readable files.
        fs::create_dir_all(dir.path().join("acpi_video0")).unwrap();

        let reader = discover_reader(
            dir.path(),
            &Regex::new(".").unwrap(),
            &PluginConfig::default(),
        )
        .await
        .unwrap();
        assert_eq!(reader.device_name, "amdgpu_bl0");
    }

    #[tokio::test]
    async fn discovery_without_a_match_reports_no_devices() {
        let dir = fake_sysfs();
        let err = discover_reader(
            dir.path(),
            &Regex::new("nvidia").unwrap(),
            &PluginConfig::default(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, DeckbrightError::NoDevices));
    }

    #[tokio::test]
    async fn add_is_a_plain_sum() {
        let dir = fake_sysfs();
        let plugin = plugin_over(&dir, Arc::new(MockHost::new())).await;
        assert_eq!(plugin.add(2.0, 3.0), 5.0);
        assert_eq!(plugin.add(-1.5, 0.5), -1.0);
    }

    #[tokio::test]
    async fn log_info_writes_through_to_the_host() {
        let dir = fake_sysfs();
        let host = Arc::new(MockHost::new());
        let plugin = plugin_over(&dir, Arc::clone(&host)).await;

        plugin.log_info("brightness bar ready");
        assert_eq!(host.messages(), ["info: brightness bar ready"]);
    }

    #[tokio::test]
    async fn migration_hands_legacy_paths_to_the_host() {
        let dir = fake_sysfs();
        let host = Arc::new(MockHost::with_dirs("/home/deck", "/home/deck/homebrew"));
        let mut plugin = plugin_over(&dir, Arc::clone(&host)).await;

        plugin.on_migrate().await.unwrap();

        assert_eq!(
            host.migrated_logs(),
            [PathBuf::from("/home/deck/.config/deckbright/deckbright.log")]
        );
        assert_eq!(
            host.migrated_settings(),
            [
                PathBuf::from("/home/deck/homebrew/settings/deckbright.json"),
                PathBuf::from("/home/deck/.config/deckbright"),
            ]
        );
        assert_eq!(
            host.migrated_runtime(),
            [
                PathBuf::from("/home/deck/homebrew/deckbright"),
                PathBuf::from("/home/deck/.local/share/deckbright"),
            ]
        );
    }

    #[tokio::test]
    async fn lifecycle_hooks_log_through_the_host() {
        let dir = fake_sysfs();
        let host = Arc::new(MockHost::new());
        let mut plugin = plugin_over(&dir, Arc::clone(&host)).await;

        plugin.on_start().await.unwrap();
        plugin.on_stop().await.unwrap();
        assert_eq!(
            host.messages(),
            ["info: deckbright loaded", "info: deckbright unloading"]
        );
    }
}
