use crate::config::ReaderConfig;
use crate::consts::*;
use crate::errors::*;
use crate::util::*;

use std::path::{Path, PathBuf};
use std::time::Duration;

use tokio::time::timeout;

make_log_macro!(debug, "brightness");

/// Map a raw backlight value to its firmware step percent, if the value is
/// one of the known step points.
pub(crate) fn step_percent(raw: u32) -> Option<u8> {
    KNOWN_STEPS
        .binary_search_by_key(&raw, |&(step, _)| step)
        .ok()
        .map(|i| KNOWN_STEPS[i].1)
}

/// Represents a physical backlight device whose brightness level can be queried.
#[derive(Clone, Debug)]
pub struct BrightnessReader {
    pub device_name: String,
    read_brightness_file: PathBuf,
    max_brightness_file: PathBuf,
    config: ReaderConfig,
}

impl BrightnessReader {
    pub async fn new(sysfs_root: &Path, device_name: &String, config: ReaderConfig) -> Result<Self> {
        let device_path = sysfs_root.join(device_name);

        let s = Self {
            read_brightness_file: device_path.join({
                if device_path.ends_with("amdgpu_bl0") {
                    FILE_BRIGHTNESS_AMD
                } else {
                    FILE_BRIGHTNESS
                }
            }),
            max_brightness_file: device_path.join(FILE_MAX_BRIGHTNESS),
            device_name: device_name.clone(),
            config,
        };
        // Probe once so unreadable devices fail at construction.
        s.read_raw(&s.read_brightness_file).await?;
        Ok(s)
    }

    /// Read a raw brightness value from the given path, bounded by the
    /// configured timeout.
    async fn read_raw(&self, device_file: &Path) -> Result<u32> {
        let bound = Duration::from_secs(self.config.read_timeout);
        match timeout(bound, read_file(device_file)).await {
            Ok(contents) => Ok(contents?.parse()?),
            Err(_) => Err(DeckbrightError::ReadTimeout {
                path: device_file.to_path_buf(),
                timeout: bound,
            }),
        }
    }

    /// Query the brightness value for this backlight device, as a percent
    /// (0..=100).
    ///
    /// Raw values matching a known firmware step map to that step's percent
    /// exactly; anything else is scaled against `max_brightness` and clamped.
    pub async fn get_brightness_level(&self) -> Result<u8> {
        let raw = self.read_raw(&self.read_brightness_file).await?;

        if let Some(percent) = step_percent(raw) {
            debug!("raw {raw} is a known firmware step: {percent}%");
            return Ok(percent);
        }

        let max = self.read_raw(&self.max_brightness_file).await?;
        if max == 0 {
            return Err(DeckbrightError::ZeroMaxBrightness {
                device: self.device_name.clone(),
            });
        }

        let percent = (f64::from(raw) / f64::from(max) * 100.0).round();
        Ok(percent.clamp(0.0, 100.0) as u8)
    }
}
