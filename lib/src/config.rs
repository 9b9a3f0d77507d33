use crate::consts::*;
use crate::errors::*;
use crate::util::*;

use std::collections::HashMap;

use serde::Deserialize;
use serde::Deserializer;
use smart_default::SmartDefault;

make_log_macro!(debug, "config");

/// Settings for reading a single backlight device.
#[derive(Deserialize, Clone, Debug, SmartDefault)]
#[serde(default)]
#[serde(deny_unknown_fields)]
pub struct ReaderConfig {
    /// Seconds a single sysfs read may take before the query fails.
    #[default(10)]
    #[serde(deserialize_with = "deserialize_read_timeout")]
    pub read_timeout: u64,
}

fn deserialize_read_timeout<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let read_timeout = Deserialize::deserialize(deserializer)?;
    debug!("{:?}", read_timeout);

    if !READ_TIMEOUT_RANGE.contains(&read_timeout) {
        return Err(serde::de::Error::invalid_value(
            serde::de::Unexpected::Unsigned(read_timeout),
            &"number of seconds in the range of 1 to 60",
        ));
    }

    Ok(read_timeout)
}

#[derive(Deserialize, Clone, SmartDefault)]
#[serde(default)]
pub struct PluginConfig {
    global: ReaderConfig,
    #[serde(flatten)]
    overrides: HashMap<String, ReaderConfig>,
}

impl PluginConfig {
    /// Load the config file from the XDG config directory, falling back to
    /// defaults when there is none.
    pub async fn new() -> Result<Self> {
        if let Some(config_path) = find_file("config", Some("deckbright"), Some("toml")) {
            deserialize_toml_file(config_path).await
        } else {
            Ok(PluginConfig::default())
        }
    }

    pub(crate) fn get_reader_config(&self, device_name: &String) -> ReaderConfig {
        debug!("{}", device_name);
        if let Some(reader_config) = self.overrides.get(device_name) {
            debug!("{:?}", reader_config);
            reader_config.clone()
        } else {
            debug!("using global config");
            self.global.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_without_a_config_file() {
        let config = PluginConfig::default();
        assert_eq!(config.get_reader_config(&"amdgpu_bl0".to_string()).read_timeout, 10);
    }

    #[test]
    fn device_overrides_shadow_the_global_section() {
        let config: PluginConfig = toml::from_str(
            "[global]\n\
             read_timeout = 5\n\
             \n\
             [amdgpu_bl0]\n\
             read_timeout = 2\n",
        )
        .unwrap();

        assert_eq!(config.get_reader_config(&"amdgpu_bl0".to_string()).read_timeout, 2);
        assert_eq!(config.get_reader_config(&"panel0".to_string()).read_timeout, 5);
    }

    #[test]
    fn out_of_range_timeouts_are_rejected() {
        assert!(toml::from_str::<PluginConfig>("[global]\nread_timeout = 0\n").is_err());
        assert!(toml::from_str::<PluginConfig>("[global]\nread_timeout = 120\n").is_err());
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(toml::from_str::<PluginConfig>("[amdgpu_bl0]\nretries = 3\n").is_err());
    }
}
