//! Mock host runtime for testing.

use std::path::PathBuf;
use std::sync::Mutex;

use crate::errors::Result;
use crate::host::{HostLog, HostRuntime};

#[derive(Default)]
struct Recorded {
    messages: Vec<String>,
    migrated_logs: Vec<PathBuf>,
    migrated_settings: Vec<PathBuf>,
    migrated_runtime: Vec<PathBuf>,
}

/// A mock plugin host for testing.
///
/// Lets code that depends on [`HostRuntime`] run without a real host
/// process; every log line and relocation request is recorded for later
/// inspection.
///
/// # Example
///
/// ```
/// use deckbright::{HostLog, MockHost};
///
/// let mock = MockHost::new();
/// mock.info("hello");
/// assert_eq!(mock.messages(), ["info: hello"]);
/// ```
pub struct MockHost {
    user_home: PathBuf,
    plugin_home: PathBuf,
    recorded: Mutex<Recorded>,
}

impl MockHost {
    /// Create a mock host rooted under the system temp directory.
    pub fn new() -> Self {
        let root = std::env::temp_dir().join("deckbright-mock-host");
        Self::with_dirs(root.join("home"), root.join("plugin"))
    }

    /// Create a mock host with explicit directory roots.
    pub fn with_dirs(user_home: impl Into<PathBuf>, plugin_home: impl Into<PathBuf>) -> Self {
        Self {
            user_home: user_home.into(),
            plugin_home: plugin_home.into(),
            recorded: Mutex::new(Recorded::default()),
        }
    }

    /// Every message logged through the host so far, prefixed with its level.
    pub fn messages(&self) -> Vec<String> {
        self.recorded.lock().unwrap().messages.clone()
    }

    pub fn migrated_logs(&self) -> Vec<PathBuf> {
        self.recorded.lock().unwrap().migrated_logs.clone()
    }

    pub fn migrated_settings(&self) -> Vec<PathBuf> {
        self.recorded.lock().unwrap().migrated_settings.clone()
    }

    pub fn migrated_runtime(&self) -> Vec<PathBuf> {
        self.recorded.lock().unwrap().migrated_runtime.clone()
    }

    fn record(&self, level: &str, message: &str) {
        self.recorded
            .lock()
            .unwrap()
            .messages
            .push(format!("{level}: {message}"));
    }
}

impl Default for MockHost {
    fn default() -> Self {
        Self::new()
    }
}

impl HostLog for MockHost {
    fn info(&self, message: &str) {
        self.record("info", message);
    }

    fn warn(&self, message: &str) {
        self.record("warn", message);
    }

    fn error(&self, message: &str) {
        self.record("error", message);
    }
}

impl HostRuntime for MockHost {
    fn user_home(&self) -> PathBuf {
        self.user_home.clone()
    }

    fn plugin_home(&self) -> PathBuf {
        self.plugin_home.clone()
    }

    fn migrate_logs(&self, sources: &[PathBuf]) -> Result<()> {
        self.recorded
            .lock()
            .unwrap()
            .migrated_logs
            .extend_from_slice(sources);
        Ok(())
    }

    fn migrate_settings(&self, sources: &[PathBuf]) -> Result<()> {
        self.recorded
            .lock()
            .unwrap()
            .migrated_settings
            .extend_from_slice(sources);
        Ok(())
    }

    fn migrate_runtime(&self, sources: &[PathBuf]) -> Result<()> {
        self.recorded
            .lock()
            .unwrap()
            .migrated_runtime
            .extend_from_slice(sources);
        Ok(())
    }
}
