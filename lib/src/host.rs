//! Capabilities provided by the plugin host runtime.
//!
//! The host owns process lifetime, IPC, and the settings/log/runtime
//! directory conventions. The plugin only ever talks to it through these
//! traits; a thin adapter on the host side implements them.

use std::path::PathBuf;

use crate::errors::Result;

/// The host's logger, injected into the plugin instead of any process-wide
/// global.
pub trait HostLog: Send + Sync {
    fn info(&self, message: &str);
    fn warn(&self, message: &str);
    fn error(&self, message: &str);
}

/// Directory layout and relocation utilities owned by the host runtime.
///
/// The `migrate_*` calls hand legacy paths over to the host; whether and how
/// files actually move is the host's business.
pub trait HostRuntime: HostLog {
    /// The home directory of the user the host runs as.
    fn user_home(&self) -> PathBuf;

    /// The host's own install root, under which legacy plugin data may live.
    fn plugin_home(&self) -> PathBuf;

    fn migrate_logs(&self, sources: &[PathBuf]) -> Result<()>;
    fn migrate_settings(&self, sources: &[PathBuf]) -> Result<()>;
    fn migrate_runtime(&self, sources: &[PathBuf]) -> Result<()>;
}

/// Hooks the host runtime drives over a plugin's lifetime.
///
/// Implemented by the plugin, called only by the host adapter — never from
/// inside the plugin itself.
#[allow(async_fn_in_trait)]
pub trait Lifecycle {
    /// Invoked once after the host has loaded the plugin.
    async fn on_start(&mut self) -> Result<()>;

    /// Invoked first when the host starts unloading the plugin.
    async fn on_stop(&mut self) -> Result<()>;

    /// One-time relocation of legacy data, run before [`Lifecycle::on_start`].
    async fn on_migrate(&mut self) -> Result<()>;
}
