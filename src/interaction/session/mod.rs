pub mod auto_close;
pub mod config_hot_reload;

pub use auto_close::{AutoClosePlugin, AutoCloseTimer};
pub use config_hot_reload::{ConfigHotReloadPlugin, ConfigReloadSettings};
