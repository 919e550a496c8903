pub mod config;

pub use config::{
    report_config_issues, CompactConfig, ConfigLoadReport, ConfigOverrides, FieldAppConfig,
    FieldConfig, SpawnRange, WindowConfig,
};
