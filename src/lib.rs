pub mod app;
pub mod core;
pub mod debug;
pub mod field;
pub mod host;
pub mod interaction;
pub mod rendering;

// Curated re-exports
pub use crate::app::ParticleFieldPlugin;
pub use crate::core::components::{FieldOverrides, HostArea, HostedField, ParticlesHost, TeardownField};
pub use crate::core::config::{FieldAppConfig, FieldConfig, WindowConfig};
pub use crate::field::{FrameReport, Particle, ParticleField};
pub use crate::rendering::surface::{DisplayList, DrawSurface};
