//! The particle field model: particles, per-frame forces and the field itself.
//! Independent of the ECS; the Bevy wiring lives in `host` and `interaction`.
pub mod field;
pub mod forces;
pub mod particle;

pub use field::{FieldStyle, FrameReport, ParticleField};
pub use particle::{BoundaryHits, Particle};
