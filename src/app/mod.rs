pub mod plugin;

pub use plugin::ParticleFieldPlugin;
