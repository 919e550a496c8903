//! Debug module: feature gated frame stats, periodic logging and debug keys.
//! Built only when compiled with `--features debug`.

#[cfg(feature = "debug")]
pub mod keys; // pub for testing
#[cfg(feature = "debug")]
mod logging;
#[cfg(feature = "debug")]
mod stats;

#[cfg(feature = "debug")]
pub use stats::{DebugState, DebugStats};

#[cfg(feature = "debug")]
use crate::core::system::FieldFrameSet;
#[cfg(feature = "debug")]
use bevy::prelude::*;

#[cfg(feature = "debug")]
pub struct DebugPlugin;
#[cfg(feature = "debug")]
impl Plugin for DebugPlugin {
    fn build(&self, app: &mut App) {
        use keys::debug_key_input_system;
        use logging::debug_logging_system;
        use stats::debug_stats_collect_system;

        app.init_resource::<DebugState>()
            .init_resource::<DebugStats>()
            .add_systems(
                Update,
                (
                    debug_key_input_system,
                    (debug_stats_collect_system, debug_logging_system)
                        .chain()
                        .after(FieldFrameSet),
                ),
            );
    }
}

// Non-debug build: provide a no-op plugin so callers can add it unconditionally.
#[cfg(not(feature = "debug"))]
pub struct DebugPlugin;
#[cfg(not(feature = "debug"))]
impl bevy::prelude::Plugin for DebugPlugin {
    fn build(&self, _app: &mut bevy::prelude::App) {}
}
