#[cfg(feature = "debug")]
use bevy::prelude::*;
#[cfg(feature = "debug")]
use super::stats::{DebugState, DebugStats};

#[cfg(feature = "debug")]
pub fn debug_logging_system(time: Res<Time>, mut state: ResMut<DebugState>, stats: Res<DebugStats>) {
    if !state.logging_enabled {
        return;
    }
    state.time_accum += time.delta_secs();
    if state.time_accum >= state.log_interval {
        state.time_accum = 0.0;
        info!("FIELD frame={} t={:.3}s fps={:.1} ft_ms={:.1} fields={} particles={} lines={} pointer_links={}",
            state.frame_counter,
            time.elapsed_secs(),
            stats.fps,
            stats.frame_time_ms,
            stats.fields,
            stats.particle_count,
            stats.connections,
            stats.pointer_links);
    }
}
