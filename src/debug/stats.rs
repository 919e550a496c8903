#[cfg(feature = "debug")]
use crate::interaction::frame::FieldFrameStats;
#[cfg(feature = "debug")]
use bevy::prelude::*;

#[cfg(feature = "debug")]
#[derive(Resource, Debug)]
pub struct DebugState {
    pub logging_enabled: bool,
    pub log_interval: f32,
    pub time_accum: f32,
    pub frame_counter: u64,
}

#[cfg(feature = "debug")]
impl Default for DebugState {
    fn default() -> Self {
        Self {
            logging_enabled: true,
            log_interval: 1.0,
            time_accum: 0.0,
            frame_counter: 0,
        }
    }
}

#[cfg(feature = "debug")]
#[derive(Resource, Default, Debug, Clone)]
pub struct DebugStats {
    pub fps: f32,
    pub frame_time_ms: f32,
    pub fields: usize,
    pub particle_count: usize,
    pub connections: usize,
    pub pointer_links: usize,
}

#[cfg(feature = "debug")]
pub fn debug_stats_collect_system(
    time: Res<Time>,
    mut state: ResMut<DebugState>,
    mut stats: ResMut<DebugStats>,
    frame: Res<FieldFrameStats>,
) {
    state.frame_counter += 1;
    let dt = time.delta_secs().max(1e-6);
    let inst_fps = 1.0 / dt;
    if stats.fps == 0.0 {
        stats.fps = inst_fps;
    } else {
        stats.fps = stats.fps * 0.9 + inst_fps * 0.1;
    }
    let inst_ms = dt * 1000.0;
    if stats.frame_time_ms == 0.0 {
        stats.frame_time_ms = inst_ms;
    } else {
        stats.frame_time_ms = stats.frame_time_ms * 0.9 + inst_ms * 0.1;
    }
    stats.fields = frame.fields;
    stats.particle_count = frame.particles;
    stats.connections = frame.connections;
    stats.pointer_links = frame.pointer_links;
}
