use bevy::prelude::*;
use std::{collections::HashMap, path::PathBuf, time::SystemTime};

use crate::core::components::HostedField;
use crate::core::config::{ConfigOverrides, FieldAppConfig};
use crate::host::registry::HostRegistry;

#[derive(Resource, Debug, Clone)]
pub struct ConfigReloadSettings {
    pub paths: Vec<PathBuf>,
    pub interval_secs: f32,
}
impl Default for ConfigReloadSettings {
    fn default() -> Self {
        Self {
            paths: vec![
                PathBuf::from("assets/config/field.ron"),
                PathBuf::from("assets/config/field.local.ron"),
            ],
            interval_secs: 0.5,
        }
    }
}

#[derive(Resource, Debug)]
struct ConfigReloadState {
    last_mod: HashMap<PathBuf, SystemTime>,
    timer: Timer,
}
impl FromWorld for ConfigReloadState {
    fn from_world(world: &mut World) -> Self {
        // Seed with current mtimes so the config already loaded at startup is not re-applied.
        let mut last_mod = HashMap::new();
        if let Some(settings) = world.get_resource::<ConfigReloadSettings>() {
            for path in &settings.paths {
                if let Some(t) = modified(path) {
                    last_mod.insert(path.clone(), t);
                }
            }
        }
        Self {
            last_mod,
            timer: Timer::from_seconds(0.5, TimerMode::Repeating),
        }
    }
}

fn modified(path: &PathBuf) -> Option<SystemTime> {
    std::fs::metadata(path).ok()?.modified().ok()
}

/// Native-only polling reload of the RON layers listed in `ConfigReloadSettings`
/// (insert it before adding the plugin to watch other files). `ConfigOverrides`
/// are reapplied on every reload. Live-tunable parameters are pushed into running
/// fields; construction-time ones (count, sizes, speeds, palette) wait for the
/// next activation.
pub struct ConfigHotReloadPlugin;
impl Plugin for ConfigHotReloadPlugin {
    fn build(&self, app: &mut App) {
        #[cfg(not(target_arch = "wasm32"))]
        {
            app.init_resource::<ConfigReloadSettings>()
                .init_resource::<ConfigReloadState>()
                .add_systems(Update, poll_and_reload_config);
        }
        #[cfg(target_arch = "wasm32")]
        let _ = app;
    }
}

fn poll_and_reload_config(
    time: Res<Time>,
    settings: Res<ConfigReloadSettings>,
    mut state: ResMut<ConfigReloadState>,
    mut cfg_res: ResMut<FieldAppConfig>,
    overrides: Option<Res<ConfigOverrides>>,
    mut windows: Query<&mut Window>,
    registry: Res<HostRegistry>,
    mut fields: Query<(Entity, &mut HostedField)>,
) {
    if (state.timer.duration().as_secs_f32() - settings.interval_secs).abs() > f32::EPSILON {
        state
            .timer
            .set_duration(std::time::Duration::from_secs_f32(settings.interval_secs.max(0.05)));
    }
    if !state.timer.tick(time.delta()).finished() {
        return;
    }
    let mut dirty = false;
    for path in &settings.paths {
        if let Some(mod_time) = modified(path) {
            let entry = state
                .last_mod
                .entry(path.clone())
                .or_insert(SystemTime::UNIX_EPOCH);
            if mod_time > *entry {
                *entry = mod_time;
                dirty = true;
            }
        }
    }
    if !dirty {
        return;
    }
    // Optional layers that do not exist (yet) are not worth a warning.
    let (mut new_cfg, _used, errors) =
        FieldAppConfig::load_layered(settings.paths.iter().filter(|p| p.exists()));
    for e in errors {
        warn!("CONFIG HOT-RELOAD issue: {e}");
    }
    if let Some(o) = overrides {
        o.apply(&mut new_cfg);
    }
    if *cfg_res == new_cfg {
        return;
    }
    for w in new_cfg.validate() {
        warn!("CONFIG HOT-RELOAD validation: {w}");
    }
    info!("Config hot-reload applied");
    if let Ok(mut window) = windows.single_mut() {
        if window.title != new_cfg.window.title {
            window.title = new_cfg.window.title.clone();
        }
    }
    for (entity, mut field) in fields.iter_mut() {
        // Keep per-host toggles resolved at registration (overrides, compact profile).
        let mut live = new_cfg.field.clone();
        if let Some(entry) = registry.get(entity) {
            live.connections_enabled &= entry.capabilities.config.connections_enabled;
            live.pointer_enabled &= entry.capabilities.config.pointer_enabled;
        }
        field.apply_live_config(&live);
    }
    *cfg_res = new_cfg;
}
