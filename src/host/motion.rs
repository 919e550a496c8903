use bevy::prelude::*;

use crate::core::config::FieldAppConfig;

/// Environment override for the reduced-motion preference (`1`/`true`/`0`/`false`).
pub const REDUCED_MOTION_ENV: &str = "PARTICLE_FIELD_REDUCED_MOTION";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionSource {
    Config,
    Environment,
    Platform,
    Default,
}

/// One-shot reduced-motion answer, resolved at startup. When `reduced` is set no
/// field is ever built.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct MotionPreference {
    pub reduced: bool,
    pub source: MotionSource,
}
impl MotionPreference {
    pub fn full() -> Self {
        Self {
            reduced: false,
            source: MotionSource::Default,
        }
    }
    pub fn reduced() -> Self {
        Self {
            reduced: true,
            source: MotionSource::Config,
        }
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" | "reduce" => Some(true),
        "0" | "false" | "no" | "off" | "no-preference" => Some(false),
        _ => None,
    }
}

/// Precedence: config override, then environment value, then platform query.
pub fn resolve_motion_preference(
    config_override: Option<bool>,
    env_value: Option<&str>,
    platform: Option<bool>,
) -> MotionPreference {
    if let Some(reduced) = config_override {
        return MotionPreference {
            reduced,
            source: MotionSource::Config,
        };
    }
    if let Some(reduced) = env_value.and_then(parse_flag) {
        return MotionPreference {
            reduced,
            source: MotionSource::Environment,
        };
    }
    if let Some(reduced) = platform {
        return MotionPreference {
            reduced,
            source: MotionSource::Platform,
        };
    }
    MotionPreference::full()
}

/// `prefers-reduced-motion` media query. Only browsers have an answer.
#[cfg(target_arch = "wasm32")]
pub fn platform_prefers_reduced_motion() -> Option<bool> {
    let window = web_sys::window()?;
    let query = window
        .match_media("(prefers-reduced-motion: reduce)")
        .ok()
        .flatten()?;
    Some(query.matches())
}

#[cfg(not(target_arch = "wasm32"))]
pub fn platform_prefers_reduced_motion() -> Option<bool> {
    None
}

/// Startup system: inserts `MotionPreference` unless the app already provided one.
pub fn resolve_motion_system(
    mut commands: Commands,
    cfg: Res<FieldAppConfig>,
    existing: Option<Res<MotionPreference>>,
) {
    if existing.is_some() {
        return;
    }
    let env = std::env::var(REDUCED_MOTION_ENV).ok();
    let pref = resolve_motion_preference(
        cfg.reduced_motion,
        env.as_deref(),
        platform_prefers_reduced_motion(),
    );
    if pref.reduced {
        info!(source = ?pref.source, "Particles disabled (reduced motion preference)");
    }
    commands.insert_resource(pref);
}
