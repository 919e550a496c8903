use bevy::prelude::*;
use serde::Deserialize;
use std::{fs, path::Path};

use crate::rendering::palette::{parse_hex, DEFAULT_PALETTE};

#[derive(Debug, Deserialize, Resource, Clone, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
    pub title: String,
    #[serde(rename = "autoClose")]
    pub auto_close: f32,
}
impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
            title: "Particle Field".into(),
            auto_close: 0.0,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct SpawnRange<T> {
    pub min: T,
    pub max: T,
}
impl<T: Default> Default for SpawnRange<T> {
    fn default() -> Self {
        Self {
            min: Default::default(),
            max: Default::default(),
        }
    }
}
impl SpawnRange<f32> {
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }
    pub fn contains(&self, v: f32) -> bool {
        v >= self.min && v <= self.max
    }
    /// Ordered, non-negative copy of the range.
    fn normalized(&self) -> Self {
        let lo = self.min.min(self.max).max(0.0);
        let hi = self.min.max(self.max).max(0.0);
        Self { min: lo, max: hi }
    }
}

/// Per-field tunables. Everything a single `ParticleField` needs at construction
/// and at every frame.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct FieldConfig {
    pub particle_count: usize,
    pub size_range: SpawnRange<f32>,
    pub speed_range: SpawnRange<f32>,
    pub palette: Vec<String>,
    pub connections_enabled: bool,
    pub connection_distance: f32,
    pub connection_color: String,
    pub line_width: f32,
    pub line_opacity: f32,
    pub pointer_enabled: bool,
    pub pointer_radius: f32,
    pub pointer_color: String,
    pub pointer_line_width: f32,
    pub pointer_line_opacity: f32,
    pub repulsion_strength: f32,
    pub pointer_glow_radius: f32,
    pub pointer_glow_alpha: f32,
    pub glow_blur: f32,
}
impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            particle_count: 50,
            size_range: SpawnRange::new(2.0, 4.0),
            speed_range: SpawnRange::new(0.5, 2.0),
            palette: DEFAULT_PALETTE.iter().map(|s| s.to_string()).collect(),
            connections_enabled: true,
            connection_distance: 150.0,
            connection_color: "#00ffff".into(),
            line_width: 1.0,
            line_opacity: 0.2,
            pointer_enabled: true,
            pointer_radius: 200.0,
            pointer_color: "#a855f7".into(),
            pointer_line_width: 2.0,
            pointer_line_opacity: 0.5,
            repulsion_strength: 0.5,
            pointer_glow_radius: 50.0,
            pointer_glow_alpha: 0.3,
            glow_blur: 10.0,
        }
    }
}
impl FieldConfig {
    /// Copy safe to build a field from: ranges ordered, negatives clamped,
    /// count at least one, unusable palette replaced by the default one.
    pub fn sanitized(&self) -> Self {
        let mut c = self.clone();
        c.particle_count = c.particle_count.max(1);
        c.size_range = c.size_range.normalized();
        c.speed_range = c.speed_range.normalized();
        if !c.palette.iter().any(|hex| parse_hex(hex).is_ok()) {
            c.palette = DEFAULT_PALETTE.iter().map(|s| s.to_string()).collect();
        }
        c.connection_distance = c.connection_distance.max(0.0);
        c.line_width = c.line_width.max(0.0);
        c.line_opacity = c.line_opacity.clamp(0.0, 1.0);
        c.pointer_radius = c.pointer_radius.max(0.0);
        c.pointer_line_width = c.pointer_line_width.max(0.0);
        c.pointer_line_opacity = c.pointer_line_opacity.clamp(0.0, 1.0);
        c.pointer_glow_radius = c.pointer_glow_radius.max(0.0);
        c.pointer_glow_alpha = c.pointer_glow_alpha.clamp(0.0, 1.0);
        c.glow_blur = c.glow_blur.max(0.0);
        c
    }

    fn validate_into(&self, w: &mut Vec<String>) {
        if self.particle_count == 0 {
            w.push("field.particle_count is 0; raised to 1".into());
        }
        if self.connections_enabled && self.particle_count > 500 {
            w.push(format!(
                "field.particle_count {} with connections enabled; pair pass is O(n^2) and may stall frames",
                self.particle_count
            ));
        }
        fn check_range(w: &mut Vec<String>, label: &str, r: &SpawnRange<f32>) {
            if r.min > r.max {
                w.push(format!(
                    "{label} min ({}) greater than max ({}); swapped",
                    r.min, r.max
                ));
            }
            if r.min < 0.0 || r.max < 0.0 {
                w.push(format!("{label} has negative bounds; clamped to 0"));
            }
        }
        check_range(w, "field.size_range", &self.size_range);
        check_range(w, "field.speed_range", &self.speed_range);
        if self.palette.is_empty() {
            w.push("field.palette is empty; default palette used".into());
        }
        for hex in &self.palette {
            if let Err(e) = parse_hex(hex) {
                w.push(format!("field.palette entry skipped: {e}"));
            }
        }
        for (label, hex) in [
            ("field.connection_color", &self.connection_color),
            ("field.pointer_color", &self.pointer_color),
        ] {
            if let Err(e) = parse_hex(hex) {
                w.push(format!("{label}: {e}; default used"));
            }
        }
        if self.connection_distance < 0.0 {
            w.push("field.connection_distance negative; clamped to 0".into());
        }
        if self.pointer_radius < 0.0 {
            w.push("field.pointer_radius negative; clamped to 0".into());
        }
        if !(0.0..=1.0).contains(&self.line_opacity) {
            w.push(format!(
                "field.line_opacity {} outside 0..1; clamped",
                self.line_opacity
            ));
        }
        if !(0.0..=1.0).contains(&self.pointer_line_opacity) {
            w.push(format!(
                "field.pointer_line_opacity {} outside 0..1; clamped",
                self.pointer_line_opacity
            ));
        }
        if self.repulsion_strength < 0.0 {
            w.push("field.repulsion_strength negative -> pointer attracts particles".into());
        }
    }
}

/// Lighter profile applied when the window is narrower than `breakpoint`.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct CompactConfig {
    pub enabled: bool,
    pub breakpoint: f32,
    pub particle_count: usize,
}
impl Default for CompactConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            breakpoint: 768.0,
            particle_count: 20,
        }
    }
}
impl CompactConfig {
    pub fn applies_to(&self, window_width: f32) -> bool {
        self.enabled && window_width < self.breakpoint
    }
    pub fn apply(&self, base: &FieldConfig) -> FieldConfig {
        FieldConfig {
            particle_count: self.particle_count,
            connections_enabled: false,
            ..base.clone()
        }
    }
}

#[derive(Debug, Deserialize, Resource, Clone, PartialEq, Default)]
#[serde(default)]
pub struct FieldAppConfig {
    pub window: WindowConfig,
    pub field: FieldConfig,
    pub compact: CompactConfig,
    /// Forces the reduced-motion preference when set; otherwise environment/platform decide.
    pub reduced_motion: Option<bool>,
}

impl FieldAppConfig {
    pub fn from_ron_str(data: &str) -> Result<Self, String> {
        ron::from_str(data).map_err(|e| format!("parse RON: {e}"))
    }
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, String> {
        let data = fs::read_to_string(&path).map_err(|e| format!("read config: {e}"))?;
        Self::from_ron_str(&data)
    }
    pub fn load_or_default(path: impl AsRef<Path>) -> (Self, Option<String>) {
        match Self::load_from_file(&path) {
            Ok(cfg) => (cfg, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }
    /// Deep-merges every readable RON file in order (later files win per key) and
    /// deserializes the result. Returns the config, the files used and any errors.
    pub fn load_layered<P, I>(paths: I) -> (Self, Vec<String>, Vec<String>)
    where
        P: AsRef<Path>,
        I: IntoIterator<Item = P>,
    {
        use ron::value::Value;
        let mut merged: Option<Value> = None;
        let mut used = Vec::new();
        let mut errors = Vec::new();
        fn merge_value(base: &mut Value, overlay: Value) {
            match (base, overlay) {
                (Value::Map(bm), Value::Map(om)) => {
                    for (k, v) in om.into_iter() {
                        let existing = bm.iter_mut().find(|(ek, _)| **ek == k).map(|(_, ev)| ev);
                        match existing {
                            Some(ev) => merge_value(ev, v),
                            None => {
                                bm.insert(k, v);
                            }
                        }
                    }
                }
                (b, o) => *b = o,
            }
        }
        for p in paths {
            let path_ref = p.as_ref();
            match fs::read_to_string(path_ref) {
                Ok(txt) => match ron::from_str::<Value>(&txt) {
                    Ok(val) => {
                        match merged.as_mut() {
                            Some(cur) => merge_value(cur, val),
                            None => merged = Some(val),
                        }
                        used.push(path_ref.display().to_string());
                    }
                    Err(e) => errors.push(format!("{}: parse error: {e}", path_ref.display())),
                },
                Err(e) => errors.push(format!("{}: read error: {e}", path_ref.display())),
            }
        }
        let Some(val) = merged else {
            return (Self::default(), used, errors);
        };
        match val.into_rust::<FieldAppConfig>() {
            Ok(cfg) => (cfg, used, errors),
            Err(e) => {
                errors.push(format!(
                    "failed to deserialize merged config; using defaults: {e}"
                ));
                (Self::default(), used, errors)
            }
        }
    }
    pub fn validate(&self) -> Vec<String> {
        let mut w = Vec::new();
        if self.window.width <= 0.0 || self.window.height <= 0.0 {
            w.push("window dimensions must be > 0".into());
        }
        if self.window.auto_close < 0.0 {
            w.push(format!(
                "window.autoClose {} negative -> treated as disabled (should be >= 0)",
                self.window.auto_close
            ));
        } else if self.window.auto_close > 0.0 && self.window.auto_close < 0.01 {
            w.push(format!(
                "window.autoClose {} very small; closes almost immediately",
                self.window.auto_close
            ));
        }
        self.field.validate_into(&mut w);
        if self.compact.enabled {
            if self.compact.breakpoint <= 0.0 {
                w.push("compact.breakpoint <= 0; compact profile never applies".into());
            }
            if self.compact.particle_count == 0 {
                w.push("compact.particle_count is 0; raised to 1".into());
            }
        }
        w
    }
}

/// Files and issues gathered while loading the config, logged once at startup.
#[derive(Resource, Debug, Clone, Default)]
pub struct ConfigLoadReport {
    pub used: Vec<String>,
    pub errors: Vec<String>,
}

/// Values forced from the command line. They sit on top of every config layer,
/// including ones reloaded while the app runs.
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    pub reduced_motion: Option<bool>,
    pub particle_count: Option<usize>,
    pub auto_close: Option<f32>,
}
impl ConfigOverrides {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
    pub fn apply(&self, cfg: &mut FieldAppConfig) {
        if let Some(reduced) = self.reduced_motion {
            cfg.reduced_motion = Some(reduced);
        }
        if let Some(n) = self.particle_count {
            cfg.field.particle_count = n;
        }
        if let Some(secs) = self.auto_close {
            cfg.window.auto_close = secs;
        }
    }
}

pub fn report_config_issues(cfg: Res<FieldAppConfig>, report: Option<Res<ConfigLoadReport>>) {
    if let Some(report) = report {
        if !report.used.is_empty() {
            info!(files = ?report.used, "Config layers loaded");
        }
        for e in &report.errors {
            warn!("CONFIG issue: {e}");
        }
    }
    for w in cfg.validate() {
        warn!("CONFIG validation: {w}");
    }
}
