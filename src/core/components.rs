use bevy::prelude::*;

use crate::core::config::FieldConfig;
use crate::field::ParticleField;

/// Marker for a decorative "particles" region. The crate never spawns these; the
/// page (application) does, and every one found gets its own field.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct ParticlesHost {
    pub area: HostArea,
}
impl ParticlesHost {
    pub fn window() -> Self {
        Self {
            area: HostArea::Window,
        }
    }
    pub fn region(area: HostArea) -> Self {
        Self { area }
    }
}

/// Where a host sits on screen, in viewport coordinates (logical pixels, origin
/// top-left, y down).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HostArea {
    /// The whole window.
    Window,
    /// Fractions (0..1) of the window, so the region follows resizes.
    Fraction(Rect),
    /// Fixed logical-pixel rect.
    Fixed(Rect),
}
impl HostArea {
    /// Current on-screen bounds for a window of `window_size`.
    pub fn resolve(&self, window_size: Vec2) -> Rect {
        match *self {
            HostArea::Window => Rect::from_corners(Vec2::ZERO, window_size),
            HostArea::Fraction(f) => Rect::from_corners(f.min * window_size, f.max * window_size),
            HostArea::Fixed(r) => r,
        }
    }
}

/// Optional per-host tweaks merged over the global field config when the host is
/// registered.
#[derive(Component, Debug, Clone, Default, PartialEq)]
pub struct FieldOverrides {
    pub particle_count: Option<usize>,
    pub palette: Option<Vec<String>>,
    pub connections_enabled: Option<bool>,
    pub pointer_enabled: Option<bool>,
}
impl FieldOverrides {
    pub fn apply(&self, base: &FieldConfig) -> FieldConfig {
        let mut c = base.clone();
        if let Some(n) = self.particle_count {
            c.particle_count = n;
        }
        if let Some(p) = &self.palette {
            c.palette = p.clone();
        }
        if let Some(b) = self.connections_enabled {
            c.connections_enabled = b;
        }
        if let Some(b) = self.pointer_enabled {
            c.pointer_enabled = b;
        }
        c
    }
}

/// The live field attached to a host.
#[derive(Component, Debug, Deref, DerefMut)]
pub struct HostedField(pub ParticleField);

/// Requests teardown of the field on `host`. Repeated requests are no-ops.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TeardownField {
    pub host: Entity,
}
