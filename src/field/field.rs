use bevy::prelude::*;
use rand::Rng;

use crate::core::config::FieldConfig;
use crate::rendering::palette::{
    resolve_or, resolve_palette, DEFAULT_CONNECTION_COLOR, DEFAULT_POINTER_COLOR,
};
use crate::rendering::surface::{DisplayList, DrawSurface, LineKind};

use super::forces::{for_each_pair_within, link_opacity, repulsion_impulse};
use super::particle::Particle;

/// Stroke colors resolved from the config's hex strings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldStyle {
    pub connection: Color,
    pub pointer: Color,
}
impl FieldStyle {
    pub fn from_config(cfg: &FieldConfig) -> Self {
        Self {
            connection: resolve_or(&cfg.connection_color, DEFAULT_CONNECTION_COLOR),
            pointer: resolve_or(&cfg.pointer_color, DEFAULT_POINTER_COLOR),
        }
    }
}

/// What a single `update` drew.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameReport {
    pub frame: u64,
    pub particles: usize,
    pub connections: usize,
    pub pointer_links: usize,
}

/// A fixed set of particles bouncing around a surface, with optional
/// connective lines and pointer repulsion.
///
/// The field owns its drawing surface. `update` only does work while a frame is
/// scheduled; every completed frame schedules the next one until `teardown`.
#[derive(Debug)]
pub struct ParticleField<S: DrawSurface = DisplayList> {
    config: FieldConfig,
    style: FieldStyle,
    size: Vec2,
    particles: Vec<Particle>,
    pointer: Option<Vec2>,
    running: bool,
    frame_pending: bool,
    frame: u64,
    surface: Option<S>,
}

impl<S: DrawSurface> ParticleField<S> {
    /// Builds and starts a field covering `size`.
    pub fn new<R: Rng + ?Sized>(surface: S, size: Vec2, config: &FieldConfig, rng: &mut R) -> Self {
        let mut field = Self::deferred(surface, size, config, rng);
        field.start();
        field
    }

    /// Builds a field without scheduling its first frame; call `start` later.
    pub fn deferred<R: Rng + ?Sized>(
        surface: S,
        size: Vec2,
        config: &FieldConfig,
        rng: &mut R,
    ) -> Self {
        let config = config.sanitized();
        let size = size.max(Vec2::ZERO);
        let palette = resolve_palette(&config.palette);
        let particles = (0..config.particle_count)
            .map(|_| Particle::spawn(rng, size, &config, &palette))
            .collect();
        Self::assemble(surface, size, config, particles)
    }

    /// Builds a stopped field from explicit particles instead of random ones.
    pub fn with_particles(
        surface: S,
        size: Vec2,
        config: &FieldConfig,
        particles: Vec<Particle>,
    ) -> Self {
        Self::assemble(surface, size.max(Vec2::ZERO), config.sanitized(), particles)
    }

    fn assemble(mut surface: S, size: Vec2, config: FieldConfig, particles: Vec<Particle>) -> Self {
        surface.resize(size);
        Self {
            style: FieldStyle::from_config(&config),
            config,
            size,
            particles,
            pointer: None,
            running: false,
            frame_pending: false,
            frame: 0,
            surface: Some(surface),
        }
    }

    /// Schedules the first frame. No effect after teardown.
    pub fn start(&mut self) {
        if self.surface.is_none() {
            return;
        }
        self.running = true;
        self.frame_pending = true;
    }

    /// Runs one update-and-draw cycle if a frame is scheduled.
    pub fn update(&mut self) -> Option<FrameReport> {
        if !self.frame_pending {
            return None;
        }
        self.frame_pending = false;
        let Self {
            config,
            style,
            size,
            particles,
            pointer,
            surface,
            ..
        } = self;
        let surface = surface.as_mut()?;
        let mut report = FrameReport {
            frame: self.frame,
            particles: particles.len(),
            ..default()
        };

        surface.clear();

        if config.connections_enabled {
            let points: Vec<Vec2> = particles.iter().map(|p| p.position).collect();
            for_each_pair_within(&points, config.connection_distance, |i, j, d| {
                if let Some(op) = link_opacity(d, config.connection_distance, config.line_opacity) {
                    surface.line(
                        points[i],
                        points[j],
                        style.connection.with_alpha(op),
                        LineKind::Connection,
                    );
                    report.connections += 1;
                }
            });
        }

        if config.pointer_enabled {
            if let Some(pointer) = *pointer {
                for p in particles.iter_mut() {
                    let offset = p.position - pointer;
                    let d = offset.length();
                    if let Some(op) =
                        link_opacity(d, config.pointer_radius, config.pointer_line_opacity)
                    {
                        surface.line(
                            p.position,
                            pointer,
                            style.pointer.with_alpha(op),
                            LineKind::Pointer,
                        );
                        report.pointer_links += 1;
                    }
                    if let Some(impulse) =
                        repulsion_impulse(offset, config.pointer_radius, config.repulsion_strength)
                    {
                        p.velocity += impulse;
                    }
                }
                if config.pointer_glow_radius > 0.0 {
                    surface.halo(
                        pointer,
                        config.pointer_glow_radius,
                        style.pointer.with_alpha(config.pointer_glow_alpha),
                    );
                }
            }
        }

        for p in particles.iter_mut() {
            p.integrate(*size);
            surface.disc(p.position, p.radius, p.color, config.glow_blur);
        }

        self.frame += 1;
        self.frame_pending = self.running;
        Some(report)
    }

    /// Resynchronises the surface to the container's new size. Particles keep
    /// their positions; out-of-bounds ones are pulled back by the next update.
    pub fn resize(&mut self, size: Vec2) {
        let size = size.max(Vec2::ZERO);
        if let Some(surface) = self.surface.as_mut() {
            self.size = size;
            surface.resize(size);
        }
    }

    /// Pointer moved to `viewport_pos`; `container` is the host's on-screen rect in
    /// the same viewport coordinates. Moves outside the container count as a leave.
    pub fn pointer_moved(&mut self, viewport_pos: Vec2, container: Rect) {
        if container.contains(viewport_pos) {
            self.pointer = Some(viewport_pos - container.min);
        } else {
            self.pointer = None;
        }
    }

    pub fn pointer_left(&mut self) {
        self.pointer = None;
    }

    /// Cancels the pending frame and detaches the surface. Returns `false` when the
    /// field was already torn down.
    pub fn teardown(&mut self) -> bool {
        self.running = false;
        self.frame_pending = false;
        self.pointer = None;
        self.surface.take().is_some()
    }

    /// Applies the per-frame tunables of `cfg` without rebuilding particles.
    /// Count, sizes, speeds and palette only take effect at construction.
    pub fn apply_live_config(&mut self, cfg: &FieldConfig) {
        let cfg = cfg.sanitized();
        let c = &mut self.config;
        c.connections_enabled = cfg.connections_enabled;
        c.connection_distance = cfg.connection_distance;
        c.connection_color = cfg.connection_color;
        c.line_width = cfg.line_width;
        c.line_opacity = cfg.line_opacity;
        c.pointer_enabled = cfg.pointer_enabled;
        c.pointer_radius = cfg.pointer_radius;
        c.pointer_color = cfg.pointer_color;
        c.pointer_line_width = cfg.pointer_line_width;
        c.pointer_line_opacity = cfg.pointer_line_opacity;
        c.repulsion_strength = cfg.repulsion_strength;
        c.pointer_glow_radius = cfg.pointer_glow_radius;
        c.pointer_glow_alpha = cfg.pointer_glow_alpha;
        c.glow_blur = cfg.glow_blur;
        self.style = FieldStyle::from_config(&self.config);
        if !self.config.pointer_enabled {
            self.pointer = None;
        }
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }
    pub fn style(&self) -> FieldStyle {
        self.style
    }
    pub fn size(&self) -> Vec2 {
        self.size
    }
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }
    pub fn pointer(&self) -> Option<Vec2> {
        self.pointer
    }
    pub fn is_running(&self) -> bool {
        self.running
    }
    pub fn is_frame_pending(&self) -> bool {
        self.frame_pending
    }
    pub fn is_torn_down(&self) -> bool {
        self.surface.is_none()
    }
    pub fn frame(&self) -> u64 {
        self.frame
    }
    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }
}
