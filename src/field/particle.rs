use bevy::prelude::*;
use rand::seq::SliceRandom;
use rand::Rng;
use std::f32::consts::TAU;

use crate::core::config::FieldConfig;

/// A single moving point. Coordinates are surface-local: origin at the top-left
/// corner, y growing downwards, velocity in units per frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    pub radius: f32,
    pub color: Color,
}

/// Axes on which the last integration step reflected the particle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoundaryHits {
    pub x: bool,
    pub y: bool,
}

impl Particle {
    pub fn new(position: Vec2, velocity: Vec2, radius: f32, color: Color) -> Self {
        Self {
            position,
            velocity,
            radius,
            color,
        }
    }

    /// Random particle inside `bounds`. Speed is uniform in `speed_range`, heading
    /// uniform over the full circle. Expects a sanitized config and a non-empty palette.
    pub fn spawn<R: Rng + ?Sized>(
        rng: &mut R,
        bounds: Vec2,
        cfg: &FieldConfig,
        palette: &[Color],
    ) -> Self {
        let bounds = bounds.max(Vec2::ZERO);
        let position = Vec2::new(rng.gen_range(0.0..=bounds.x), rng.gen_range(0.0..=bounds.y));
        let speed = rng.gen_range(cfg.speed_range.min..=cfg.speed_range.max);
        let heading = rng.gen_range(0.0..TAU);
        let radius = rng.gen_range(cfg.size_range.min..=cfg.size_range.max);
        let color = palette.choose(rng).copied().unwrap_or(Color::WHITE);
        Self::new(position, Vec2::from_angle(heading) * speed, radius, color)
    }

    /// Advances one frame and keeps the particle inside `[0, bounds]`.
    ///
    /// A velocity component is only flipped while it still points outwards, so a
    /// crossing reflects exactly once even if the particle lingers past the edge
    /// (e.g. right after the surface shrank).
    pub fn integrate(&mut self, bounds: Vec2) -> BoundaryHits {
        let bounds = bounds.max(Vec2::ZERO);
        self.position += self.velocity;
        let mut hits = BoundaryHits::default();
        if (self.position.x < 0.0 && self.velocity.x < 0.0)
            || (self.position.x > bounds.x && self.velocity.x > 0.0)
        {
            self.velocity.x = -self.velocity.x;
            hits.x = true;
        }
        if (self.position.y < 0.0 && self.velocity.y < 0.0)
            || (self.position.y > bounds.y && self.velocity.y > 0.0)
        {
            self.velocity.y = -self.velocity.y;
            hits.y = true;
        }
        self.position = self.position.clamp(Vec2::ZERO, bounds);
        hits
    }
}
