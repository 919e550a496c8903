//! Drawing surface abstraction. A field renders into a `DrawSurface`; the
//! default surface is a `DisplayList` that records the frame so it can be
//! replayed by the gizmo presenter (or inspected by tests).
use bevy::prelude::*;

/// Which stroke a line uses. The presenter maps each kind to its own gizmo group
/// (and therefore its own configured line width).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineKind {
    /// Particle to particle.
    Connection,
    /// Particle to pointer.
    Pointer,
}

pub trait DrawSurface {
    /// Resynchronise the raster size (surface-local units).
    fn resize(&mut self, size: Vec2);
    fn size(&self) -> Vec2;
    fn clear(&mut self);
    fn line(&mut self, from: Vec2, to: Vec2, color: Color, kind: LineKind);
    /// Filled circle with a soft glow `glow` units wide in the same color.
    fn disc(&mut self, center: Vec2, radius: f32, color: Color, glow: f32);
    /// Radial gradient from `color` at the center to transparent at `radius`.
    fn halo(&mut self, center: Vec2, radius: f32, color: Color);
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Line {
        from: Vec2,
        to: Vec2,
        color: Color,
        kind: LineKind,
    },
    Disc {
        center: Vec2,
        radius: f32,
        color: Color,
        glow: f32,
    },
    Halo {
        center: Vec2,
        radius: f32,
        color: Color,
    },
}

#[derive(Debug, Clone, Default)]
pub struct DisplayList {
    size: Vec2,
    commands: Vec<DrawCommand>,
    revision: u64,
}

impl DisplayList {
    pub fn new(size: Vec2) -> Self {
        Self {
            size,
            ..default()
        }
    }
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }
    /// Bumped on every mutation; a stable revision means nothing was drawn.
    pub fn revision(&self) -> u64 {
        self.revision
    }
    pub fn lines(&self, kind: LineKind) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(move |c| matches!(c, DrawCommand::Line { kind: k, .. } if *k == kind))
    }
    pub fn discs(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Disc { .. }))
    }
    fn push(&mut self, cmd: DrawCommand) {
        self.commands.push(cmd);
        self.revision += 1;
    }
}

impl DrawSurface for DisplayList {
    fn resize(&mut self, size: Vec2) {
        self.size = size;
        self.revision += 1;
    }
    fn size(&self) -> Vec2 {
        self.size
    }
    fn clear(&mut self) {
        self.commands.clear();
        self.revision += 1;
    }
    fn line(&mut self, from: Vec2, to: Vec2, color: Color, kind: LineKind) {
        self.push(DrawCommand::Line {
            from,
            to,
            color,
            kind,
        });
    }
    fn disc(&mut self, center: Vec2, radius: f32, color: Color, glow: f32) {
        self.push(DrawCommand::Disc {
            center,
            radius,
            color,
            glow,
        });
    }
    fn halo(&mut self, center: Vec2, radius: f32, color: Color) {
        self.push(DrawCommand::Halo {
            center,
            radius,
            color,
        });
    }
}
