// This file is part of particle_field.
// Copyright (C) 2025 Adam and contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use bevy::prelude::*;

use crate::core::config::{report_config_issues, FieldAppConfig};
use crate::core::system::{FieldFrameSet, FieldPresentSet, FieldSignalSet};
use crate::debug::DebugPlugin;
use crate::host::HostLifecyclePlugin;
use crate::interaction::session::{AutoClosePlugin, ConfigHotReloadPlugin};
use crate::interaction::{FieldFramePlugin, PointerSignalsPlugin, ResizeSignalsPlugin};
use crate::rendering::{CameraPlugin, FieldPresentPlugin};

/// Everything needed to run particle fields on `ParticlesHost` entities.
///
/// `present` adds the camera and gizmo presenter (needs the render plugins);
/// `hot_reload` polls the RON config layers on native targets.
pub struct ParticleFieldPlugin {
    pub present: bool,
    pub hot_reload: bool,
}

impl Default for ParticleFieldPlugin {
    fn default() -> Self {
        Self {
            present: true,
            hot_reload: true,
        }
    }
}

impl ParticleFieldPlugin {
    /// Simulation only: no camera, no gizmos, no file polling.
    pub fn headless() -> Self {
        Self {
            present: false,
            hot_reload: false,
        }
    }
}

impl Plugin for ParticleFieldPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<FieldAppConfig>()
            .configure_sets(
                Update,
                (FieldSignalSet, FieldFrameSet, FieldPresentSet).chain(),
            )
            .add_systems(Startup, report_config_issues)
            .add_plugins((
                HostLifecyclePlugin,
                PointerSignalsPlugin,
                ResizeSignalsPlugin,
                FieldFramePlugin,
                AutoClosePlugin,
                DebugPlugin,
            ));
        if self.present {
            app.add_plugins((CameraPlugin, FieldPresentPlugin));
        }
        if self.hot_reload {
            app.add_plugins(ConfigHotReloadPlugin);
        }
    }
}
