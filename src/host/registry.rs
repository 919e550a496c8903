use bevy::prelude::*;
use std::collections::HashMap;

use crate::core::components::FieldOverrides;
use crate::core::config::{FieldAppConfig, FieldConfig};

/// What a discovered host is allowed to do, resolved once at registration.
#[derive(Debug, Clone, PartialEq)]
pub struct HostCapabilities {
    pub config: FieldConfig,
    /// Built with the compact profile (narrow window at activation).
    pub compact: bool,
}
impl HostCapabilities {
    pub fn resolve(
        app_cfg: &FieldAppConfig,
        overrides: Option<&FieldOverrides>,
        window_width: f32,
    ) -> Self {
        let compact = app_cfg.compact.applies_to(window_width);
        let base = if compact {
            app_cfg.compact.apply(&app_cfg.field)
        } else {
            app_cfg.field.clone()
        };
        let config = match overrides {
            Some(o) => o.apply(&base),
            None => base,
        };
        Self {
            config: config.sanitized(),
            compact,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostState {
    Active,
    /// Torn down; never reactivated.
    Retired,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HostEntry {
    pub capabilities: HostCapabilities,
    pub state: HostState,
}

/// Typed registry of discovered hosts. Behaviour is decided from the entry, never
/// by re-querying marker components.
#[derive(Resource, Debug, Default)]
pub struct HostRegistry {
    entries: HashMap<Entity, HostEntry>,
}

impl HostRegistry {
    /// Registers `host` as active. Returns `None` if it was already known
    /// (active or retired), leaving the existing entry untouched.
    pub fn register(&mut self, host: Entity, capabilities: HostCapabilities) -> Option<&HostEntry> {
        if self.entries.contains_key(&host) {
            return None;
        }
        let entry = self.entries.entry(host).or_insert(HostEntry {
            capabilities,
            state: HostState::Active,
        });
        Some(entry)
    }
    pub fn get(&self, host: Entity) -> Option<&HostEntry> {
        self.entries.get(&host)
    }
    pub fn contains(&self, host: Entity) -> bool {
        self.entries.contains_key(&host)
    }
    /// Marks `host` retired. Returns `true` only on the active -> retired transition.
    pub fn retire(&mut self, host: Entity) -> bool {
        match self.entries.get_mut(&host) {
            Some(e) if e.state == HostState::Active => {
                e.state = HostState::Retired;
                true
            }
            _ => false,
        }
    }
    /// Drops every trace of `host` (it stopped being a host, or was despawned).
    pub fn forget(&mut self, host: Entity) -> Option<HostEntry> {
        self.entries.remove(&host)
    }
    pub fn active(&self) -> impl Iterator<Item = (Entity, &HostEntry)> {
        self.entries
            .iter()
            .filter(|(_, e)| e.state == HostState::Active)
            .map(|(k, e)| (*k, e))
    }
    pub fn active_count(&self) -> usize {
        self.active().count()
    }
    pub fn len(&self) -> usize {
        self.entries.len()
    }
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
