use bevy::prelude::*;

use crate::core::config::FieldConfig;

/// External signal sources a field listens to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signal {
    Frame,
    PointerMove,
    PointerLeave,
    Resize,
}

/// One listener registration. Disposing it stops delivery of its signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subscription {
    signal: Signal,
    active: bool,
}
impl Subscription {
    pub fn new(signal: Signal) -> Self {
        Self {
            signal,
            active: true,
        }
    }
    pub fn signal(&self) -> Signal {
        self.signal
    }
    pub fn is_active(&self) -> bool {
        self.active
    }
    /// Returns `true` if this call actually disposed it.
    pub fn dispose(&mut self) -> bool {
        std::mem::replace(&mut self.active, false)
    }
}

/// Everything a field subscribed to when it was built. Signal delivery systems
/// consult it; teardown disposes all of it in one go.
#[derive(Component, Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSubscriptions {
    subs: Vec<Subscription>,
}
impl FieldSubscriptions {
    pub fn for_config(cfg: &FieldConfig) -> Self {
        let mut subs = vec![Subscription::new(Signal::Frame), Subscription::new(Signal::Resize)];
        if cfg.pointer_enabled {
            subs.push(Subscription::new(Signal::PointerMove));
            subs.push(Subscription::new(Signal::PointerLeave));
        }
        Self { subs }
    }
    pub fn is_subscribed(&self, signal: Signal) -> bool {
        self.subs.iter().any(|s| s.signal == signal && s.active)
    }
    /// Disposes every subscription to `signal`; returns how many were live.
    pub fn dispose(&mut self, signal: Signal) -> usize {
        self.subs
            .iter_mut()
            .filter(|s| s.signal == signal)
            .map(Subscription::dispose)
            .filter(|&disposed| disposed)
            .count()
    }
    /// Disposes everything; returns how many were live. Order does not matter.
    pub fn dispose_all(&mut self) -> usize {
        self.subs
            .iter_mut()
            .map(Subscription::dispose)
            .filter(|&disposed| disposed)
            .count()
    }
    pub fn active_count(&self) -> usize {
        self.subs.iter().filter(|s| s.active).count()
    }
    pub fn iter(&self) -> impl Iterator<Item = &Subscription> {
        self.subs.iter()
    }
}
