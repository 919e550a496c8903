//! Host discovery and field lifecycle: which regions get a field, with what
//! configuration, and how fields are torn down.
pub mod lifecycle;
pub mod motion;
pub mod registry;

pub use lifecycle::{teardown_field, HostLifecyclePlugin};
pub use motion::{MotionPreference, MotionSource, REDUCED_MOTION_ENV};
pub use registry::{HostCapabilities, HostEntry, HostRegistry, HostState};
