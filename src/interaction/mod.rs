//! Signal delivery into fields: pointer, resize and the explicit subscriptions
//! that gate them, plus session-level helpers.
pub mod frame;
pub mod pointer;
pub mod resize;
pub mod session;
pub mod subscription;

pub use frame::{FieldFramePlugin, FieldFrameStats};
pub use pointer::PointerSignalsPlugin;
pub use resize::ResizeSignalsPlugin;
pub use subscription::{FieldSubscriptions, Signal, Subscription};
