pub mod camera;
pub mod palette;
pub mod present;
pub mod surface;

pub use camera::CameraPlugin;
pub use present::FieldPresentPlugin;
pub use surface::{DisplayList, DrawCommand, DrawSurface, LineKind};
