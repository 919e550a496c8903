pub mod palette;

pub use palette::{
    parse_hex, resolve_or, resolve_palette, DEFAULT_CONNECTION_COLOR, DEFAULT_PALETTE,
    DEFAULT_POINTER_COLOR,
};
