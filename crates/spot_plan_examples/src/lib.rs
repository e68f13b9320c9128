#![forbid(unsafe_code)]

mod rendering;

pub use rendering::{init_tracing, render_spots_to_png, RenderConfig};
