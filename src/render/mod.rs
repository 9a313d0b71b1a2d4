pub mod palette;
pub mod renderer;

pub use palette::{cell_color, contribution_color};
pub use renderer::Renderer;
