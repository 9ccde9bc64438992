mod canvas;
mod ui;

pub use canvas::{BoardView, BufferCanvas, Canvas, Fill, Renderer};
pub use ui::draw;
