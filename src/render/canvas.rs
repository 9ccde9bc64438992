use ratatui::{buffer::Buffer, layout::Rect, style::Color, widgets::Widget};

use crate::config::RenderConfig;
use crate::game::Board;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fill {
    Snake,
    Food,
}

/// Minimal 2D drawing surface measured in canvas units.
pub trait Canvas {
    fn size(&self) -> (u16, u16);
    fn clear_rect(&mut self, x: u16, y: u16, width: u16, height: u16);
    fn fill_rect(&mut self, x: u16, y: u16, width: u16, height: u16, fill: Fill);
}

/// Draws a board as grid-aligned squares. Never touches game state.
#[derive(Clone, Copy, Debug)]
pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    pub fn new(config: RenderConfig) -> Self {
        Renderer { config }
    }

    pub fn draw(&self, canvas: &mut impl Canvas, board: &Board) {
        let (width, height) = canvas.size();
        canvas.clear_rect(0, 0, width, height);

        let cell = self.config.cell_size;
        for segment in board.snake().segments() {
            let (x, y) = (segment.x as u16 * cell, segment.y as u16 * cell);
            let size = self.config.snake_size;
            canvas.fill_rect(x, y, size, size, Fill::Snake);
        }

        if let Some(food) = board.food() {
            let (x, y) = (food.x as u16 * cell, food.y as u16 * cell);
            let size = self.config.food_size;
            canvas.fill_rect(x, y, size, size, Fill::Food);
        }
    }
}

/// Terminal canvas: one unit is two columns wide and one row tall,
/// which keeps cells roughly square.
pub struct BufferCanvas<'a> {
    buf: &'a mut Buffer,
    area: Rect,
}

impl<'a> BufferCanvas<'a> {
    pub fn new(buf: &'a mut Buffer, area: Rect) -> Self {
        BufferCanvas { buf, area }
    }

    fn for_each_unit(
        &mut self,
        x: u16,
        y: u16,
        width: u16,
        height: u16,
        mut paint: impl FnMut(&mut ratatui::buffer::Cell),
    ) {
        let (canvas_width, canvas_height) = self.size();
        let x_end = x.saturating_add(width).min(canvas_width);
        let y_end = y.saturating_add(height).min(canvas_height);

        for unit_y in y..y_end {
            for unit_x in x..x_end {
                for column in 0..2 {
                    let pos = (self.area.x + unit_x * 2 + column, self.area.y + unit_y);
                    if let Some(cell) = self.buf.cell_mut(pos) {
                        paint(cell);
                    }
                }
            }
        }
    }
}

impl Canvas for BufferCanvas<'_> {
    fn size(&self) -> (u16, u16) {
        (self.area.width / 2, self.area.height)
    }

    fn clear_rect(&mut self, x: u16, y: u16, width: u16, height: u16) {
        self.for_each_unit(x, y, width, height, |cell| {
            cell.reset();
        });
    }

    fn fill_rect(&mut self, x: u16, y: u16, width: u16, height: u16, fill: Fill) {
        self.for_each_unit(x, y, width, height, |cell| match fill {
            Fill::Snake => {
                cell.set_symbol(" ").set_bg(Color::Green);
            }
            Fill::Food => {
                cell.set_symbol("█").set_fg(Color::LightRed);
            }
        });
    }
}

/// Widget adapter so a board can be placed in a ratatui layout.
pub struct BoardView<'a> {
    pub board: &'a Board,
    pub renderer: Renderer,
}

impl Widget for BoardView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut canvas = BufferCanvas::new(buf, area);
        self.renderer.draw(&mut canvas, self.board);
    }
}
