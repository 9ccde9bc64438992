//! Outside-world hooks the game core is handed instead of reaching for globals.

use log::info;
use rand::Rng;

pub trait RandomSource {
    /// Uniform draw from `0..bound`. `bound` is never zero.
    fn index(&mut self, bound: u16) -> u16;
}

impl<R: Rng> RandomSource for R {
    fn index(&mut self, bound: u16) -> u16 {
        self.gen_range(0..bound)
    }
}

/// Surfaces one-line messages to the player.
pub trait Notifier {
    fn notify(&mut self, message: &str);
}

/// Keeps the most recent message for the status line.
#[derive(Debug, Default)]
pub struct StatusLine {
    message: Option<String>,
}

impl StatusLine {
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn clear(&mut self) {
        self.message = None;
    }
}

impl Notifier for StatusLine {
    fn notify(&mut self, message: &str) {
        info!("Notify: {}", message);
        self.message = Some(message.to_string());
    }
}
