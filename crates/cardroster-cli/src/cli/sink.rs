//! Render sink that prints to a terminal (or any writer).

use cardroster_core::roster::UserId;
use cardroster_core::sink::RenderSink;
use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

pub struct TerminalSink<W> {
    out: Mutex<W>,
}

impl TerminalSink<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send + 'static> TerminalSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    fn line(&self, text: std::fmt::Arguments<'_>) {
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        // A closed stdout is not worth failing a session over.
        let _ = writeln!(out, "{}", text);
        let _ = out.flush();
    }
}

impl<W: Write + Send + 'static> RenderSink for TerminalSink<W> {
    fn on_user_changed(&self, user: UserId) {
        self.line(format_args!("== User {} ==", user));
    }

    fn on_player_name(&self, name: &str) {
        self.line(format_args!("Player: {}", name));
    }

    fn on_card_resolved(&self, display_name: &str, image_url: &str) {
        self.line(format_args!("  * {}  <{}>", display_name, image_url));
    }

    fn on_clear_all(&self) {
        self.line(format_args!(""));
    }

    fn on_error(&self, message: &str) {
        self.line(format_args!("  ! {}", message));
    }
}
