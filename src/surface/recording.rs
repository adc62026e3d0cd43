//! In-memory surface that records every command instead of drawing.
//!
//! Signals can be scripted per poll, which lets tests and benchmarks drive
//! the animation loop without a window.

use std::{collections::VecDeque, time::Duration};

use glam::IVec2;

use super::{DisplaySurface, Rgba, Signals};
use crate::error::Result;

/// One recorded surface call.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// `clear(color)`
    Clear(Rgba),
    /// `draw_polyline(points, color)`
    Polyline {
        /// Points in submission order.
        points: Vec<IVec2>,
        /// Stroke color.
        color: Rgba,
    },
    /// `present()`
    Present,
    /// `sleep(duration)`
    Sleep(Duration),
}

/// A [`DisplaySurface`] that keeps a log of commands.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    commands: Vec<Command>,
    scripted: VecDeque<Signals>,
    polls: usize,
    keep_points: bool,
}

impl RecordingSurface {
    /// Surface that records commands including full point lists.
    #[must_use]
    pub fn new() -> Self {
        Self {
            keep_points: true,
            ..Self::default()
        }
    }

    /// Surface that records polylines without copying their points.
    #[must_use]
    pub fn discarding_points() -> Self {
        Self::default()
    }

    /// Queue the result of a future poll. Polls beyond the script return
    /// no signals.
    #[must_use]
    pub fn with_signals(mut self, signals: Signals) -> Self {
        self.scripted.push_back(signals);
        self
    }

    /// Everything recorded so far.
    #[must_use]
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// How many times the driver polled for signals.
    #[must_use]
    pub fn polls(&self) -> usize {
        self.polls
    }

    /// Number of `present()` calls.
    #[must_use]
    pub fn frames_presented(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, Command::Present))
            .count()
    }

    /// Drop the log, keeping the remaining signal script.
    pub fn clear_log(&mut self) {
        self.commands.clear();
    }
}

impl DisplaySurface for RecordingSurface {
    fn poll_signals(&mut self) -> Signals {
        self.polls += 1;
        self.scripted.pop_front().unwrap_or_default()
    }

    fn clear(&mut self, color: Rgba) {
        self.commands.push(Command::Clear(color));
    }

    fn draw_polyline(&mut self, points: &[IVec2], color: Rgba) {
        let points = if self.keep_points {
            points.to_vec()
        } else {
            Vec::new()
        };
        self.commands.push(Command::Polyline { points, color });
    }

    fn present(&mut self) -> Result<()> {
        self.commands.push(Command::Present);
        Ok(())
    }

    fn sleep(&mut self, duration: Duration) {
        self.commands.push(Command::Sleep(duration));
    }
}
