use std::fmt;

/// Why a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The frame counter reached the configured interval.
    Completed,
    /// The window was closed.
    QuitRequested,
    /// Escape was pressed.
    EscapePressed,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Completed => write!(f, "interval reached"),
            Self::QuitRequested => write!(f, "quit requested"),
            Self::EscapePressed => write!(f, "escape pressed"),
        }
    }
}

/// Driver lifecycle. `Stopped` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// Frames are still being produced.
    Running,
    /// No further frames will be produced.
    Stopped(StopReason),
}

impl RunState {
    /// `true` while frames are still being produced.
    #[must_use]
    pub fn is_running(self) -> bool {
        matches!(self, Self::Running)
    }
}

/// Outcome of [`AnimationDriver::run`](super::AnimationDriver::run).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Frames fully rendered and presented.
    pub frames: u32,
    /// What ended the run.
    pub reason: StopReason,
}
