//! Bootstrap lifecycle: `Uninitialized → Loading → Ready | Failed`.
//!
//! `Ready` and `Failed` are terminal; there is no reload or teardown path.

use crate::error::{BootstrapError, BootstrapResult};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    #[default]
    Uninitialized,
    Loading,
    Ready,
    Failed,
}

impl Phase {
    pub fn is_terminal(self) -> bool {
        matches!(self, Phase::Ready | Phase::Failed)
    }

    fn can_move_to(self, next: Phase) -> bool {
        matches!(
            (self, next),
            (Phase::Uninitialized, Phase::Loading)
                | (Phase::Loading, Phase::Ready)
                | (Phase::Loading, Phase::Failed)
        )
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Phase::Uninitialized => "uninitialized",
            Phase::Loading => "loading",
            Phase::Ready => "ready",
            Phase::Failed => "failed",
        })
    }
}

/// Current phase plus the error that ended the sequence, if any.
#[derive(Debug, Default)]
pub struct Lifecycle {
    phase: Phase,
    failure: Option<BootstrapError>,
}

impl Lifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn failure(&self) -> Option<&BootstrapError> {
        self.failure.as_ref()
    }

    pub fn begin_loading(&mut self) -> BootstrapResult<()> {
        self.advance(Phase::Loading)
    }

    pub fn mark_ready(&mut self) -> BootstrapResult<()> {
        self.advance(Phase::Ready)
    }

    pub fn mark_failed(&mut self, error: BootstrapError) -> BootstrapResult<()> {
        self.advance(Phase::Failed)?;
        self.failure = Some(error);
        Ok(())
    }

    fn advance(&mut self, next: Phase) -> BootstrapResult<()> {
        if !self.phase.can_move_to(next) {
            return Err(BootstrapError::InvalidTransition {
                from: self.phase,
                to: next,
            });
        }
        log::debug!("bootstrap: {} -> {}", self.phase, next);
        self.phase = next;
        Ok(())
    }
}
