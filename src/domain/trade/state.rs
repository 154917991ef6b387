//! Per-attempt state machine for a trade submission.

use serde::{Deserialize, Serialize};

/// Phase of one trade attempt.
///
/// `Idle → Building → Signing → Submitting → Succeeded`, with `Failed`
/// reachable from each of the three working phases. Terminal phases never
/// transition again; a retry is a new [`TradeAttempt`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttemptPhase {
    Idle,
    Building,
    Signing,
    Submitting,
    Succeeded,
    Failed,
}

impl AttemptPhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }

    fn can_advance_to(&self, next: AttemptPhase) -> bool {
        use AttemptPhase::*;
        matches!(
            (self, next),
            (Idle, Building)
                | (Building, Signing)
                | (Signing, Submitting)
                | (Submitting, Succeeded)
                | (Building, Failed)
                | (Signing, Failed)
                | (Submitting, Failed)
        )
    }
}

impl std::fmt::Display for AttemptPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Idle => "idle",
            Self::Building => "building",
            Self::Signing => "signing",
            Self::Submitting => "submitting",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
        };
        write!(f, "{}", s)
    }
}

/// Rejected phase change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("illegal attempt transition {from} -> {to}")]
pub struct IllegalTransition {
    pub from: AttemptPhase,
    pub to: AttemptPhase,
}

/// Tracks the phases one trade attempt has passed through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TradeAttempt {
    history: Vec<AttemptPhase>,
    failed_in: Option<AttemptPhase>,
}

impl Default for TradeAttempt {
    fn default() -> Self {
        Self::new()
    }
}

impl TradeAttempt {
    pub fn new() -> Self {
        Self {
            history: vec![AttemptPhase::Idle],
            failed_in: None,
        }
    }

    pub fn phase(&self) -> AttemptPhase {
        // history always holds at least Idle
        self.history
            .last()
            .copied()
            .unwrap_or(AttemptPhase::Idle)
    }

    pub fn history(&self) -> &[AttemptPhase] {
        &self.history
    }

    /// The working phase an attempt was in when it failed.
    pub fn failed_in(&self) -> Option<AttemptPhase> {
        self.failed_in
    }

    pub fn advance(&mut self, next: AttemptPhase) -> Result<(), IllegalTransition> {
        let current = self.phase();
        if !current.can_advance_to(next) {
            return Err(IllegalTransition {
                from: current,
                to: next,
            });
        }
        if next == AttemptPhase::Failed {
            self.failed_in = Some(current);
        }
        self.history.push(next);
        tracing::trace!(from = %current, to = %next, "trade attempt transition");
        Ok(())
    }

    pub fn fail(&mut self) -> Result<(), IllegalTransition> {
        self.advance(AttemptPhase::Failed)
    }
}
