#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Analytics system that folds session events into a serialisable report.

use maze_crawler_core::{Event, ModifierCategory, ModifierOutcome, SessionOutcome};
use serde::{Deserialize, Serialize};

/// Summary of a finished (or interrupted) session.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionReport {
    /// How the session ended, if it did.
    pub outcome: Option<SessionOutcome>,
    /// Final score.
    pub score: u32,
    /// Final sensing radius.
    pub sensing_radius: u8,
    /// Final step size.
    pub step_size: u8,
    /// Number of positions on the computed route.
    pub route_length: usize,
    /// Number of route positions that were replayed.
    pub replayed_steps: u32,
    /// Number of interactive moves accepted.
    pub accepted_moves: u32,
    /// Number of interactive moves rejected.
    pub rejected_moves: u32,
    /// Number of input tokens that mapped to no command.
    pub unrecognized_commands: u32,
    /// Number of booster cells entered.
    pub boosters: u32,
    /// Number of hurdle cells entered.
    pub hurdles: u32,
    /// Number of neutral cells entered.
    pub neutral_steps: u32,
}

/// Pure analytics system accumulating a [`SessionReport`].
#[derive(Debug)]
pub struct Analytics {
    report: SessionReport,
}

impl Analytics {
    /// Creates an analytics system for a route of the provided length.
    #[must_use]
    pub fn new(route_length: usize) -> Self {
        Self {
            report: SessionReport {
                sensing_radius: maze_crawler_core::MIN_MODIFIER,
                step_size: maze_crawler_core::MIN_MODIFIER,
                route_length,
                ..SessionReport::default()
            },
        }
    }

    /// Consumes a batch of session events.
    pub fn handle(&mut self, events: &[Event]) {
        for event in events {
            match event {
                Event::RouteStepReplayed { outcome, .. } => {
                    self.report.replayed_steps += 1;
                    self.record(outcome);
                }
                Event::AgentMoved { outcome, .. } => {
                    self.report.accepted_moves += 1;
                    self.record(outcome);
                }
                Event::MoveRejected { .. } => self.report.rejected_moves += 1,
                Event::CommandUnrecognized { .. } => self.report.unrecognized_commands += 1,
                Event::Finished { outcome, score } => {
                    self.report.outcome = Some(*outcome);
                    self.report.score = *score;
                }
                Event::PhaseChanged { .. } => {}
            }
        }
    }

    /// Report accumulated so far.
    #[must_use]
    pub fn report(&self) -> &SessionReport {
        &self.report
    }

    /// Consumes the system, yielding the report.
    #[must_use]
    pub fn into_report(self) -> SessionReport {
        self.report
    }

    fn record(&mut self, outcome: &ModifierOutcome) {
        match outcome.effect.category() {
            ModifierCategory::Booster => self.report.boosters += 1,
            ModifierCategory::Hurdle => self.report.hurdles += 1,
            ModifierCategory::Neutral => self.report.neutral_steps += 1,
        }
        self.report.score = outcome.state.score();
        self.report.sensing_radius = outcome.state.sensing_radius();
        self.report.step_size = outcome.state.step_size();
    }
}
