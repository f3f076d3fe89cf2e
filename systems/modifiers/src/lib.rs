#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Modifier system that folds entered cells into the traversal state.

use maze_crawler_core::{
    Booster, CellClass, Hurdle, ModifierEffect, ModifierOutcome, TraversalState,
};

/// Stateful evaluator holding the session's traversal parameters.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ModifierEngine {
    state: TraversalState,
}

impl ModifierEngine {
    /// Creates an engine starting from the provided state.
    #[must_use]
    pub const fn with_state(state: TraversalState) -> Self {
        Self { state }
    }

    /// Current traversal parameters and score.
    #[must_use]
    pub const fn state(&self) -> TraversalState {
        self.state
    }

    /// Applies the cell that was just entered and stores the resulting state.
    pub fn apply(&mut self, cell: CellClass) -> ModifierOutcome {
        let outcome = evaluate(self.state, cell);
        self.state = outcome.state;
        outcome
    }
}

/// Computes the state that results from entering `cell` in `state`.
///
/// Boosters and hurdles adjust one modifier within its bounds and leave the
/// score alone. Neutral cells add one to the score.
#[must_use]
pub fn evaluate(state: TraversalState, cell: CellClass) -> ModifierOutcome {
    let radius = state.sensing_radius();
    let step = state.step_size();
    let score = state.score();

    let (state, effect) = match cell {
        CellClass::Booster(Booster::Perception) => (
            TraversalState::new(radius.saturating_add(1), step, score),
            ModifierEffect::PerceptionBoosted,
        ),
        CellClass::Booster(Booster::Speed) => (
            TraversalState::new(radius, step.saturating_add(1), score),
            ModifierEffect::SpeedBoosted,
        ),
        CellClass::Booster(Booster::Other(code)) => {
            (state, ModifierEffect::UnclassifiedBooster(code))
        }
        // Never entered by a valid step; the positive code carries no effect.
        CellClass::Wall => (state, ModifierEffect::UnclassifiedBooster(cell.code())),
        CellClass::Hurdle(Hurdle::Fog) => (
            TraversalState::new(radius.saturating_sub(1), step, score),
            ModifierEffect::Fogged,
        ),
        CellClass::Hurdle(Hurdle::Slowdown) => (
            TraversalState::new(radius, step.saturating_sub(1), score),
            ModifierEffect::Slowed,
        ),
        CellClass::Hurdle(Hurdle::Other(code)) => {
            (state, ModifierEffect::UnclassifiedHurdle(code))
        }
        CellClass::Empty | CellClass::Start | CellClass::Goal | CellClass::Trail => (
            TraversalState::new(radius, step, score.saturating_add(1)),
            ModifierEffect::Neutral,
        ),
    };

    ModifierOutcome { state, effect }
}
