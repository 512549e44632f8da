//! First-class invariants over grid transitions.
//!
//! Each invariant compares the grid before and after a successful
//! move. They are checked in debug builds by the session and can be
//! tested on their own.

use super::Grid;
use tracing::warn;

/// A property that must hold between two snapshots of one grid.
pub trait TransitionInvariant {
    /// Checks if the invariant holds for the transition `before -> after`.
    fn holds(before: &Grid, after: &Grid) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
pub trait InvariantSet {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(before: &Grid, after: &Grid) -> Result<(), Vec<InvariantViolation>>;
}

impl<I1, I2> InvariantSet for (I1, I2)
where
    I1: TransitionInvariant,
    I2: TransitionInvariant,
{
    fn check_all(before: &Grid, after: &Grid) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();

        if !I1::holds(before, after) {
            violations.push(InvariantViolation::new(I1::description()));
        }

        if !I2::holds(before, after) {
            violations.push(InvariantViolation::new(I2::description()));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// Cells only ever go from empty to marked, and never change once marked.
pub struct MonotonicGrid;

impl TransitionInvariant for MonotonicGrid {
    fn holds(before: &Grid, after: &Grid) -> bool {
        if before.rows() != after.rows() || before.cols() != after.cols() {
            warn!("Grid dimensions changed between snapshots");
            return false;
        }

        before
            .cells()
            .iter()
            .zip(after.cells())
            .all(|(old, new)| old.is_empty() || old == new)
    }

    fn description() -> &'static str {
        "Grid cells are monotonic (never cleared or overwritten)"
    }
}

/// A successful move changes exactly one cell.
pub struct SingleMarkPlaced;

impl TransitionInvariant for SingleMarkPlaced {
    fn holds(before: &Grid, after: &Grid) -> bool {
        if before.len() != after.len() {
            return false;
        }

        let changed = before
            .cells()
            .iter()
            .zip(after.cells())
            .filter(|(old, new)| old != new)
            .count();
        changed == 1
    }

    fn description() -> &'static str {
        "Exactly one cell changes per move"
    }
}

/// Invariants checked after every successful move.
pub type MoveInvariants = (MonotonicGrid, SingleMarkPlaced);
