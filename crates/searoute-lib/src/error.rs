use thiserror::Error;

use crate::grid::Cell;

/// Convenient result alias for the searoute library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when grid dimensions, construction specs, or a vessel profile
    /// are malformed. Rejected before any search runs.
    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    /// Raised when a requested start or goal cell lies outside the grid or on
    /// a cell that cannot be navigated.
    #[error("cell {cell} is outside the grid or not navigable")]
    OutOfBounds { cell: Cell },

    /// Raised when the search space was exhausted without reaching the goal:
    /// the two endpoints are disconnected.
    #[error("no route found between {start} and {goal}")]
    NoPathFound { start: Cell, goal: Cell },

    /// Raised when a search gave up after hitting its expansion budget.
    ///
    /// Distinct from [`Error::NoPathFound`] so callers can tell a provably
    /// disconnected pair from a search that ran out of budget.
    #[error("search budget exhausted after {expanded} expansions between {start} and {goal}")]
    BudgetExceeded {
        start: Cell,
        goal: Cell,
        expanded: usize,
    },
}
