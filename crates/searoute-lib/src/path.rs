//! Shared best-first search skeleton and the single-frontier strategies.
//!
//! Every grid strategy runs the same frontier loop: pop the lowest-key cell,
//! stop when the goal is popped, otherwise relax its navigable neighbours.
//! Strategies supply only their edge-weight and heuristic functions, so the
//! four single-frontier variants cannot drift apart. Priority ties break in
//! insertion order, which makes path selection reproducible across runs with
//! identical inputs.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use crate::cost::CostModel;
use crate::grid::{Cell, Grid};

/// Expansion cap guarding against runaway searches on pathological inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchBudget {
    pub max_expansions: usize,
}

impl Default for SearchBudget {
    fn default() -> Self {
        // Generous for the grid sizes the engine targets (hundreds per side).
        Self {
            max_expansions: 500_000,
        }
    }
}

/// Successful search output.
#[derive(Debug, Clone)]
pub struct PathFound {
    /// Ordered cells from start to goal.
    pub cells: Vec<Cell>,
    /// Accumulated priority key at the goal: the strategy-internal scalar.
    pub total_cost: f64,
    /// Number of frontier expansions performed.
    pub nodes_explored: usize,
}

/// Terminal states of a search run.
#[derive(Debug, Clone)]
pub enum SearchOutcome {
    Found(PathFound),
    /// The frontier ran dry: the endpoints are disconnected.
    FrontierExhausted { nodes_explored: usize },
    /// The expansion budget tripped before either terminal state.
    BudgetExceeded { nodes_explored: usize },
}

/// Dijkstra over the distance objective: no heuristic, optimal for distance.
pub fn find_route_dijkstra(
    grid: &Grid,
    model: &CostModel<'_>,
    start: Cell,
    goal: Cell,
    budget: SearchBudget,
) -> SearchOutcome {
    best_first_search(
        grid,
        start,
        goal,
        budget,
        |from, to| model.edge_cost(from, to).distance_km,
        |_| 0.0,
    )
}

/// A* over the distance objective with the Euclidean heuristic. The
/// heuristic never overestimates remaining distance, so the result matches
/// Dijkstra's while expanding fewer cells.
pub fn find_route_a_star(
    grid: &Grid,
    model: &CostModel<'_>,
    start: Cell,
    goal: Cell,
    budget: SearchBudget,
) -> SearchOutcome {
    best_first_search(
        grid,
        start,
        goal,
        budget,
        |from, to| model.edge_cost(from, to).distance_km,
        |cell| model.heuristic_km(cell, goal),
    )
}

/// A* over the weather-adjusted distance objective.
///
/// The heuristic stays the plain Euclidean distance. Favorable weather can
/// drive the multiplier below one, in which case the heuristic overestimates
/// and the route is near-optimal rather than guaranteed optimal; the strategy
/// trades that corner case for fast routing through typical (multiplier ≥ 1)
/// conditions.
pub fn find_route_weather_aware(
    grid: &Grid,
    model: &CostModel<'_>,
    start: Cell,
    goal: Cell,
    budget: SearchBudget,
) -> SearchOutcome {
    best_first_search(
        grid,
        start,
        goal,
        budget,
        |from, to| model.weather_adjusted_distance_km(from, to),
        |cell| model.heuristic_km(cell, goal),
    )
}

/// Uninformed search over the fuel objective. Fuel burn along unexplored
/// cells depends on weather that has not been sampled yet, so no cheap
/// admissible fuel heuristic exists; the zero heuristic keeps the result
/// exact for its objective.
pub fn find_route_fuel_optimized(
    grid: &Grid,
    model: &CostModel<'_>,
    start: Cell,
    goal: Cell,
    budget: SearchBudget,
) -> SearchOutcome {
    best_first_search(
        grid,
        start,
        goal,
        budget,
        |from, to| model.edge_cost(from, to).fuel_tons,
        |_| 0.0,
    )
}

/// Generic best-first loop shared by every single-frontier strategy.
pub(crate) fn best_first_search<W, H>(
    grid: &Grid,
    start: Cell,
    goal: Cell,
    budget: SearchBudget,
    edge_weight: W,
    heuristic: H,
) -> SearchOutcome
where
    W: Fn(Cell, Cell) -> f64,
    H: Fn(Cell) -> f64,
{
    if start == goal {
        return SearchOutcome::Found(PathFound {
            cells: vec![start],
            total_cost: 0.0,
            nodes_explored: 0,
        });
    }

    let mut g_score: HashMap<Cell, f64> = HashMap::new();
    let mut parents: HashMap<Cell, Option<Cell>> = HashMap::new();
    let mut queue = BinaryHeap::new();
    let mut sequence = 0u64;
    let mut nodes_explored = 0usize;

    g_score.insert(start, 0.0);
    parents.insert(start, None);
    queue.push(QueueEntry::new(start, 0.0, heuristic(start), sequence));

    while let Some(entry) = queue.pop() {
        let current_score = match g_score.get(&entry.cell) {
            Some(score) if entry.cost.0 > *score => continue, // stale entry
            Some(score) => *score,
            None => continue,
        };

        if entry.cell == goal {
            return SearchOutcome::Found(PathFound {
                cells: reconstruct_path(&parents, start, goal),
                total_cost: current_score,
                nodes_explored,
            });
        }

        nodes_explored += 1;
        if nodes_explored > budget.max_expansions {
            return SearchOutcome::BudgetExceeded { nodes_explored };
        }

        for next in grid.neighbors(entry.cell) {
            let tentative = current_score + edge_weight(entry.cell, next);
            if tentative < g_score.get(&next).copied().unwrap_or(f64::INFINITY) {
                g_score.insert(next, tentative);
                parents.insert(next, Some(entry.cell));
                sequence += 1;
                queue.push(QueueEntry::new(next, tentative, heuristic(next), sequence));
            }
        }
    }

    SearchOutcome::FrontierExhausted { nodes_explored }
}

pub(crate) fn reconstruct_path(
    parents: &HashMap<Cell, Option<Cell>>,
    start: Cell,
    goal: Cell,
) -> Vec<Cell> {
    let mut path = Vec::new();
    let mut current = Some(goal);
    while let Some(cell) = current {
        path.push(cell);
        if cell == start {
            break;
        }
        current = parents.get(&cell).copied().flatten();
    }
    path.reverse();
    path
}

#[derive(Copy, Clone, Debug, Default)]
pub(crate) struct FloatOrd(pub(crate) f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq(&other.0)
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct QueueEntry {
    pub(crate) cell: Cell,
    pub(crate) cost: FloatOrd,
    pub(crate) estimate: FloatOrd,
    pub(crate) sequence: u64,
}

impl QueueEntry {
    pub(crate) fn new(cell: Cell, cost: f64, heuristic: f64, sequence: u64) -> Self {
        Self {
            cell,
            cost: FloatOrd(cost),
            estimate: FloatOrd(cost + heuristic),
            sequence,
        }
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by estimate;
        // equal estimates pop in insertion order.
        other
            .estimate
            .cmp(&self.estimate)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
