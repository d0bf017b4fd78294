//! Bidirectional A* over the distance objective.
//!
//! Two frontiers expand alternately, one from each endpoint. A shared best
//! meeting cost tracks the cheapest start-to-goal total through any cell
//! scored by both sides, and the search stops once the sum of the frontiers'
//! minimum keys can no longer beat it. Stopping at first contact instead can
//! miss the optimal path. The distance objective is symmetric, so the
//! backward search reuses the forward edge weights unchanged.

use std::collections::{BinaryHeap, HashMap};

use crate::cost::CostModel;
use crate::grid::{Cell, Grid};
use crate::path::{reconstruct_path, PathFound, QueueEntry, SearchBudget, SearchOutcome};

struct Frontier {
    queue: BinaryHeap<QueueEntry>,
    g_score: HashMap<Cell, f64>,
    parents: HashMap<Cell, Option<Cell>>,
    sequence: u64,
}

impl Frontier {
    fn new(origin: Cell, estimate: f64) -> Self {
        let mut frontier = Self {
            queue: BinaryHeap::new(),
            g_score: HashMap::new(),
            parents: HashMap::new(),
            sequence: 0,
        };
        frontier.g_score.insert(origin, 0.0);
        frontier.parents.insert(origin, None);
        frontier.queue.push(QueueEntry::new(origin, 0.0, estimate, 0));
        frontier
    }

    fn min_key(&self) -> Option<f64> {
        self.queue.peek().map(|entry| entry.estimate.0)
    }
}

/// Bidirectional A* between `start` and `goal`.
pub fn find_route_bidirectional(
    grid: &Grid,
    model: &CostModel<'_>,
    start: Cell,
    goal: Cell,
    budget: SearchBudget,
) -> SearchOutcome {
    if start == goal {
        return SearchOutcome::Found(PathFound {
            cells: vec![start],
            total_cost: 0.0,
            nodes_explored: 0,
        });
    }

    let mut forward = Frontier::new(start, model.heuristic_km(start, goal));
    let mut backward = Frontier::new(goal, model.heuristic_km(goal, start));

    let mut best_meeting: Option<(Cell, f64)> = None;
    let mut nodes_explored = 0usize;
    let mut expand_forward = true;

    loop {
        if let (Some((_, meeting_cost)), Some(forward_min), Some(backward_min)) =
            (best_meeting, forward.min_key(), backward.min_key())
        {
            if forward_min + backward_min >= meeting_cost {
                break;
            }
        }

        if forward.queue.is_empty() && backward.queue.is_empty() {
            break;
        }

        if nodes_explored >= budget.max_expansions {
            return SearchOutcome::BudgetExceeded { nodes_explored };
        }

        let expanded = if expand_forward {
            expand(
                &mut forward,
                &backward,
                grid,
                |cell| model.heuristic_km(cell, goal),
                &mut best_meeting,
            )
        } else {
            expand(
                &mut backward,
                &forward,
                grid,
                |cell| model.heuristic_km(cell, start),
                &mut best_meeting,
            )
        };
        if expanded {
            nodes_explored += 1;
        }
        expand_forward = !expand_forward;
    }

    let Some((meeting, meeting_cost)) = best_meeting else {
        return SearchOutcome::FrontierExhausted { nodes_explored };
    };

    let mut cells = reconstruct_path(&forward.parents, start, meeting);
    let mut current = backward.parents.get(&meeting).copied().flatten();
    while let Some(cell) = current {
        cells.push(cell);
        current = backward.parents.get(&cell).copied().flatten();
    }

    SearchOutcome::Found(PathFound {
        cells,
        total_cost: meeting_cost,
        nodes_explored,
    })
}

/// Pop and expand one cell of `frontier`, relaxing its neighbours and
/// updating the shared meeting cost against the opposite frontier. Returns
/// whether a non-stale cell was expanded.
fn expand<H>(
    frontier: &mut Frontier,
    other: &Frontier,
    grid: &Grid,
    heuristic: H,
    best_meeting: &mut Option<(Cell, f64)>,
) -> bool
where
    H: Fn(Cell) -> f64,
{
    while let Some(entry) = frontier.queue.pop() {
        let current_score = match frontier.g_score.get(&entry.cell) {
            Some(score) if entry.cost.0 > *score => continue, // stale entry
            Some(score) => *score,
            None => continue,
        };

        // A settled cell already scored by the other side is a meeting
        // candidate with the best cost this side will ever offer for it.
        offer_meeting(entry.cell, current_score, other, best_meeting);

        for next in grid.neighbors(entry.cell) {
            let tentative = current_score + grid.distance_km(entry.cell, next);
            if tentative < frontier.g_score.get(&next).copied().unwrap_or(f64::INFINITY) {
                frontier.g_score.insert(next, tentative);
                frontier.parents.insert(next, Some(entry.cell));
                frontier.sequence += 1;
                let sequence = frontier.sequence;
                frontier
                    .queue
                    .push(QueueEntry::new(next, tentative, heuristic(next), sequence));

                offer_meeting(next, tentative, other, best_meeting);
            }
        }
        return true;
    }
    false
}

fn offer_meeting(
    cell: Cell,
    score: f64,
    other: &Frontier,
    best_meeting: &mut Option<(Cell, f64)>,
) {
    if let Some(other_score) = other.g_score.get(&cell) {
        let total = score + other_score;
        if best_meeting.map_or(true, |(_, cost)| total < cost) {
            *best_meeting = Some((cell, total));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::{EnvironmentField, WeatherPattern};
    use crate::grid::{LandRegion, ObstacleSpec};
    use crate::path::find_route_a_star;
    use crate::vessel::VesselProfile;

    fn field_for(grid: &Grid) -> EnvironmentField {
        EnvironmentField::generate(grid, 42, WeatherPattern::Calm, &[])
    }

    #[test]
    fn matches_a_star_on_open_water() {
        let grid = Grid::new(12, 12, &ObstacleSpec::default(), &[]).unwrap();
        let field = field_for(&grid);
        let model = CostModel::new(&grid, &field, VesselProfile::default());
        let start = Cell::new(1, 1);
        let goal = Cell::new(10, 10);

        let bidirectional =
            find_route_bidirectional(&grid, &model, start, goal, SearchBudget::default());
        let reference = find_route_a_star(&grid, &model, start, goal, SearchBudget::default());

        let (SearchOutcome::Found(found), SearchOutcome::Found(expected)) =
            (bidirectional, reference)
        else {
            panic!("expected paths from both searches");
        };
        assert!((found.total_cost - expected.total_cost).abs() < 1e-6);
        assert_eq!(found.cells.first(), Some(&start));
        assert_eq!(found.cells.last(), Some(&goal));
    }

    #[test]
    fn matches_a_star_through_a_gap() {
        // A wall with a single gap forces both frontiers through one cell.
        let obstacles = ObstacleSpec {
            islands: Vec::new(),
            land_regions: vec![
                LandRegion {
                    x_start: 4,
                    y_start: 0,
                    x_end: 4,
                    y_end: 3,
                },
                LandRegion {
                    x_start: 4,
                    y_start: 5,
                    x_end: 4,
                    y_end: 8,
                },
            ],
        };
        let grid = Grid::new(9, 9, &obstacles, &[]).unwrap();
        let field = field_for(&grid);
        let model = CostModel::new(&grid, &field, VesselProfile::default());
        let start = Cell::new(1, 1);
        let goal = Cell::new(7, 7);

        let bidirectional =
            find_route_bidirectional(&grid, &model, start, goal, SearchBudget::default());
        let reference = find_route_a_star(&grid, &model, start, goal, SearchBudget::default());

        let (SearchOutcome::Found(found), SearchOutcome::Found(expected)) =
            (bidirectional, reference)
        else {
            panic!("expected paths from both searches");
        };
        assert!((found.total_cost - expected.total_cost).abs() < 1e-6);
        assert!(found.cells.contains(&Cell::new(4, 4)));
    }

    #[test]
    fn disconnected_endpoints_exhaust_both_frontiers() {
        let obstacles = ObstacleSpec {
            islands: Vec::new(),
            land_regions: vec![LandRegion {
                x_start: 3,
                y_start: 0,
                x_end: 3,
                y_end: 6,
            }],
        };
        let grid = Grid::new(7, 7, &obstacles, &[]).unwrap();
        let field = field_for(&grid);
        let model = CostModel::new(&grid, &field, VesselProfile::default());

        let outcome = find_route_bidirectional(
            &grid,
            &model,
            Cell::new(0, 3),
            Cell::new(6, 3),
            SearchBudget::default(),
        );
        assert!(matches!(outcome, SearchOutcome::FrontierExhausted { .. }));
    }

    #[test]
    fn adjacent_endpoints_meet_immediately() {
        let grid = Grid::new(4, 4, &ObstacleSpec::default(), &[]).unwrap();
        let field = field_for(&grid);
        let model = CostModel::new(&grid, &field, VesselProfile::default());

        let outcome = find_route_bidirectional(
            &grid,
            &model,
            Cell::new(1, 1),
            Cell::new(2, 1),
            SearchBudget::default(),
        );
        let SearchOutcome::Found(found) = outcome else {
            panic!("expected a path");
        };
        assert_eq!(found.cells, vec![Cell::new(1, 1), Cell::new(2, 1)]);
        assert!((found.total_cost - grid.cell_size_km()).abs() < 1e-9);
    }
}
