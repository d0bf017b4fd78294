//! Route planning strategies implementing the Strategy pattern.
//!
//! Each algorithm is encapsulated in its own planner struct behind the
//! [`RoutePlanner`] trait, so new strategies slot in without touching the
//! `plan_route` orchestrator.

use crate::bidirectional::find_route_bidirectional;
use crate::cost::CostModel;
use crate::genetic::{GeneticConfig, GeneticOptimizer, GeneticOutcome, ObjectiveWeights};
use crate::grid::{Cell, Grid};
use crate::path::{
    find_route_a_star, find_route_dijkstra, find_route_fuel_optimized, find_route_weather_aware,
    PathFound, SearchBudget, SearchOutcome,
};

use super::{RouteAlgorithm, RouteRequest};

/// Trait for route planning strategies.
pub trait RoutePlanner: Send + Sync {
    /// The algorithm identifier for this planner.
    fn algorithm(&self) -> RouteAlgorithm;

    /// Execute the strategy between `start` and `goal`.
    fn find_path(
        &self,
        grid: &Grid,
        model: &CostModel<'_>,
        start: Cell,
        goal: Cell,
        budget: SearchBudget,
    ) -> SearchOutcome;
}

/// Uninformed search over pure distance. Optimal for its objective.
#[derive(Debug, Clone, Default)]
pub struct DijkstraPlanner;

impl RoutePlanner for DijkstraPlanner {
    fn algorithm(&self) -> RouteAlgorithm {
        RouteAlgorithm::Dijkstra
    }

    fn find_path(
        &self,
        grid: &Grid,
        model: &CostModel<'_>,
        start: Cell,
        goal: Cell,
        budget: SearchBudget,
    ) -> SearchOutcome {
        find_route_dijkstra(grid, model, start, goal, budget)
    }
}

/// Heuristic-guided search over pure distance. Matches Dijkstra's result
/// while expanding fewer cells.
#[derive(Debug, Clone, Default)]
pub struct AStarPlanner;

impl RoutePlanner for AStarPlanner {
    fn algorithm(&self) -> RouteAlgorithm {
        RouteAlgorithm::AStar
    }

    fn find_path(
        &self,
        grid: &Grid,
        model: &CostModel<'_>,
        start: Cell,
        goal: Cell,
        budget: SearchBudget,
    ) -> SearchOutcome {
        find_route_a_star(grid, model, start, goal, budget)
    }
}

/// A* over weather-adjusted distance; near-optimal when favorable weather
/// drives edge multipliers below one.
#[derive(Debug, Clone, Default)]
pub struct WeatherAwarePlanner;

impl RoutePlanner for WeatherAwarePlanner {
    fn algorithm(&self) -> RouteAlgorithm {
        RouteAlgorithm::WeatherAware
    }

    fn find_path(
        &self,
        grid: &Grid,
        model: &CostModel<'_>,
        start: Cell,
        goal: Cell,
        budget: SearchBudget,
    ) -> SearchOutcome {
        find_route_weather_aware(grid, model, start, goal, budget)
    }
}

/// Uninformed search over fuel burn. Exact for its objective.
#[derive(Debug, Clone, Default)]
pub struct FuelOptimizedPlanner;

impl RoutePlanner for FuelOptimizedPlanner {
    fn algorithm(&self) -> RouteAlgorithm {
        RouteAlgorithm::FuelOptimized
    }

    fn find_path(
        &self,
        grid: &Grid,
        model: &CostModel<'_>,
        start: Cell,
        goal: Cell,
        budget: SearchBudget,
    ) -> SearchOutcome {
        find_route_fuel_optimized(grid, model, start, goal, budget)
    }
}

/// Two simultaneous frontiers over pure distance; matches A*'s distance.
#[derive(Debug, Clone, Default)]
pub struct BidirectionalPlanner;

impl RoutePlanner for BidirectionalPlanner {
    fn algorithm(&self) -> RouteAlgorithm {
        RouteAlgorithm::Bidirectional
    }

    fn find_path(
        &self,
        grid: &Grid,
        model: &CostModel<'_>,
        start: Cell,
        goal: Cell,
        budget: SearchBudget,
    ) -> SearchOutcome {
        find_route_bidirectional(grid, model, start, goal, budget)
    }
}

/// Evolutionary multi-objective optimizer.
#[derive(Debug, Clone)]
pub struct GeneticPlanner {
    config: GeneticConfig,
    weights: ObjectiveWeights,
}

impl GeneticPlanner {
    pub fn new(config: GeneticConfig, weights: ObjectiveWeights) -> Self {
        Self { config, weights }
    }

    /// Create a planner from a route request.
    pub fn from_request(request: &RouteRequest) -> Self {
        Self {
            config: request.genetic,
            weights: request.weights,
        }
    }
}

impl RoutePlanner for GeneticPlanner {
    fn algorithm(&self) -> RouteAlgorithm {
        RouteAlgorithm::Genetic
    }

    fn find_path(
        &self,
        grid: &Grid,
        model: &CostModel<'_>,
        start: Cell,
        goal: Cell,
        budget: SearchBudget,
    ) -> SearchOutcome {
        let optimizer = GeneticOptimizer::new(grid, model, self.config, self.weights);
        match optimizer.optimize(start, goal, budget) {
            GeneticOutcome::Found(best) => SearchOutcome::Found(PathFound {
                cells: best.cells,
                total_cost: best.fitness.scalar,
                nodes_explored: best.evaluations,
            }),
            GeneticOutcome::NoFeasibleGenome { nodes_explored } => {
                SearchOutcome::FrontierExhausted { nodes_explored }
            }
            GeneticOutcome::BudgetExceeded { nodes_explored } => {
                SearchOutcome::BudgetExceeded { nodes_explored }
            }
        }
    }
}

/// Select the appropriate planner for a given request.
pub fn select_planner(request: &RouteRequest) -> Box<dyn RoutePlanner> {
    match request.algorithm {
        RouteAlgorithm::Dijkstra => Box::new(DijkstraPlanner),
        RouteAlgorithm::AStar => Box::new(AStarPlanner),
        RouteAlgorithm::WeatherAware => Box::new(WeatherAwarePlanner),
        RouteAlgorithm::FuelOptimized => Box::new(FuelOptimizedPlanner),
        RouteAlgorithm::Bidirectional => Box::new(BidirectionalPlanner),
        RouteAlgorithm::Genetic => Box::new(GeneticPlanner::from_request(request)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn planners_report_their_algorithms() {
        assert_eq!(DijkstraPlanner.algorithm(), RouteAlgorithm::Dijkstra);
        assert_eq!(AStarPlanner.algorithm(), RouteAlgorithm::AStar);
        assert_eq!(WeatherAwarePlanner.algorithm(), RouteAlgorithm::WeatherAware);
        assert_eq!(
            FuelOptimizedPlanner.algorithm(),
            RouteAlgorithm::FuelOptimized
        );
        assert_eq!(
            BidirectionalPlanner.algorithm(),
            RouteAlgorithm::Bidirectional
        );
    }

    #[test]
    fn select_planner_matches_the_request() {
        let request = RouteRequest::new(
            Cell::new(0, 0),
            Cell::new(3, 3),
            RouteAlgorithm::Bidirectional,
        );
        let planner = select_planner(&request);
        assert_eq!(planner.algorithm(), RouteAlgorithm::Bidirectional);
    }

    #[test]
    fn genetic_planner_carries_request_weights() {
        let mut request = RouteRequest::new(Cell::new(0, 0), Cell::new(3, 3), RouteAlgorithm::Genetic);
        request.weights.fuel = 0.9;
        let planner = GeneticPlanner::from_request(&request);
        assert_eq!(planner.weights.fuel, 0.9);
    }
}
