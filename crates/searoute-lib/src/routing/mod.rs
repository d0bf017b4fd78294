//! Route planning module: request/response types and orchestration.
//!
//! This module provides:
//! - [`RouteAlgorithm`] - the closed set of supported strategies
//! - [`RouteRequest`] - high-level route planning request
//! - [`RouteSummary`] - planned route with aggregated metrics
//! - [`plan_route`] - main entry point for computing a route
//! - [`compare_algorithms`] - run every strategy on the same inputs
//!
//! # Strategy Pattern
//!
//! Strategies live behind the [`RoutePlanner`] trait in `planner.rs`; the
//! orchestrator validates the request, builds the cost model, dispatches to
//! the selected planner and aggregates metrics from the resulting path.

mod planner;

pub use planner::{
    select_planner, AStarPlanner, BidirectionalPlanner, DijkstraPlanner, FuelOptimizedPlanner,
    GeneticPlanner, RoutePlanner, WeatherAwarePlanner,
};

use std::fmt;
use std::time::Instant;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::cost::CostModel;
use crate::emissions::{emission_report, EmissionReport};
use crate::environment::EnvironmentField;
use crate::error::{Error, Result};
use crate::genetic::{GeneticConfig, ObjectiveWeights};
use crate::grid::{Cell, Grid};
use crate::metrics::path_totals;
use crate::path::{SearchBudget, SearchOutcome};
use crate::vessel::VesselProfile;

/// Supported routing algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RouteAlgorithm {
    /// Uninformed, distance-optimal.
    Dijkstra,
    /// Heuristic-guided, distance-optimal.
    #[default]
    AStar,
    /// Weather-adjusted distance; near-optimal under favorable weather.
    WeatherAware,
    /// Uninformed, fuel-optimal.
    FuelOptimized,
    /// Two simultaneous frontiers, distance-optimal.
    Bidirectional,
    /// Evolutionary multi-objective trade-off.
    Genetic,
}

impl RouteAlgorithm {
    /// Every algorithm, in comparison order.
    pub const ALL: [RouteAlgorithm; 6] = [
        RouteAlgorithm::Dijkstra,
        RouteAlgorithm::AStar,
        RouteAlgorithm::WeatherAware,
        RouteAlgorithm::FuelOptimized,
        RouteAlgorithm::Bidirectional,
        RouteAlgorithm::Genetic,
    ];

    /// Human-facing display name.
    pub fn display_name(self) -> &'static str {
        match self {
            RouteAlgorithm::Dijkstra => "Dijkstra",
            RouteAlgorithm::AStar => "A*",
            RouteAlgorithm::WeatherAware => "Weather-Aware A*",
            RouteAlgorithm::FuelOptimized => "Fuel-Optimized",
            RouteAlgorithm::Bidirectional => "Bidirectional A*",
            RouteAlgorithm::Genetic => "Genetic",
        }
    }
}

impl fmt::Display for RouteAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// High-level route planning request.
#[derive(Debug, Clone)]
pub struct RouteRequest {
    pub start: Cell,
    pub goal: Cell,
    pub algorithm: RouteAlgorithm,
    pub vessel: VesselProfile,
    /// Objective weights, consulted by the genetic strategy only.
    pub weights: ObjectiveWeights,
    /// Evolution parameters, consulted by the genetic strategy only.
    pub genetic: GeneticConfig,
    pub budget: SearchBudget,
}

impl RouteRequest {
    /// Convenience constructor with default vessel, weights and budget.
    pub fn new(start: Cell, goal: Cell, algorithm: RouteAlgorithm) -> Self {
        Self {
            start,
            goal,
            algorithm,
            vessel: VesselProfile::default(),
            weights: ObjectiveWeights::default(),
            genetic: GeneticConfig::default(),
            budget: SearchBudget::default(),
        }
    }

    /// Attach caller-supplied objective weights.
    pub fn with_weights(mut self, weights: ObjectiveWeights) -> Self {
        self.weights = weights;
        self
    }
}

/// Planned route returned by the library.
#[derive(Debug, Clone, Serialize)]
pub struct RouteSummary {
    pub algorithm: RouteAlgorithm,
    /// Display name of the algorithm that produced the route.
    pub algorithm_name: &'static str,
    /// Ordered cells from start to goal.
    pub path: Vec<Cell>,
    pub distance_km: f64,
    pub fuel_tons: f64,
    pub time_hours: f64,
    /// Accumulated hazard-risk penalty along the route.
    pub risk: f64,
    /// Strategy-internal scalar the search minimized.
    pub cost: f64,
    pub nodes_explored: usize,
    pub computation_time_ms: f64,
    pub emissions: EmissionReport,
}

impl RouteSummary {
    /// Number of hops in the route.
    pub fn hop_count(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}

/// Compute a route using the requested algorithm.
///
/// Steps:
/// 1. Validate the vessel profile and both endpoints
/// 2. Build the cost model over the grid and weather field
/// 3. Select and execute the planner strategy
/// 4. Aggregate metrics from the resulting path
pub fn plan_route(
    grid: &Grid,
    field: &EnvironmentField,
    request: &RouteRequest,
) -> Result<RouteSummary> {
    request.vessel.validate()?;
    require_navigable(grid, request.start)?;
    require_navigable(grid, request.goal)?;

    let model = CostModel::new(grid, field, request.vessel);
    let planner = select_planner(request);

    tracing::debug!(
        algorithm = %request.algorithm,
        start = %request.start,
        goal = %request.goal,
        "planning route"
    );

    let started = Instant::now();
    let outcome = planner.find_path(grid, &model, request.start, request.goal, request.budget);
    let computation_time_ms = started.elapsed().as_secs_f64() * 1000.0;

    match outcome {
        SearchOutcome::Found(found) => {
            let totals = path_totals(&model, &found.cells);
            Ok(RouteSummary {
                algorithm: request.algorithm,
                algorithm_name: request.algorithm.display_name(),
                path: found.cells,
                distance_km: totals.distance_km,
                fuel_tons: totals.fuel_tons,
                time_hours: totals.time_hours,
                risk: totals.risk,
                cost: found.total_cost,
                nodes_explored: found.nodes_explored,
                computation_time_ms,
                emissions: emission_report(totals.fuel_tons),
            })
        }
        SearchOutcome::FrontierExhausted { nodes_explored } => {
            tracing::debug!(nodes_explored, "frontier exhausted without reaching the goal");
            Err(Error::NoPathFound {
                start: request.start,
                goal: request.goal,
            })
        }
        SearchOutcome::BudgetExceeded { nodes_explored } => {
            tracing::warn!(nodes_explored, "search budget exhausted, giving up");
            Err(Error::BudgetExceeded {
                start: request.start,
                goal: request.goal,
                expanded: nodes_explored,
            })
        }
    }
}

/// Run every algorithm on the same inputs.
///
/// Strategies share nothing mutable, so they run in parallel; results are
/// collected only after every strategy has terminated. Each algorithm gets
/// its own `Result` so one failure does not hide the others.
pub fn compare_algorithms(
    grid: &Grid,
    field: &EnvironmentField,
    request: &RouteRequest,
) -> Vec<(RouteAlgorithm, Result<RouteSummary>)> {
    RouteAlgorithm::ALL
        .par_iter()
        .map(|&algorithm| {
            let request = RouteRequest {
                algorithm,
                ..request.clone()
            };
            (algorithm, plan_route(grid, field, &request))
        })
        .collect()
}

fn require_navigable(grid: &Grid, cell: Cell) -> Result<()> {
    if !grid.is_navigable(cell) {
        return Err(Error::OutOfBounds { cell });
    }
    Ok(())
}
