//! Searoute library entry points.
//!
//! This crate exposes the grid-ocean routing engine: the navigation grid and
//! its synthetic weather field, the cost model translating distance, fuel,
//! time and hazard exposure into edge weights, and the family of search
//! strategies that consume it (Dijkstra, A*, weather-aware A*, fuel-optimized,
//! bidirectional A*, and an evolutionary multi-objective optimizer).
//! Higher-level consumers (APIs, CLIs) should depend on the functions
//! exported here instead of reimplementing behavior.
//!
//! The engine is a pure function of its inputs: grid and weather field are
//! immutable once built and may be shared across concurrent requests.

#![deny(warnings)]

pub mod bidirectional;
pub mod cost;
pub mod emissions;
pub mod environment;
pub mod error;
pub mod genetic;
pub mod grid;
pub mod metrics;
pub mod path;
pub mod routing;
pub mod vessel;

pub use cost::{CostModel, EdgeCost};
pub use emissions::{emission_report, EmissionReport};
pub use environment::{EnvironmentField, EnvironmentSample, StormSpec, WeatherPattern};
pub use error::{Error, Result};
pub use genetic::{
    BestGenome, FitnessBreakdown, GeneticConfig, GeneticOptimizer, GeneticOutcome,
    ObjectiveWeights,
};
pub use grid::{Cell, Grid, HazardKind, Island, LandRegion, ObstacleSpec, ZoneSpec};
pub use metrics::{path_totals, PathTotals};
pub use path::{PathFound, SearchBudget, SearchOutcome};
pub use routing::{
    compare_algorithms, plan_route, RouteAlgorithm, RoutePlanner, RouteRequest, RouteSummary,
};
pub use vessel::VesselProfile;
