//! Aggregation of per-edge costs into user-facing route totals.

use serde::Serialize;

use crate::cost::CostModel;
use crate::grid::Cell;

/// Cost components summed over every edge of a path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PathTotals {
    pub distance_km: f64,
    pub fuel_tons: f64,
    pub time_hours: f64,
    pub risk: f64,
}

/// Sum the cost-model components over consecutive path cells.
///
/// A path shorter than two cells has zero totals.
pub fn path_totals(model: &CostModel<'_>, cells: &[Cell]) -> PathTotals {
    let mut totals = PathTotals::default();
    for pair in cells.windows(2) {
        let edge = model.edge_cost(pair[0], pair[1]);
        totals.distance_km += edge.distance_km;
        totals.fuel_tons += edge.fuel_tons;
        totals.time_hours += edge.time_hours;
        totals.risk += edge.risk;
    }
    totals
}
