//! Edge cost model translating physical quantities into comparable scalars.
//!
//! The model is strategy-agnostic and side-effect-free: it borrows the grid,
//! the weather field and a vessel profile and prices one directed edge at a
//! time. Each search strategy picks the components it optimizes.

use serde::Serialize;

use crate::environment::EnvironmentField;
use crate::grid::{Cell, Grid, HazardKind};
use crate::vessel::{VesselProfile, KM_PER_NAUTICAL_MILE};

/// Lower bound on the combined weather multiplier. Keeps every edge weight
/// strictly positive, which Dijkstra/A* optimality depends on.
pub const MIN_WEATHER_MULTIPLIER: f64 = 0.1;

/// Risk penalty per edge ending in shallow water.
pub const SHALLOW_RISK_PENALTY: f64 = 3.0;
/// Risk penalty per edge ending in a pirate activity zone.
pub const PIRATE_RISK_PENALTY: f64 = 8.0;

/// Cost components for traversing a single directed edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EdgeCost {
    pub distance_km: f64,
    pub fuel_tons: f64,
    pub time_hours: f64,
    pub risk: f64,
    pub weather_multiplier: f64,
}

/// Strategy-agnostic cost model over a grid, its weather field and a vessel.
#[derive(Debug, Clone, Copy)]
pub struct CostModel<'a> {
    grid: &'a Grid,
    field: &'a EnvironmentField,
    vessel: VesselProfile,
}

impl<'a> CostModel<'a> {
    pub fn new(grid: &'a Grid, field: &'a EnvironmentField, vessel: VesselProfile) -> Self {
        Self {
            grid,
            field,
            vessel,
        }
    }

    pub fn grid(&self) -> &'a Grid {
        self.grid
    }

    /// Combined wave/wind/current multiplier for entering `cell` on
    /// `heading_deg`. Rough seas raise it; tailwinds and following currents
    /// lower it, never below [`MIN_WEATHER_MULTIPLIER`].
    pub fn weather_multiplier(&self, cell: Cell, heading_deg: f64) -> f64 {
        let sample = self.field.sample(cell);

        let wave_cost = 1.0 + sample.wave_height_m / 10.0;
        let wind_cost = 1.0
            - relative_factor(heading_deg, sample.wind_direction_deg) * sample.wind_speed_knots
                / 100.0;
        let current_cost = 1.0
            - relative_factor(heading_deg, sample.current_direction_deg)
                * sample.current_speed_knots
                / 50.0;

        (wave_cost * wind_cost * current_cost).max(MIN_WEATHER_MULTIPLIER)
    }

    /// Price the directed edge `from -> to`.
    pub fn edge_cost(&self, from: Cell, to: Cell) -> EdgeCost {
        let distance_km = self.grid.distance_km(from, to);
        let heading_deg = from.heading_deg_to(&to);
        let multiplier = self.weather_multiplier(to, heading_deg);
        let distance_nm = distance_km / KM_PER_NAUTICAL_MILE;

        let risk = match self.grid.zone_of(to) {
            None => 0.0,
            Some(HazardKind::Shallow) => SHALLOW_RISK_PENALTY,
            Some(HazardKind::Pirate) => PIRATE_RISK_PENALTY,
            // Unreachable through Grid::neighbors; kept infinite so a
            // hand-built edge can never look traversable.
            Some(HazardKind::Military) => f64::INFINITY,
        };

        EdgeCost {
            distance_km,
            fuel_tons: distance_nm * self.vessel.base_consumption_tons_per_nm * multiplier,
            time_hours: distance_nm / self.vessel.service_speed_knots,
            risk,
            weather_multiplier: multiplier,
        }
    }

    /// Weather-adjusted distance in kilometres, the weather-aware strategy's
    /// edge weight.
    pub fn weather_adjusted_distance_km(&self, from: Cell, to: Cell) -> f64 {
        let edge = self.edge_cost(from, to);
        edge.distance_km * edge.weather_multiplier
    }

    /// Straight-line distance to `goal` in kilometres: the A* heuristic.
    /// Never overestimates the true remaining distance cost.
    pub fn heuristic_km(&self, cell: Cell, goal: Cell) -> f64 {
        self.grid.distance_km(cell, goal)
    }
}

/// Cosine of the angle between a heading and a flow direction:
/// +1 fully aligned (following), -1 fully opposed (head-on).
fn relative_factor(heading_deg: f64, direction_deg: f64) -> f64 {
    (heading_deg - direction_deg).to_radians().cos()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::EnvironmentSample;
    use crate::grid::{ObstacleSpec, ZoneSpec};

    fn uniform_sample() -> EnvironmentSample {
        EnvironmentSample {
            wind_speed_knots: 10.0,
            wind_direction_deg: 0.0,
            wave_height_m: 2.0,
            current_speed_knots: 1.0,
            current_direction_deg: 0.0,
        }
    }

    fn uniform_field(width: i32, height: i32, sample: EnvironmentSample) -> EnvironmentField {
        let samples = vec![sample; (width * height) as usize];
        EnvironmentField::from_samples(width, height, samples).unwrap()
    }

    #[test]
    fn tailwind_is_cheaper_than_headwind() {
        let grid = Grid::new(5, 5, &ObstacleSpec::default(), &[]).unwrap();
        let field = uniform_field(5, 5, uniform_sample());
        let model = CostModel::new(&grid, &field, VesselProfile::default());

        // Wind and current both blow towards +x.
        let tailwind = model.weather_multiplier(Cell::new(2, 2), 0.0);
        let headwind = model.weather_multiplier(Cell::new(2, 2), 180.0);

        assert!(tailwind < headwind);
    }

    #[test]
    fn multiplier_matches_component_product() {
        let grid = Grid::new(5, 5, &ObstacleSpec::default(), &[]).unwrap();
        let field = uniform_field(5, 5, uniform_sample());
        let model = CostModel::new(&grid, &field, VesselProfile::default());

        // Crosswind at 90 degrees: both cosine terms vanish, leaving waves.
        let multiplier = model.weather_multiplier(Cell::new(2, 2), 90.0);
        let expected = 1.0 + 2.0 / 10.0;
        assert!((multiplier - expected).abs() < 1e-9);
    }

    #[test]
    fn strongest_tailwind_stays_positive() {
        let grid = Grid::new(3, 3, &ObstacleSpec::default(), &[]).unwrap();
        // The strongest conditions the clamped ranges allow, all following.
        let sample = EnvironmentSample {
            wind_speed_knots: 45.0,
            wind_direction_deg: 0.0,
            wave_height_m: 0.5,
            current_speed_knots: 3.0,
            current_direction_deg: 0.0,
        };
        let field = uniform_field(3, 3, sample);
        let model = CostModel::new(&grid, &field, VesselProfile::default());

        let multiplier = model.weather_multiplier(Cell::new(1, 1), 0.0);
        assert!(multiplier >= MIN_WEATHER_MULTIPLIER);
        assert!(multiplier < 1.0);
    }

    #[test]
    fn edge_cost_scales_fuel_with_multiplier() {
        let grid = Grid::new(5, 5, &ObstacleSpec::default(), &[]).unwrap();
        let field = uniform_field(5, 5, uniform_sample());
        let model = CostModel::new(&grid, &field, VesselProfile::default());

        let from = Cell::new(1, 2);
        let to = Cell::new(2, 2);
        let edge = model.edge_cost(from, to);

        let distance_nm = edge.distance_km / KM_PER_NAUTICAL_MILE;
        let expected_fuel = distance_nm * 0.15 * edge.weather_multiplier;
        assert!((edge.fuel_tons - expected_fuel).abs() < 1e-12);

        let expected_time = distance_nm / 20.0;
        assert!((edge.time_hours - expected_time).abs() < 1e-12);
    }

    #[test]
    fn hazard_zones_set_risk() {
        let zones = [
            ZoneSpec {
                center: Cell::new(1, 0),
                radius: 0,
                kind: HazardKind::Shallow,
            },
            ZoneSpec {
                center: Cell::new(2, 0),
                radius: 0,
                kind: HazardKind::Pirate,
            },
        ];
        let grid = Grid::new(4, 4, &ObstacleSpec::default(), &zones).unwrap();
        let field = uniform_field(4, 4, uniform_sample());
        let model = CostModel::new(&grid, &field, VesselProfile::default());

        let open = model.edge_cost(Cell::new(0, 1), Cell::new(0, 0));
        let shallow = model.edge_cost(Cell::new(0, 0), Cell::new(1, 0));
        let pirate = model.edge_cost(Cell::new(1, 0), Cell::new(2, 0));

        assert_eq!(open.risk, 0.0);
        assert_eq!(shallow.risk, SHALLOW_RISK_PENALTY);
        assert_eq!(pirate.risk, PIRATE_RISK_PENALTY);
        assert!(pirate.risk > shallow.risk);
    }
}
