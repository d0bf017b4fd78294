//! Synthetic weather field covering the navigation grid.
//!
//! Samples are generated from a smooth sine/cosine noise field whose phase
//! offsets come from a seeded RNG, so the same grid, seed, pattern and storm
//! list always reproduce bit-identical values. Storms are overlaid on top of
//! the base field and every sample is clamped to its stated range afterwards.

use std::f64::consts::TAU;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::grid::{Cell, Grid};

pub const MIN_WIND_KNOTS: f64 = 5.0;
pub const MAX_WIND_KNOTS: f64 = 45.0;
pub const MIN_WAVE_M: f64 = 0.5;
pub const MAX_WAVE_M: f64 = 7.5;
pub const MIN_CURRENT_KNOTS: f64 = 0.5;
pub const MAX_CURRENT_KNOTS: f64 = 3.0;

/// Wind gain in knots applied at full storm intensity.
const STORM_WIND_KNOTS: f64 = 20.0;
/// Wave gain in metres applied at full storm intensity.
const STORM_WAVE_M: f64 = 3.0;

/// Broad weather regime controlling the base noise parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherPattern {
    Calm,
    #[default]
    Moderate,
    Stormy,
}

impl WeatherPattern {
    /// Base value and variation amplitude for wind, waves and currents.
    fn parameters(self) -> PatternParameters {
        match self {
            WeatherPattern::Calm => PatternParameters {
                wind_base: 5.0,
                wind_var: 3.0,
                wave_base: 0.5,
                wave_var: 0.3,
                current_base: 0.5,
                current_var: 0.2,
            },
            WeatherPattern::Moderate => PatternParameters {
                wind_base: 15.0,
                wind_var: 8.0,
                wave_base: 2.0,
                wave_var: 1.0,
                current_base: 1.0,
                current_var: 0.5,
            },
            WeatherPattern::Stormy => PatternParameters {
                wind_base: 30.0,
                wind_var: 15.0,
                wave_base: 5.0,
                wave_var: 2.5,
                current_base: 2.0,
                current_var: 1.0,
            },
        }
    }
}

struct PatternParameters {
    wind_base: f64,
    wind_var: f64,
    wave_base: f64,
    wave_var: f64,
    current_base: f64,
    current_var: f64,
}

/// Localized storm perturbation overlaid on the base field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StormSpec {
    pub center: Cell,
    pub radius: i32,
    pub intensity: f64,
}

/// Weather conditions sampled at a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentSample {
    pub wind_speed_knots: f64,
    pub wind_direction_deg: f64,
    pub wave_height_m: f64,
    pub current_speed_knots: f64,
    pub current_direction_deg: f64,
}

/// Per-cell dynamic weather state for one grid configuration.
///
/// Read-only once generated; safe to share across concurrent searches.
#[derive(Debug, Clone)]
pub struct EnvironmentField {
    width: i32,
    height: i32,
    samples: Vec<EnvironmentSample>,
}

impl EnvironmentField {
    /// Generate the field for a grid.
    ///
    /// Deterministic: identical dimensions, seed, pattern and storms yield
    /// identical samples across calls.
    pub fn generate(grid: &Grid, seed: u64, pattern: WeatherPattern, storms: &[StormSpec]) -> Self {
        let params = pattern.parameters();
        let mut rng = StdRng::seed_from_u64(seed);
        let phases: [f64; 4] = [
            rng.gen_range(0.0..TAU),
            rng.gen_range(0.0..TAU),
            rng.gen_range(0.0..TAU),
            rng.gen_range(0.0..TAU),
        ];

        let width = grid.width();
        let height = grid.height();
        let mut samples = Vec::with_capacity((width as usize) * (height as usize));

        for y in 0..height {
            for x in 0..width {
                let fx = f64::from(x);
                let fy = f64::from(y);
                let noise_a = (fx / 10.0 + phases[0]).sin() * (fy / 15.0 + phases[1]).cos();
                let noise_b = (fx / 12.0 + phases[2]).cos() * (fy / 8.0 + phases[3]).sin();

                samples.push(EnvironmentSample {
                    wind_speed_knots: params.wind_base + params.wind_var * noise_a,
                    wind_direction_deg: (noise_b + 1.0) * 180.0,
                    wave_height_m: params.wave_base + params.wave_var * noise_a,
                    current_speed_knots: params.current_base + params.current_var * noise_b,
                    current_direction_deg: (noise_a + 1.0) * 180.0,
                });
            }
        }

        let mut field = Self {
            width,
            height,
            samples,
        };
        for storm in storms {
            field.overlay_storm(storm);
        }
        field.clamp_samples();
        field
    }

    /// Build a field from externally supplied samples, e.g. ingested forecast
    /// data. Samples are expected in row-major order and are clamped to the
    /// documented ranges.
    pub fn from_samples(
        width: i32,
        height: i32,
        samples: Vec<EnvironmentSample>,
    ) -> Result<Self> {
        let expected = (width.max(0) as usize) * (height.max(0) as usize);
        if width <= 0 || height <= 0 || samples.len() != expected {
            return Err(Error::InvalidConfiguration {
                message: format!(
                    "environment field needs {expected} samples for {width}x{height}, got {}",
                    samples.len()
                ),
            });
        }
        let mut field = Self {
            width,
            height,
            samples,
        };
        field.clamp_samples();
        Ok(field)
    }

    /// Weather conditions at a cell. The cell must be in-bounds.
    pub fn sample(&self, cell: Cell) -> &EnvironmentSample {
        debug_assert!(self.in_bounds(cell), "sample outside field: {cell}");
        &self.samples[(cell.y * self.width + cell.x) as usize]
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    fn in_bounds(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.x < self.width && cell.y >= 0 && cell.y < self.height
    }

    /// Additive storm overlay. Intensity decays linearly from the centre to
    /// zero at the radius boundary.
    fn overlay_storm(&mut self, storm: &StormSpec) {
        if storm.radius <= 0 || storm.intensity <= 0.0 {
            return;
        }
        let radius = f64::from(storm.radius);
        for y in (storm.center.y - storm.radius).max(0)
            ..=(storm.center.y + storm.radius).min(self.height - 1)
        {
            for x in (storm.center.x - storm.radius).max(0)
                ..=(storm.center.x + storm.radius).min(self.width - 1)
            {
                let distance = Cell::new(x, y).distance_cells(&storm.center);
                if distance > radius {
                    continue;
                }
                let factor = storm.intensity * (1.0 - distance / radius);
                let sample = &mut self.samples[(y * self.width + x) as usize];
                sample.wind_speed_knots += STORM_WIND_KNOTS * factor;
                sample.wave_height_m += STORM_WAVE_M * factor;
            }
        }
    }

    fn clamp_samples(&mut self) {
        for sample in &mut self.samples {
            sample.wind_speed_knots = sample.wind_speed_knots.clamp(MIN_WIND_KNOTS, MAX_WIND_KNOTS);
            sample.wave_height_m = sample.wave_height_m.clamp(MIN_WAVE_M, MAX_WAVE_M);
            sample.current_speed_knots = sample
                .current_speed_knots
                .clamp(MIN_CURRENT_KNOTS, MAX_CURRENT_KNOTS);
            sample.wind_direction_deg = sample.wind_direction_deg.rem_euclid(360.0);
            sample.current_direction_deg = sample.current_direction_deg.rem_euclid(360.0);
        }
    }
}
