//! Emission estimates for a completed route.
//!
//! Fuel-based accounting: every figure derives from the total fuel burned
//! over the voyage, using the IMO marine fuel emission factors.

use serde::Serialize;

/// Emission factors and pricing constants.
pub mod factors {
    /// Grams of CO₂ per kilogram of marine fuel burned.
    pub const CO2_G_PER_KG_FUEL: f64 = 3114.0;
    /// Grams of NOx per kilogram of marine fuel burned.
    pub const NOX_G_PER_KG_FUEL: f64 = 87.0;
    /// Grams of SOx per kilogram of low-sulfur marine fuel burned.
    pub const SOX_G_PER_KG_FUEL: f64 = 54.0;
    /// Carbon credit price in USD per ton of CO₂.
    pub const CARBON_PRICE_USD_PER_TON: f64 = 50.0;
}

/// Environmental impact report for a route.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EmissionReport {
    pub co2_tons: f64,
    pub nox_kg: f64,
    pub sox_kg: f64,
    pub carbon_cost_usd: f64,
    /// 0–100, higher is better: 100 at zero emissions, 0 at or above 100
    /// tons of CO₂.
    pub environmental_score: f64,
}

/// Derive the emission report for a voyage from its total fuel burn.
pub fn emission_report(fuel_tons: f64) -> EmissionReport {
    let fuel_kg = fuel_tons * 1000.0;
    let co2_tons = fuel_kg * factors::CO2_G_PER_KG_FUEL / 1_000_000.0;
    let nox_kg = fuel_kg * factors::NOX_G_PER_KG_FUEL / 1000.0;
    let sox_kg = fuel_kg * factors::SOX_G_PER_KG_FUEL / 1000.0;

    EmissionReport {
        co2_tons,
        nox_kg,
        sox_kg,
        carbon_cost_usd: co2_tons * factors::CARBON_PRICE_USD_PER_TON,
        environmental_score: (100.0 - co2_tons).clamp(0.0, 100.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_fuel_scores_perfect() {
        let report = emission_report(0.0);
        assert_eq!(report.co2_tons, 0.0);
        assert_eq!(report.environmental_score, 100.0);
    }

    #[test]
    fn ten_tons_of_fuel() {
        let report = emission_report(10.0);
        assert!((report.co2_tons - 31.14).abs() < 1e-9);
        assert!((report.nox_kg - 870.0).abs() < 1e-9);
        assert!((report.sox_kg - 540.0).abs() < 1e-9);
        assert!((report.carbon_cost_usd - 31.14 * 50.0).abs() < 1e-9);
        assert!((report.environmental_score - (100.0 - 31.14)).abs() < 1e-9);
    }

    #[test]
    fn score_floors_at_zero() {
        let report = emission_report(100.0);
        assert_eq!(report.environmental_score, 0.0);
    }
}
