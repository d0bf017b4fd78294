//! Vessel performance profile used by the cost model.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Kilometres per nautical mile.
pub const KM_PER_NAUTICAL_MILE: f64 = 1.852;

/// Fuel and speed characteristics of the routed vessel, immutable per request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VesselProfile {
    /// Base fuel burn in tons per nautical mile in neutral conditions.
    pub base_consumption_tons_per_nm: f64,
    /// Service speed in knots, used for transit-time estimates.
    pub service_speed_knots: f64,
}

impl Default for VesselProfile {
    fn default() -> Self {
        // Typical cargo vessel: ~0.15 t/nm at 20 knots.
        Self {
            base_consumption_tons_per_nm: 0.15,
            service_speed_knots: 20.0,
        }
    }
}

impl VesselProfile {
    /// Validate the profile before it reaches the cost model.
    pub fn validate(&self) -> Result<()> {
        if !self.base_consumption_tons_per_nm.is_finite() || self.base_consumption_tons_per_nm <= 0.0
        {
            return Err(Error::InvalidConfiguration {
                message: format!(
                    "base consumption must be finite and positive, got {}",
                    self.base_consumption_tons_per_nm
                ),
            });
        }
        if !self.service_speed_knots.is_finite() || self.service_speed_knots <= 0.0 {
            return Err(Error::InvalidConfiguration {
                message: format!(
                    "service speed must be finite and positive, got {}",
                    self.service_speed_knots
                ),
            });
        }
        Ok(())
    }
}
