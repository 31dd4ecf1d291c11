//! Pedestrian wind comfort (Lawson criteria) and structural wind loads
//!
//! Comfort bands follow the Lawson criteria on pedestrian-level wind
//! speed. Structural pressures use the dynamic pressure `q = ½ρv²` with
//! fixed pressure coefficients for a typical mid-rise urban geometry.

use serde::Serialize;

/// Lawson pedestrian comfort classification on wind speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PedestrianComfort {
    /// < 4 m/s: sitting and strolling.
    Comfortable,
    /// < 6 m/s: walking and short stays.
    Acceptable,
    /// < 8 m/s: brisk transit only.
    Unsuitable,
    /// < 12 m/s: walking is difficult.
    Dangerous,
    /// ≥ 12 m/s: outdoor presence untenable.
    ExtremelyDangerous,
}

impl PedestrianComfort {
    /// Classify a pedestrian-level wind speed in m/s.
    #[must_use]
    pub fn from_speed(speed_ms: f64) -> Self {
        if speed_ms < 4.0 {
            PedestrianComfort::Comfortable
        } else if speed_ms < 6.0 {
            PedestrianComfort::Acceptable
        } else if speed_ms < 8.0 {
            PedestrianComfort::Unsuitable
        } else if speed_ms < 12.0 {
            PedestrianComfort::Dangerous
        } else {
            PedestrianComfort::ExtremelyDangerous
        }
    }

    /// Severity score, 1 (comfortable) to 5.
    #[must_use]
    pub fn score(self) -> u8 {
        match self {
            PedestrianComfort::Comfortable => 1,
            PedestrianComfort::Acceptable => 2,
            PedestrianComfort::Unsuitable => 3,
            PedestrianComfort::Dangerous => 4,
            PedestrianComfort::ExtremelyDangerous => 5,
        }
    }

    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            PedestrianComfort::Comfortable => "Ideal conditions for outdoor activity",
            PedestrianComfort::Acceptable => "Suitable for walking and short stays",
            PedestrianComfort::Unsuitable => "Transit only, noticeable discomfort",
            PedestrianComfort::Dangerous => "Walking difficult, risk of falls",
            PedestrianComfort::ExtremelyDangerous => "Outdoor presence untenable",
        }
    }
}

/// Wind pressures on a typical urban building [Pa].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WindPressures {
    pub dynamic_pressure_pa: f64,
    pub windward_pressure_pa: f64,
    pub leeward_pressure_pa: f64,
    pub side_pressure_pa: f64,
    pub roof_windward_pa: f64,
    pub roof_leeward_pa: f64,
    /// Net windward-to-leeward difference driving overall drag.
    pub pressure_difference_pa: f64,
}

// Pressure coefficients for a mid-rise rectangular block
const CP_WINDWARD: f64 = 0.8;
const CP_LEEWARD: f64 = -0.5;
const CP_SIDE: f64 = -0.7;
const CP_ROOF_WINDWARD: f64 = -0.3;
const CP_ROOF_LEEWARD: f64 = -0.6;

/// Surface pressures from the dynamic pressure `q = ½ρv²`.
#[must_use]
pub fn wind_pressures(wind_speed: f64, air_density: f64) -> WindPressures {
    let q = 0.5 * air_density * wind_speed * wind_speed;
    WindPressures {
        dynamic_pressure_pa: q,
        windward_pressure_pa: q * CP_WINDWARD,
        leeward_pressure_pa: q * CP_LEEWARD,
        side_pressure_pa: q * CP_SIDE,
        roof_windward_pa: q * CP_ROOF_WINDWARD,
        roof_leeward_pa: q * CP_ROOF_LEEWARD,
        pressure_difference_pa: q * (CP_WINDWARD - CP_LEEWARD),
    }
}

/// Area-share distribution of comfort categories in percent.
///
/// Rows always sum to 100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ComfortDistribution {
    pub comfortable: f64,
    pub acceptable: f64,
    pub unsuitable: f64,
    pub dangerous: f64,
}

impl ComfortDistribution {
    /// Empirical distribution lookup on the average urban wind speed.
    #[must_use]
    pub fn for_average_speed(avg_speed_ms: f64) -> Self {
        if avg_speed_ms < 3.0 {
            Self { comfortable: 90.0, acceptable: 8.0, unsuitable: 2.0, dangerous: 0.0 }
        } else if avg_speed_ms < 5.0 {
            Self { comfortable: 70.0, acceptable: 20.0, unsuitable: 8.0, dangerous: 2.0 }
        } else if avg_speed_ms < 8.0 {
            Self { comfortable: 40.0, acceptable: 35.0, unsuitable: 20.0, dangerous: 5.0 }
        } else if avg_speed_ms < 12.0 {
            Self { comfortable: 15.0, acceptable: 25.0, unsuitable: 40.0, dangerous: 20.0 }
        } else {
            Self { comfortable: 5.0, acceptable: 10.0, unsuitable: 30.0, dangerous: 55.0 }
        }
    }

    /// Share of the area that is comfortable or acceptable.
    #[must_use]
    pub fn comfortable_percent(&self) -> f64 {
        self.comfortable + self.acceptable
    }
}
