//! Microclimate zone tables for the study area
//!
//! The city center is partitioned into five characteristic microclimate
//! zones (main square, commercial streets, parks, residential blocks, open
//! paved spaces). Each zone carries fixed offsets applied on top of the
//! scenario's meteorological input: a temperature offset from heat-island
//! and material effects, a wind reduction factor from building shelter, and
//! a humidity offset. Area shares sum to exactly 100%.
//!
//! The tables are static calibration data, kept as enumerated constants.

use serde::Serialize;

/// Surface class driving solar absorption in the radiant-temperature model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SurfaceClass {
    Urban,
    Grass,
    Water,
    Asphalt,
    Roof,
    Concrete,
}

impl SurfaceClass {
    /// Solar absorption coefficient used in the mean-radiant-temperature
    /// estimate. Vegetation and water absorb little (evapotranspiration,
    /// thermal mass); asphalt absorbs the most.
    #[must_use]
    pub fn solar_absorption(self) -> f64 {
        match self {
            SurfaceClass::Urban => 0.06,
            SurfaceClass::Grass => 0.02,
            SurfaceClass::Water => 0.01,
            SurfaceClass::Asphalt => 0.08,
            SurfaceClass::Roof => 0.07,
            SurfaceClass::Concrete => 0.065,
        }
    }

    /// Built surfaces contribute an extra radiative heat-island term.
    #[must_use]
    pub fn is_built(self) -> bool {
        matches!(
            self,
            SurfaceClass::Urban | SurfaceClass::Asphalt | SurfaceClass::Concrete
        )
    }
}

/// Season selecting default clothing insulation and metabolic rate.
///
/// Pedestrians dress for the season and adjust walking pace: brisk in
/// winter, deliberately slow in summer heat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Autumn,
}

impl Season {
    /// Clothing insulation in clo (winter coat down to summer shirt).
    #[must_use]
    pub fn clothing_clo(self) -> f64 {
        match self {
            Season::Winter => 2.0,
            Season::Spring => 0.8,
            Season::Summer => 0.4,
            Season::Autumn => 1.0,
        }
    }

    /// Metabolic rate in met for typical outdoor walking pace.
    #[must_use]
    pub fn metabolic_met(self) -> f64 {
        match self {
            Season::Winter => 1.4,
            Season::Spring => 1.2,
            Season::Summer => 1.0,
            Season::Autumn => 1.3,
        }
    }
}

/// Clothing insulation when no season is given.
pub const DEFAULT_CLO: f64 = 0.7;
/// Metabolic rate when no season is given.
pub const DEFAULT_MET: f64 = 1.2;

/// One fixed microclimate zone of the study area.
#[derive(Debug, Clone, Copy)]
pub struct ThermalZone {
    /// Stable identifier used as the zone key in results and point fields.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Dominant surface class.
    pub surface: SurfaceClass,
    /// Air temperature offset in °C over the scenario input.
    pub temp_offset: f64,
    /// Wind speed multiplier (building shelter), 0..=1.
    pub wind_reduction: f64,
    /// Relative humidity offset in percentage points.
    pub humidity_offset: f64,
    /// Share of the study area in percent.
    pub area_percent: f64,
}

/// The five microclimate zones. Area shares sum to 100.
pub const URBAN_ZONES: [ThermalZone; 5] = [
    // Cobbled main square: strong heat island, sheltered, dry
    ThermalZone {
        id: "main_square",
        name: "Main square",
        surface: SurfaceClass::Urban,
        temp_offset: 3.0,
        wind_reduction: 0.7,
        humidity_offset: -5.0,
        area_percent: 8.0,
    },
    // Street canyons with traffic
    ThermalZone {
        id: "commercial_streets",
        name: "Commercial streets",
        surface: SurfaceClass::Asphalt,
        temp_offset: 2.5,
        wind_reduction: 0.5,
        humidity_offset: -3.0,
        area_percent: 25.0,
    },
    // Evapotranspiration cooling, natural shade
    ThermalZone {
        id: "parks_green",
        name: "Parks and greens",
        surface: SurfaceClass::Grass,
        temp_offset: -2.0,
        wind_reduction: 0.9,
        humidity_offset: 8.0,
        area_percent: 15.0,
    },
    // Low-rise housing, moderate heat island
    ThermalZone {
        id: "residential",
        name: "Residential blocks",
        surface: SurfaceClass::Urban,
        temp_offset: 1.0,
        wind_reduction: 0.8,
        humidity_offset: 0.0,
        area_percent: 35.0,
    },
    // Parking lots and plazas, full solar exposure, no shelter
    ThermalZone {
        id: "open_spaces",
        name: "Open spaces",
        surface: SurfaceClass::Concrete,
        temp_offset: 2.8,
        wind_reduction: 1.0,
        humidity_offset: -8.0,
        area_percent: 17.0,
    },
];
