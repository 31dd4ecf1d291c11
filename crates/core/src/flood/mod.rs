//! Urban flood inundation simulator
//!
//! Implements a simplified rainfall-excess hydrological model for a fixed
//! urban study area. The chain is: effective rainfall after infiltration →
//! excess above storm-drain capacity → accumulated surface water → empirical
//! depth/extent model → risk classification → building, population, and
//! economic impact → deterministic flood-zone point field for map display.
//!
//! The depth and extent relations are empirical, calibrated for mid-size
//! Central European city centers; they are not a Saint-Venant solver and do
//! not resolve terrain (see crate-level non-goals).

use crate::config::{ConfigError, LocationConfig, SiteConfig};
use crate::export::{
    normalize_scenario_key, unix_now_s, write_envelope, ExportEnvelope, ExportError,
    ExportMetadata,
};
use crate::sampling::{scenario_seed, ScenarioRng};
use rustc_hash::FxHashMap;
use serde::Serialize;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

/// Producing module name used in result envelopes.
pub const MODULE: &str = "FloodSim";
/// Model identifier recorded in every result.
pub const MODEL_VERSION: &str = "FloodSim_v2.1";
/// Export metadata version.
const EXPORT_VERSION: &str = "2.1.0";

/// Ordered flood risk bands classified from maximum inundation depth.
///
/// Boundaries are half-open on the low side: a depth exactly at a threshold
/// falls into the higher band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FloodRiskLevel {
    /// No significant inundation (< 0.05 m).
    Minimal,
    /// Sidewalk-level ponding (< 0.15 m).
    Low,
    /// Roadway inundation (< 0.40 m).
    Moderate,
    /// Hazard to vehicles (< 0.80 m).
    High,
    /// Life-threatening depths (≥ 0.80 m).
    Critical,
}

impl FloodRiskLevel {
    /// Classify a maximum depth in meters into a risk band.
    #[must_use]
    pub fn from_depth(max_depth_m: f64) -> Self {
        if max_depth_m < 0.05 {
            FloodRiskLevel::Minimal
        } else if max_depth_m < 0.15 {
            FloodRiskLevel::Low
        } else if max_depth_m < 0.40 {
            FloodRiskLevel::Moderate
        } else if max_depth_m < 0.80 {
            FloodRiskLevel::High
        } else {
            FloodRiskLevel::Critical
        }
    }

    /// Integer severity score, 1 (minimal) to 5 (critical).
    #[must_use]
    pub fn score(self) -> u8 {
        match self {
            FloodRiskLevel::Minimal => 1,
            FloodRiskLevel::Low => 2,
            FloodRiskLevel::Moderate => 3,
            FloodRiskLevel::High => 4,
            FloodRiskLevel::Critical => 5,
        }
    }
}

/// Surface category of a generated flood-zone point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SurfaceType {
    Road,
    Sidewalk,
    Green,
    Plaza,
}

/// Rainfall partitioning for one event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RainfallBalance {
    /// Rainfall intensity remaining after soil infiltration (mm/h).
    pub effective_mm_h: f64,
    /// Intensity exceeding storm-drain capacity (mm/h).
    pub excess_mm_h: f64,
    /// Accumulated surface-water proxy over the event (mm), after applying
    /// the runoff coefficient.
    pub total_excess_mm: f64,
}

/// One synthetic flood-zone sample for map visualization.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FloodZonePoint {
    pub lat: f64,
    pub lng: f64,
    pub depth_m: f64,
    pub elevation_m: f64,
    pub flow_velocity_ms: f64,
    /// 1-based zone identifier in generation order.
    pub zone_id: u32,
    pub surface_type: SurfaceType,
}

/// Input echo block of a flood result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FloodParameters {
    pub rainfall_mm_h: f64,
    pub duration_h: f64,
    pub total_rainfall_mm: f64,
    pub effective_rainfall_mm: f64,
    pub excess_rainfall_mm: f64,
    pub runoff_coefficient: f64,
}

/// Hydraulic calibration echo block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HydraulicConditions {
    pub drainage_capacity_mm_h: f64,
    pub infiltration_rate_mm_h: f64,
    pub manning_roughness: f64,
    pub urban_coverage_percent: f64,
}

/// Derived flood metrics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FloodMetrics {
    /// Maximum inundation depth in meters, capped at 3.0.
    pub max_depth_m: f64,
    /// Mean depth heuristic: 40% of the maximum.
    pub mean_depth_m: f64,
    pub flooded_area_km2: f64,
    pub flooded_area_percent: f64,
    pub total_volume_m3: f64,
    pub peak_flow_velocity_ms: f64,
    pub risk_level: FloodRiskLevel,
    pub risk_score: u8,
}

/// Building, population, and economic impact block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FloodImpact {
    pub buildings_total: u32,
    pub buildings_at_risk: u32,
    pub affected_population: u32,
    pub economic_damage_pln: u64,
    pub economic_damage_eur: u64,
    pub evacuation_needed: bool,
}

/// Map-display hints attached to detailed results.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FloodVisualization {
    pub center_lat: f64,
    pub center_lng: f64,
    pub zoom_level: u8,
    pub color_scale: &'static str,
    pub max_marker_size: u8,
}

/// Complete result of one flood scenario.
#[derive(Debug, Clone, Serialize)]
pub struct FloodResult {
    pub scenario_name: String,
    pub module: &'static str,
    pub model_version: &'static str,
    /// Wall-clock duration of this call in milliseconds. The only
    /// non-deterministic field of the result.
    pub computation_time_ms: f64,
    pub parameters: FloodParameters,
    pub hydraulic_conditions: HydraulicConditions,
    pub metrics: FloodMetrics,
    pub impact_assessment: FloodImpact,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flood_zones: Option<Vec<FloodZonePoint>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visualization: Option<FloodVisualization>,
}

/// One entry of a batch run.
#[derive(Debug, Clone)]
pub struct FloodScenario {
    pub rainfall_mm_h: f64,
    pub duration_h: f64,
    pub name: String,
}

/// Calibration echo written into the export envelope.
#[derive(Debug, Clone, Serialize)]
pub struct FloodCalibration {
    pub urban_coverage: f64,
    pub drainage_capacity_mm_h: f64,
    pub infiltration_rate_mm_h: f64,
    pub runoff_coefficient: f64,
}

/// Flood inundation simulator for a fixed urban study area.
///
/// Stateless per call: [`FloodSimulator::simulate`] reads the immutable
/// location and calibration constants and returns a fresh [`FloodResult`].
///
/// # Example
/// ```
/// use urban_sim_core::{FloodRiskLevel, FloodSimulator, SiteConfig};
///
/// let config = SiteConfig::from_json_str(
///     r#"{"location": {"center_lat": 54.10, "center_lng": 22.95,
///         "area_km2": 5.0, "elevation_avg": 163.0}}"#,
/// )
/// .unwrap();
/// let sim = FloodSimulator::new(config).unwrap();
/// let result = sim.simulate(65.0, 2.0, "Intense rain", true);
/// assert_eq!(result.metrics.risk_level, FloodRiskLevel::Moderate);
/// ```
pub struct FloodSimulator {
    location: LocationConfig,

    // Hydrological calibration for a mid-size city center
    urban_coverage: f64,
    drainage_capacity_mm_h: f64,
    infiltration_rate_mm_h: f64,
    runoff_coefficient: f64,

    // Hydraulic constants
    manning_n: f64,
    max_flow_velocity_ms: f64,
}

impl FloodSimulator {
    /// Create a simulator from a validated site configuration.
    ///
    /// # Errors
    /// Returns [`ConfigError`] when the configuration fails validation.
    pub fn new(config: SiteConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        info!(
            area_km2 = config.location.area_km2,
            "flood simulator initialized"
        );
        Ok(Self {
            location: config.location,
            urban_coverage: 0.25,
            drainage_capacity_mm_h: 40.0,
            infiltration_rate_mm_h: 8.0,
            runoff_coefficient: 0.75,
            manning_n: 0.035,
            max_flow_velocity_ms: 5.0,
        })
    }

    /// Partition rainfall into effective intensity, drain excess, and the
    /// accumulated surface-water proxy.
    ///
    /// # Formula
    /// ```text
    /// effective = max(0, rainfall − infiltration)
    /// excess    = max(0, effective − drainage_capacity)
    /// total     = excess × duration × runoff_coefficient
    /// ```
    ///
    /// All three are monotonically non-decreasing in rainfall intensity and
    /// duration; zero rainfall always yields zero excess.
    #[must_use]
    pub fn effective_rainfall(&self, rainfall_mm_h: f64, duration_h: f64) -> RainfallBalance {
        let effective_mm_h = (rainfall_mm_h - self.infiltration_rate_mm_h).max(0.0);
        let excess_mm_h = (effective_mm_h - self.drainage_capacity_mm_h).max(0.0);
        let total_excess_mm = excess_mm_h * duration_h * self.runoff_coefficient;
        RainfallBalance {
            effective_mm_h,
            excess_mm_h,
            total_excess_mm,
        }
    }

    /// Empirical depth/extent model.
    ///
    /// Returns `(max_depth_m, flooded_area_percent)`. Depth is capped at
    /// 3.0 m; flooded area at 100%. Zero excess yields exactly zero for
    /// both.
    #[must_use]
    pub fn flood_depths(&self, total_excess_mm: f64) -> (f64, f64) {
        if total_excess_mm <= 0.0 {
            return (0.0, 0.0);
        }

        // Depth calibration accounts for natural depressions and the road
        // network acting as a collector.
        let depth_factor = 0.8;
        let max_depth_m = (total_excess_mm / 100.0 * depth_factor).min(3.0);

        let area_factor = 1.2;
        let flooded_area_percent = (total_excess_mm * area_factor).min(100.0);

        (max_depth_m, flooded_area_percent)
    }

    /// Estimate buildings exposed and population affected.
    ///
    /// Census-style densities for a city center: 350 buildings/km², 60%
    /// occupancy inside the inundated zone, 3 residents per building.
    #[must_use]
    pub fn building_impact(&self, flooded_area_km2: f64) -> (u32, u32, u32) {
        let buildings_per_km2 = 350.0;
        let occupancy_rate = 0.6;
        let residents_per_building = 3;

        let total = (self.location.area_km2 * buildings_per_km2 * self.urban_coverage) as u32;
        let at_risk =
            ((flooded_area_km2 * buildings_per_km2 * occupancy_rate) as u32).min(total);
        let affected_population = at_risk * residents_per_building;

        (total, at_risk, affected_population)
    }

    /// Estimate economic damage in PLN.
    ///
    /// Fixed cost per affected building plus an infrastructure rate per m³
    /// of flood water.
    #[must_use]
    pub fn economic_damage(&self, buildings_at_risk: u32, total_volume_m3: f64) -> u64 {
        let damage_per_building = 50_000.0;
        let infrastructure_damage_rate = 10.0;

        let total =
            f64::from(buildings_at_risk) * damage_per_building
                + total_volume_m3 * infrastructure_damage_rate;
        total.max(0.0) as u64
    }

    /// Generate the deterministic flood-zone point field.
    ///
    /// Seeded from the scenario name; the point count scales with flooded
    /// area (clamped to 5..=50). Depths follow an exponential distribution
    /// capped at the maximum depth; velocities use a Manning-Strickler-style
    /// `√depth` relation capped at the configured maximum.
    #[must_use]
    pub fn generate_flood_zones(
        &self,
        scenario_name: &str,
        max_depth_m: f64,
        flooded_area_percent: f64,
    ) -> Vec<FloodZonePoint> {
        let mut rng = ScenarioRng::from_seed(scenario_seed(scenario_name));

        let num_zones = ((flooded_area_percent * 0.8) as usize).clamp(5, 50);

        let surface_weights = [
            (SurfaceType::Road, 0.40),
            (SurfaceType::Sidewalk, 0.25),
            (SurfaceType::Green, 0.20),
            (SurfaceType::Plaza, 0.15),
        ];

        let mut zones = Vec::with_capacity(num_zones);
        for i in 0..num_zones {
            // ~±900 m / ±1200 m around the center
            let lat = rng.normal(self.location.center_lat, 0.008);
            let lng = rng.normal(self.location.center_lng, 0.012);

            // Exponential depths: shallow ponding dominates. Floor first,
            // cap last, so no point ever exceeds the scenario maximum.
            let depth_m = if max_depth_m > 0.0 {
                rng.exponential(max_depth_m * 0.6).max(0.02).min(max_depth_m)
            } else {
                0.02
            };

            let flow_velocity_ms = if depth_m > 0.0 {
                (depth_m.sqrt() * 1.5).min(self.max_flow_velocity_ms)
            } else {
                0.0
            };

            let elevation_m = rng.normal(self.location.elevation_avg, 2.0);
            let surface_type = *rng.weighted_choice(&surface_weights);

            zones.push(FloodZonePoint {
                lat,
                lng,
                depth_m,
                elevation_m,
                flow_velocity_ms,
                zone_id: (i + 1) as u32,
                surface_type,
            });
        }

        zones
    }

    /// Run one flood scenario.
    ///
    /// With `detailed` set, the result carries the flood-zone point field
    /// and visualization hints; otherwise both are omitted to keep the
    /// result small.
    #[must_use]
    pub fn simulate(
        &self,
        rainfall_mm_h: f64,
        duration_h: f64,
        scenario_name: &str,
        detailed: bool,
    ) -> FloodResult {
        let started = Instant::now();
        info!(
            scenario = scenario_name,
            rainfall_mm_h, duration_h, "flood scenario"
        );

        let balance = self.effective_rainfall(rainfall_mm_h, duration_h);
        let (max_depth_m, flooded_area_percent) = self.flood_depths(balance.total_excess_mm);
        let flooded_area_km2 = flooded_area_percent / 100.0 * self.location.area_km2;

        let risk_level = FloodRiskLevel::from_depth(max_depth_m);
        let (buildings_total, buildings_at_risk, affected_population) =
            self.building_impact(flooded_area_km2);

        // Mean depth heuristic: 40% of the maximum
        let total_volume_m3 = flooded_area_km2 * 1e6 * (max_depth_m * 0.4);
        let economic_damage_pln = self.economic_damage(buildings_at_risk, total_volume_m3);

        debug!(
            total_excess_mm = balance.total_excess_mm,
            max_depth_m, flooded_area_percent, ?risk_level, "flood hydrology"
        );

        let (flood_zones, visualization) = if detailed {
            (
                Some(self.generate_flood_zones(
                    scenario_name,
                    max_depth_m,
                    flooded_area_percent,
                )),
                Some(FloodVisualization {
                    center_lat: self.location.center_lat,
                    center_lng: self.location.center_lng,
                    zoom_level: 14,
                    color_scale: "Blues",
                    max_marker_size: 20,
                }),
            )
        } else {
            (None, None)
        };

        let peak_flow_velocity_ms = if max_depth_m > 0.0 {
            (max_depth_m.sqrt() * 1.5).min(self.max_flow_velocity_ms)
        } else {
            0.0
        };

        FloodResult {
            scenario_name: scenario_name.to_string(),
            module: MODULE,
            model_version: MODEL_VERSION,
            computation_time_ms: started.elapsed().as_secs_f64() * 1e3,
            parameters: FloodParameters {
                rainfall_mm_h,
                duration_h,
                total_rainfall_mm: rainfall_mm_h * duration_h,
                effective_rainfall_mm: balance.effective_mm_h * duration_h,
                excess_rainfall_mm: balance.excess_mm_h * duration_h,
                runoff_coefficient: self.runoff_coefficient,
            },
            hydraulic_conditions: HydraulicConditions {
                drainage_capacity_mm_h: self.drainage_capacity_mm_h,
                infiltration_rate_mm_h: self.infiltration_rate_mm_h,
                manning_roughness: self.manning_n,
                urban_coverage_percent: self.urban_coverage * 100.0,
            },
            metrics: FloodMetrics {
                max_depth_m,
                mean_depth_m: max_depth_m * 0.4,
                flooded_area_km2,
                flooded_area_percent,
                total_volume_m3,
                peak_flow_velocity_ms,
                risk_level,
                risk_score: risk_level.score(),
            },
            impact_assessment: FloodImpact {
                buildings_total,
                buildings_at_risk,
                affected_population,
                economic_damage_pln,
                economic_damage_eur: (economic_damage_pln as f64 / 4.5) as u64,
                evacuation_needed: max_depth_m > 0.5,
            },
            flood_zones,
            visualization,
        }
    }

    /// Run a list of scenarios sequentially.
    ///
    /// Results are keyed by normalized scenario name; key collisions
    /// silently overwrite earlier entries.
    #[must_use]
    pub fn batch_simulate(&self, scenarios: &[FloodScenario]) -> FxHashMap<String, FloodResult> {
        info!(count = scenarios.len(), "flood batch simulation");
        let mut results = FxHashMap::default();
        for scenario in scenarios {
            let result = self.simulate(
                scenario.rainfall_mm_h,
                scenario.duration_h,
                &scenario.name,
                true,
            );
            results.insert(normalize_scenario_key(&scenario.name), result);
        }
        results
    }

    /// Export batch results under the `{metadata, configuration, results}`
    /// envelope.
    ///
    /// # Errors
    /// Returns [`ExportError`] when serialization or the write fails.
    pub fn export_results(
        &self,
        results: FxHashMap<String, FloodResult>,
        path: impl AsRef<Path>,
    ) -> Result<(), ExportError> {
        let envelope = ExportEnvelope {
            metadata: ExportMetadata {
                module: MODULE,
                version: EXPORT_VERSION,
                location: self.location.clone(),
                generated_unix_s: unix_now_s(),
                scenarios_count: results.len(),
            },
            configuration: FloodCalibration {
                urban_coverage: self.urban_coverage,
                drainage_capacity_mm_h: self.drainage_capacity_mm_h,
                infiltration_rate_mm_h: self.infiltration_rate_mm_h,
                runoff_coefficient: self.runoff_coefficient,
            },
            results,
        };
        write_envelope(path, &envelope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_config;
    use approx::assert_relative_eq;

    fn simulator() -> FloodSimulator {
        FloodSimulator::new(test_config()).unwrap()
    }

    #[test]
    fn test_intense_rain_reference_scenario() {
        // 65 mm/h for 2 h: effective 57, excess 17, total 25.5 mm,
        // depth 0.204 m → MODERATE
        let sim = simulator();
        let balance = sim.effective_rainfall(65.0, 2.0);
        assert_relative_eq!(balance.effective_mm_h, 57.0);
        assert_relative_eq!(balance.excess_mm_h, 17.0);
        assert_relative_eq!(balance.total_excess_mm, 25.5);

        let (depth, _) = sim.flood_depths(balance.total_excess_mm);
        assert_relative_eq!(depth, 0.204, max_relative = 1e-12);
        assert_eq!(FloodRiskLevel::from_depth(depth), FloodRiskLevel::Moderate);
    }

    #[test]
    fn test_light_rain_produces_no_excess() {
        // 5 mm/h is below the infiltration rate alone
        let sim = simulator();
        let balance = sim.effective_rainfall(5.0, 1.0);
        assert_eq!(balance.effective_mm_h, 0.0);
        assert_eq!(balance.excess_mm_h, 0.0);
        assert_eq!(balance.total_excess_mm, 0.0);

        let result = sim.simulate(5.0, 1.0, "Light rain", false);
        assert_eq!(result.metrics.max_depth_m, 0.0);
        assert_eq!(result.metrics.flooded_area_percent, 0.0);
        assert_eq!(result.metrics.risk_level, FloodRiskLevel::Minimal);
    }

    #[test]
    fn test_rainfall_monotonicity() {
        let sim = simulator();
        let mut last_excess = -1.0;
        let mut last_depth = -1.0;
        let mut last_area = -1.0;
        for rainfall in [0.0, 10.0, 48.0, 60.0, 90.0, 150.0, 300.0] {
            let balance = sim.effective_rainfall(rainfall, 2.0);
            let (depth, area) = sim.flood_depths(balance.total_excess_mm);
            assert!(balance.total_excess_mm >= last_excess);
            assert!(depth >= last_depth);
            assert!(area >= last_area);
            last_excess = balance.total_excess_mm;
            last_depth = depth;
            last_area = area;
        }
    }

    #[test]
    fn test_depth_ceiling_and_area_cap() {
        let sim = simulator();
        let balance = sim.effective_rainfall(1000.0, 10.0);
        let (depth, area) = sim.flood_depths(balance.total_excess_mm);
        assert_eq!(depth, 3.0);
        assert_eq!(area, 100.0);
    }

    #[test]
    fn test_risk_band_boundaries() {
        // Half-open on the low side: the threshold belongs to the next band
        assert_eq!(FloodRiskLevel::from_depth(0.0), FloodRiskLevel::Minimal);
        assert_eq!(FloodRiskLevel::from_depth(0.05), FloodRiskLevel::Low);
        assert_eq!(FloodRiskLevel::from_depth(0.15), FloodRiskLevel::Moderate);
        assert_eq!(FloodRiskLevel::from_depth(0.40), FloodRiskLevel::High);
        assert_eq!(FloodRiskLevel::from_depth(0.80), FloodRiskLevel::Critical);
        assert_eq!(FloodRiskLevel::from_depth(2.9), FloodRiskLevel::Critical);
    }

    #[test]
    fn test_buildings_at_risk_never_exceed_total() {
        let sim = simulator();
        let (total, at_risk, population) = sim.building_impact(100.0);
        assert!(at_risk <= total);
        assert_eq!(population, at_risk * 3);
    }

    #[test]
    fn test_flood_zone_field_is_deterministic() {
        let sim = simulator();
        let a = sim.generate_flood_zones("Storm surge", 0.8, 60.0);
        let b = sim.generate_flood_zones("Storm surge", 0.8, 60.0);
        assert_eq!(a, b);

        let c = sim.generate_flood_zones("Another storm", 0.8, 60.0);
        assert_ne!(a, c);
    }

    #[test]
    fn test_flood_zone_count_and_bounds() {
        let sim = simulator();

        // Tiny flooded area still produces the minimum of 5 points
        let few = sim.generate_flood_zones("Drizzle", 0.05, 1.0);
        assert_eq!(few.len(), 5);

        // 100% flooded clamps at 50 points
        let many = sim.generate_flood_zones("Deluge", 3.0, 100.0);
        assert_eq!(many.len(), 50);

        for (i, point) in many.iter().enumerate() {
            assert_eq!(point.zone_id, (i + 1) as u32);
            assert!(point.depth_m >= 0.02 && point.depth_m <= 3.0);
            assert!(point.flow_velocity_ms >= 0.0 && point.flow_velocity_ms <= 5.0);
        }
    }

    #[test]
    fn test_shallow_ponding_points_respect_depth_cap() {
        // 49 mm/h for 1 h leaves 0.75 mm of excess, 0.006 m peak depth.
        // The cap beats the 0.02 m floor: no point may exceed the scenario
        // maximum, however shallow.
        let sim = simulator();
        let balance = sim.effective_rainfall(49.0, 1.0);
        let (max_depth, flooded_percent) = sim.flood_depths(balance.total_excess_mm);
        assert!(max_depth > 0.0 && max_depth < 0.02);

        let zones = sim.generate_flood_zones("Barely wet", max_depth, flooded_percent);
        assert!(!zones.is_empty());
        for point in &zones {
            assert!(
                point.depth_m <= max_depth,
                "point depth {} exceeds max depth {max_depth}",
                point.depth_m
            );
        }
    }

    #[test]
    fn test_detailed_flag_controls_point_field() {
        let sim = simulator();
        let detailed = sim.simulate(65.0, 2.0, "Intense rain", true);
        assert!(detailed.flood_zones.is_some());
        assert!(detailed.visualization.is_some());

        let compact = sim.simulate(65.0, 2.0, "Intense rain", false);
        assert!(compact.flood_zones.is_none());
        assert!(compact.visualization.is_none());

        // Metrics are unaffected by the detail toggle
        assert_eq!(detailed.metrics, compact.metrics);
    }

    #[test]
    fn test_simulate_is_reproducible() {
        let sim = simulator();
        let a = sim.simulate(80.0, 3.0, "Cloudburst", true);
        let b = sim.simulate(80.0, 3.0, "Cloudburst", true);
        assert_eq!(a.metrics, b.metrics);
        assert_eq!(a.impact_assessment, b.impact_assessment);
        assert_eq!(a.flood_zones, b.flood_zones);
    }

    #[test]
    fn test_evacuation_threshold() {
        let sim = simulator();
        // total_excess 63.75 mm → depth 0.51 m
        let result = sim.simulate(133.0, 1.0, "Flash flood", false);
        assert!(result.metrics.max_depth_m > 0.5);
        assert!(result.impact_assessment.evacuation_needed);
    }

    #[test]
    fn test_batch_keys_are_normalized_and_overwrite() {
        let sim = simulator();
        let scenarios = vec![
            FloodScenario {
                rainfall_mm_h: 15.0,
                duration_h: 4.0,
                name: "Light Rain".to_string(),
            },
            FloodScenario {
                rainfall_mm_h: 65.0,
                duration_h: 2.0,
                name: "light rain".to_string(),
            },
        ];
        let results = sim.batch_simulate(&scenarios);
        // Both names normalize to the same key; the later run wins
        assert_eq!(results.len(), 1);
        assert_eq!(results["light_rain"].parameters.rainfall_mm_h, 65.0);
    }

    #[test]
    fn test_negative_rainfall_is_tolerated() {
        // Permissive inputs: nonsense flows through and is clamped downstream
        let sim = simulator();
        let result = sim.simulate(-20.0, 2.0, "Bad sensor", false);
        assert_eq!(result.metrics.max_depth_m, 0.0);
        assert_eq!(result.metrics.risk_level, FloodRiskLevel::Minimal);
    }
}
