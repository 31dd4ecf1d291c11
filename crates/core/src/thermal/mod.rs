//! Urban thermal comfort simulator
//!
//! Evaluates pedestrian thermal comfort (PMV, PPD, UTCI, PET) across the
//! five fixed microclimate zones of the study area, aggregates a city-wide
//! comfort picture, and synthesizes a deterministic comfort point field for
//! map display.
//!
//! Zone evaluation applies the zone's temperature, humidity, and wind
//! offsets to the scenario input, estimates a local mean radiant
//! temperature from the zone's surface class, and runs the configured PMV
//! model ([`PmvModel`]).

pub mod indices;
pub mod pmv;
pub mod zones;

use crate::config::{ConfigError, LocationConfig, SiteConfig};
use crate::export::{
    normalize_scenario_key, unix_now_s, write_envelope, ExportEnvelope, ExportError,
    ExportMetadata,
};
use crate::sampling::{salted_scenario_seed, ScenarioRng};
use indices::{
    humidity_comfort, mean_radiant_temperature, pet_simplified, solar_load,
    thermal_stress_category, utci_simplified, wind_comfort,
};
use pmv::{pmv_detailed, pmv_simplified, ppd_from_pmv, PmvModel};
use rustc_hash::FxHashMap;
use serde::Serialize;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};
use zones::{Season, SurfaceClass, ThermalZone, DEFAULT_CLO, DEFAULT_MET, URBAN_ZONES};

/// Producing module name used in result envelopes.
pub const MODULE: &str = "ThermalSim";
/// Model identifier recorded in every result.
pub const MODEL_VERSION: &str = "ThermalSim_v1.6_PMV_UTCI_PET";
/// Export metadata version.
const EXPORT_VERSION: &str = "1.6.0";

/// Five-step comfort classification on |PMV|.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComfortLevel {
    Excellent,
    Good,
    Acceptable,
    Poor,
    Unacceptable,
}

impl ComfortLevel {
    /// Classify from PMV magnitude.
    #[must_use]
    pub fn from_pmv(pmv: f64) -> Self {
        let magnitude = pmv.abs();
        if magnitude < 0.5 {
            ComfortLevel::Excellent
        } else if magnitude < 1.0 {
            ComfortLevel::Good
        } else if magnitude < 1.5 {
            ComfortLevel::Acceptable
        } else if magnitude < 2.0 {
            ComfortLevel::Poor
        } else {
            ComfortLevel::Unacceptable
        }
    }

    /// Numeric score, 5 (excellent) down to 1 (unacceptable).
    #[must_use]
    pub fn score(self) -> u8 {
        match self {
            ComfortLevel::Excellent => 5,
            ComfortLevel::Good => 4,
            ComfortLevel::Acceptable => 3,
            ComfortLevel::Poor => 2,
            ComfortLevel::Unacceptable => 1,
        }
    }
}

/// Direction of thermal stress at |PMV| > 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ThermalStress {
    Heat,
    Cold,
    Neutral,
}

impl ThermalStress {
    #[must_use]
    fn from_pmv(pmv: f64) -> Self {
        if pmv > 1.0 {
            ThermalStress::Heat
        } else if pmv < -1.0 {
            ThermalStress::Cold
        } else {
            ThermalStress::Neutral
        }
    }
}

/// Adaptive behavior recommendation for a signed PMV value.
#[must_use]
pub fn recommendation_for(pmv: f64) -> &'static str {
    if pmv > 2.0 {
        "Avoid exposure 10:00-18:00, seek shade, maintain hydration"
    } else if pmv > 1.0 {
        "Keep stays short, take frequent breaks in shade, hydrate"
    } else if pmv > 0.5 {
        "Comfortable conditions, longer stays possible"
    } else if pmv < -2.0 {
        "Wind protection and warm layers required, keep moving"
    } else if pmv < -1.0 {
        "Add a clothing layer, limit exposure time"
    } else if pmv < -0.5 {
        "Minor clothing adjustment, generally comfortable"
    } else {
        "Optimal thermal comfort conditions"
    }
}

/// Input echo block of a thermal result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThermalParameters {
    pub air_temperature_c: f64,
    pub relative_humidity_percent: f64,
    pub wind_speed_ms: f64,
    pub solar_radiation_wm2: f64,
    pub clothing_insulation_clo: f64,
    pub metabolic_rate_met: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub season: Option<Season>,
}

/// Categorical classification of the raw meteorological input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnvironmentalConditions {
    pub thermal_stress_category: &'static str,
    pub humidity_comfort: &'static str,
    pub wind_comfort: &'static str,
    pub solar_load: &'static str,
}

/// City-wide aggregation over all zones.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityMetrics {
    /// Area-weighted comfort score, 1 to 5.
    pub city_comfort_score: f64,
    /// Share of zones with |PMV| < 1.
    pub comfort_zones_percent: f64,
    /// Zones with PMV > 2.
    pub heat_stress_zones: u32,
    /// Zones with PMV < -2.
    pub cold_stress_zones: u32,
    /// Simple heat-island estimate: `max(0, ta − 20) × 0.15` °C.
    pub uhi_effect_estimated_c: f64,
}

/// Local meteorological conditions inside a zone.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneMicroclimate {
    pub air_temp_c: f64,
    pub mean_radiant_temp_c: f64,
    pub wind_speed_ms: f64,
    pub humidity_percent: f64,
    pub surface_type: SurfaceClass,
}

/// The four comfort indices of a zone.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComfortIndices {
    pub pmv: f64,
    pub ppd: f64,
    pub utci: f64,
    pub pet: f64,
}

/// Classification and advice derived from a zone's PMV.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ZoneAssessment {
    pub comfort_level: ComfortLevel,
    pub comfort_score: u8,
    pub recommendation: &'static str,
    pub thermal_stress: ThermalStress,
}

/// Full comfort evaluation of one microclimate zone.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneComfort {
    pub zone_id: &'static str,
    pub zone_name: &'static str,
    pub area_percent: f64,
    pub microclimate: ZoneMicroclimate,
    pub comfort_indices: ComfortIndices,
    pub assessment: ZoneAssessment,
}

/// One synthetic comfort sample for map visualization.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComfortPoint {
    pub lat: f64,
    pub lng: f64,
    pub pmv: f64,
    pub ppd: f64,
    pub utci: f64,
    pub pet: f64,
    pub zone_id: &'static str,
    pub surface_temp_c: f64,
    pub comfort_score: u8,
    pub microenvironment: SurfaceClass,
}

/// Map-display hints attached to detailed results.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThermalVisualization {
    pub center_lat: f64,
    pub center_lng: f64,
    pub zoom_level: u8,
    pub color_scale: &'static str,
    pub legend_title: &'static str,
}

/// Complete result of one thermal comfort scenario.
#[derive(Debug, Clone, Serialize)]
pub struct ThermalResult {
    pub scenario_name: String,
    pub module: &'static str,
    pub model_version: &'static str,
    /// Wall-clock duration of this call in milliseconds. The only
    /// non-deterministic field of the result.
    pub computation_time_ms: f64,
    pub parameters: ThermalParameters,
    pub environmental_conditions: EnvironmentalConditions,
    pub overall_metrics: CityMetrics,
    /// Per-zone evaluations in the fixed zone-table order.
    pub zone_analysis: Vec<ZoneComfort>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comfort_map: Option<Vec<ComfortPoint>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visualization: Option<ThermalVisualization>,
}

/// One entry of a batch run.
#[derive(Debug, Clone)]
pub struct ThermalScenario {
    pub air_temperature_c: f64,
    pub relative_humidity_percent: f64,
    pub wind_speed_ms: f64,
    pub solar_radiation_wm2: f64,
    pub name: String,
    pub season: Option<Season>,
}

/// Calibration echo written into the export envelope.
#[derive(Debug, Clone, Serialize)]
pub struct ThermalCalibration {
    pub urban_heat_island_max_c: f64,
    pub green_cooling_effect_c: f64,
    pub water_cooling_effect_c: f64,
    pub pmv_model: PmvModel,
}

/// Thermal comfort simulator for the fixed urban study area.
///
/// The PMV formulation is a construction-time strategy; see [`PmvModel`].
pub struct ThermalComfortSimulator {
    location: LocationConfig,
    pmv_model: PmvModel,

    // Microclimate calibration, echoed in exports
    urban_heat_island_max: f64,
    green_cooling_effect: f64,
    water_cooling_effect: f64,
}

impl ThermalComfortSimulator {
    /// Create a simulator from a validated site configuration and a PMV
    /// model choice.
    ///
    /// # Errors
    /// Returns [`ConfigError`] when the configuration fails validation.
    pub fn new(config: SiteConfig, pmv_model: PmvModel) -> Result<Self, ConfigError> {
        config.validate()?;
        info!(
            area_km2 = config.location.area_km2,
            ?pmv_model,
            "thermal comfort simulator initialized"
        );
        Ok(Self {
            location: config.location,
            pmv_model,
            urban_heat_island_max: 4.0,
            green_cooling_effect: -2.5,
            water_cooling_effect: -1.5,
        })
    }

    /// Evaluate comfort inside one microclimate zone.
    ///
    /// Applies the zone offsets (humidity clamped to [20, 95]%, wind scaled
    /// by the shelter factor), derives the local radiant temperature, and
    /// evaluates all four indices. UTCI and PET always use the simplified
    /// correlations; PMV follows the configured model.
    #[must_use]
    pub fn evaluate_zone(
        &self,
        zone: &ThermalZone,
        ta: f64,
        rh: f64,
        va: f64,
        solar_rad: f64,
        met: f64,
        clo: f64,
    ) -> ZoneComfort {
        let local_temp = ta + zone.temp_offset;
        let local_humidity = (rh + zone.humidity_offset).clamp(20.0, 95.0);
        let local_wind = va * zone.wind_reduction;

        let local_tmrt = mean_radiant_temperature(local_temp, solar_rad, zone.surface);

        let pmv = match self.pmv_model {
            PmvModel::Detailed => {
                pmv_detailed(local_temp, local_tmrt, local_wind, local_humidity, met, clo)
            }
            PmvModel::Simplified => {
                pmv_simplified(local_temp, local_tmrt, local_wind, local_humidity, met, clo)
            }
        };
        let ppd = ppd_from_pmv(pmv);
        let utci = utci_simplified(local_temp, local_tmrt, local_wind, local_humidity);
        let pet = pet_simplified(local_temp, local_tmrt, local_wind, local_humidity, met, clo);

        let comfort_level = ComfortLevel::from_pmv(pmv);

        ZoneComfort {
            zone_id: zone.id,
            zone_name: zone.name,
            area_percent: zone.area_percent,
            microclimate: ZoneMicroclimate {
                air_temp_c: local_temp,
                mean_radiant_temp_c: local_tmrt,
                wind_speed_ms: local_wind,
                humidity_percent: local_humidity,
                surface_type: zone.surface,
            },
            comfort_indices: ComfortIndices { pmv, ppd, utci, pet },
            assessment: ZoneAssessment {
                comfort_level,
                comfort_score: comfort_level.score(),
                recommendation: recommendation_for(pmv),
                thermal_stress: ThermalStress::from_pmv(pmv),
            },
        }
    }

    /// Generate the deterministic comfort point field.
    ///
    /// Seeded from the scenario name salted with the quantized city comfort
    /// score. The point count grows with the spread of zone PMVs (more
    /// contrast, more samples), clamped to 30..=80. Each point is assigned
    /// a zone by area-weighted draw and perturbs that zone's indices with
    /// small normal variations; PPD is recomputed from the perturbed PMV so
    /// the pair stays consistent.
    #[must_use]
    pub fn generate_comfort_points(
        &self,
        scenario_name: &str,
        zone_results: &[ZoneComfort],
        overall_score: f64,
    ) -> Vec<ComfortPoint> {
        let salt = (overall_score * 1000.0).round().max(0.0) as u64;
        let mut rng = ScenarioRng::from_seed(salted_scenario_seed(scenario_name, salt));

        // Population variance of zone PMVs
        let n = zone_results.len() as f64;
        let mean_pmv: f64 =
            zone_results.iter().map(|z| z.comfort_indices.pmv).sum::<f64>() / n;
        let variance: f64 = zone_results
            .iter()
            .map(|z| (z.comfort_indices.pmv - mean_pmv).powi(2))
            .sum::<f64>()
            / n;

        let num_points = ((variance * 50.0 + 40.0) as usize).clamp(30, 80);

        let zone_weights: Vec<(usize, f64)> = zone_results
            .iter()
            .enumerate()
            .map(|(i, z)| (i, z.area_percent / 100.0))
            .collect();

        let mut points = Vec::with_capacity(num_points);
        for _ in 0..num_points {
            let lat = rng.normal(self.location.center_lat, 0.008);
            let lng = rng.normal(self.location.center_lng, 0.012);

            let zone = &zone_results[*rng.weighted_choice(&zone_weights)];

            let pmv = (zone.comfort_indices.pmv + rng.normal(0.0, 0.3)).clamp(-3.0, 3.0);
            let utci = zone.comfort_indices.utci + rng.normal(0.0, 2.0);
            let pet = zone.comfort_indices.pet + rng.normal(0.0, 2.5);
            let surface_temp_c = zone.microclimate.mean_radiant_temp_c + rng.normal(0.0, 3.0);

            points.push(ComfortPoint {
                lat,
                lng,
                pmv,
                ppd: ppd_from_pmv(pmv),
                utci,
                pet,
                zone_id: zone.zone_id,
                surface_temp_c,
                comfort_score: (5.0 - pmv.abs()).round().clamp(1.0, 5.0) as u8,
                microenvironment: zone.microclimate.surface_type,
            });
        }

        points
    }

    /// Run one thermal comfort scenario.
    ///
    /// `season` selects the clothing/activity defaults; `None` falls back
    /// to 0.7 clo and 1.2 met. With `detailed` set, the result carries the
    /// comfort point field and visualization hints.
    #[must_use]
    pub fn simulate(
        &self,
        ta: f64,
        rh: f64,
        va: f64,
        solar_rad: f64,
        scenario_name: &str,
        season: Option<Season>,
        detailed: bool,
    ) -> ThermalResult {
        let started = Instant::now();
        info!(
            scenario = scenario_name,
            ta, rh, va, solar_rad, "thermal comfort scenario"
        );

        let clo = season.map_or(DEFAULT_CLO, Season::clothing_clo);
        let met = season.map_or(DEFAULT_MET, Season::metabolic_met);

        let zone_analysis: Vec<ZoneComfort> = URBAN_ZONES
            .iter()
            .map(|zone| self.evaluate_zone(zone, ta, rh, va, solar_rad, met, clo))
            .collect();

        let city_comfort_score: f64 = zone_analysis
            .iter()
            .map(|z| f64::from(z.assessment.comfort_score) * z.area_percent / 100.0)
            .sum();

        let comfortable = zone_analysis
            .iter()
            .filter(|z| z.comfort_indices.pmv.abs() < 1.0)
            .count();
        let comfort_zones_percent = comfortable as f64 / zone_analysis.len() as f64 * 100.0;

        let heat_stress_zones =
            zone_analysis.iter().filter(|z| z.comfort_indices.pmv > 2.0).count() as u32;
        let cold_stress_zones =
            zone_analysis.iter().filter(|z| z.comfort_indices.pmv < -2.0).count() as u32;

        debug!(
            city_comfort_score,
            comfort_zones_percent, heat_stress_zones, cold_stress_zones, "city aggregation"
        );

        let (comfort_map, visualization) = if detailed {
            (
                Some(self.generate_comfort_points(
                    scenario_name,
                    &zone_analysis,
                    city_comfort_score,
                )),
                Some(ThermalVisualization {
                    center_lat: self.location.center_lat,
                    center_lng: self.location.center_lng,
                    zoom_level: 14,
                    color_scale: "RdYlBu_r",
                    legend_title: "PMV Comfort Scale",
                }),
            )
        } else {
            (None, None)
        };

        ThermalResult {
            scenario_name: scenario_name.to_string(),
            module: MODULE,
            model_version: MODEL_VERSION,
            computation_time_ms: started.elapsed().as_secs_f64() * 1e3,
            parameters: ThermalParameters {
                air_temperature_c: ta,
                relative_humidity_percent: rh,
                wind_speed_ms: va,
                solar_radiation_wm2: solar_rad,
                clothing_insulation_clo: clo,
                metabolic_rate_met: met,
                season,
            },
            environmental_conditions: EnvironmentalConditions {
                thermal_stress_category: thermal_stress_category(ta),
                humidity_comfort: humidity_comfort(rh),
                wind_comfort: wind_comfort(va),
                solar_load: solar_load(solar_rad),
            },
            overall_metrics: CityMetrics {
                city_comfort_score,
                comfort_zones_percent,
                heat_stress_zones,
                cold_stress_zones,
                uhi_effect_estimated_c: (ta - 20.0).max(0.0) * 0.15,
            },
            zone_analysis,
            comfort_map,
            visualization,
        }
    }

    /// Run a list of scenarios sequentially.
    ///
    /// Results are keyed by normalized scenario name; key collisions
    /// silently overwrite earlier entries.
    #[must_use]
    pub fn batch_simulate(
        &self,
        scenarios: &[ThermalScenario],
    ) -> FxHashMap<String, ThermalResult> {
        info!(count = scenarios.len(), "thermal batch simulation");
        let mut results = FxHashMap::default();
        for scenario in scenarios {
            let result = self.simulate(
                scenario.air_temperature_c,
                scenario.relative_humidity_percent,
                scenario.wind_speed_ms,
                scenario.solar_radiation_wm2,
                &scenario.name,
                scenario.season,
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
        results: FxHashMap<String, ThermalResult>,
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
            configuration: ThermalCalibration {
                urban_heat_island_max_c: self.urban_heat_island_max,
                green_cooling_effect_c: self.green_cooling_effect,
                water_cooling_effect_c: self.water_cooling_effect,
                pmv_model: self.pmv_model,
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

    fn simulator(model: PmvModel) -> ThermalComfortSimulator {
        ThermalComfortSimulator::new(test_config(), model).unwrap()
    }

    #[test]
    fn test_all_five_zones_evaluated_in_order() {
        let sim = simulator(PmvModel::Detailed);
        let result = sim.simulate(22.0, 55.0, 1.5, 400.0, "Mild day", Some(Season::Summer), false);
        assert_eq!(result.zone_analysis.len(), 5);
        let ids: Vec<_> = result.zone_analysis.iter().map(|z| z.zone_id).collect();
        assert_eq!(
            ids,
            ["main_square", "commercial_streets", "parks_green", "residential", "open_spaces"]
        );
    }

    #[test]
    fn test_green_zone_is_coolest_on_a_hot_day() {
        let sim = simulator(PmvModel::Detailed);
        let result = sim.simulate(32.0, 45.0, 1.0, 800.0, "Heat wave", Some(Season::Summer), false);
        let park_pmv = result
            .zone_analysis
            .iter()
            .find(|z| z.zone_id == "parks_green")
            .unwrap()
            .comfort_indices
            .pmv;
        for zone in &result.zone_analysis {
            if zone.zone_id != "parks_green" {
                assert!(
                    park_pmv <= zone.comfort_indices.pmv,
                    "park should be no warmer than {}",
                    zone.zone_id
                );
            }
        }
    }

    #[test]
    fn test_season_defaults_applied() {
        let sim = simulator(PmvModel::Simplified);
        let winter = sim.simulate(-5.0, 75.0, 3.0, 50.0, "Frost", Some(Season::Winter), false);
        assert_eq!(winter.parameters.clothing_insulation_clo, 2.0);
        assert_eq!(winter.parameters.metabolic_rate_met, 1.4);

        let unknown = sim.simulate(20.0, 50.0, 1.0, 300.0, "No season", None, false);
        assert_eq!(unknown.parameters.clothing_insulation_clo, 0.7);
        assert_eq!(unknown.parameters.metabolic_rate_met, 1.2);
    }

    #[test]
    fn test_city_score_is_area_weighted_and_in_range() {
        let sim = simulator(PmvModel::Detailed);
        let result = sim.simulate(22.0, 55.0, 1.5, 400.0, "Mild day", Some(Season::Summer), false);
        let expected: f64 = result
            .zone_analysis
            .iter()
            .map(|z| f64::from(z.assessment.comfort_score) * z.area_percent / 100.0)
            .sum();
        assert_relative_eq!(result.overall_metrics.city_comfort_score, expected);
        assert!(result.overall_metrics.city_comfort_score >= 1.0);
        assert!(result.overall_metrics.city_comfort_score <= 5.0);
    }

    #[test]
    fn test_heat_wave_flags_stress_zones() {
        let sim = simulator(PmvModel::Detailed);
        let result = sim.simulate(36.0, 40.0, 0.5, 900.0, "Extreme heat", Some(Season::Summer), false);
        assert!(result.overall_metrics.heat_stress_zones > 0);
        assert_eq!(result.overall_metrics.cold_stress_zones, 0);
        assert_eq!(result.environmental_conditions.thermal_stress_category, "hot");
    }

    #[test]
    fn test_uhi_estimate() {
        let sim = simulator(PmvModel::Simplified);
        let warm = sim.simulate(30.0, 50.0, 1.0, 500.0, "Warm", None, false);
        assert_relative_eq!(warm.overall_metrics.uhi_effect_estimated_c, 1.5);

        let cool = sim.simulate(10.0, 50.0, 1.0, 100.0, "Cool", None, false);
        assert_eq!(cool.overall_metrics.uhi_effect_estimated_c, 0.0);
    }

    #[test]
    fn test_comfort_level_bands() {
        assert_eq!(ComfortLevel::from_pmv(0.2), ComfortLevel::Excellent);
        assert_eq!(ComfortLevel::from_pmv(-0.7), ComfortLevel::Good);
        assert_eq!(ComfortLevel::from_pmv(1.2), ComfortLevel::Acceptable);
        assert_eq!(ComfortLevel::from_pmv(-1.7), ComfortLevel::Poor);
        assert_eq!(ComfortLevel::from_pmv(2.5), ComfortLevel::Unacceptable);
        assert_eq!(ComfortLevel::Excellent.score(), 5);
        assert_eq!(ComfortLevel::Unacceptable.score(), 1);
    }

    #[test]
    fn test_recommendation_tracks_sign() {
        assert!(recommendation_for(2.5).contains("shade"));
        assert!(recommendation_for(-2.5).contains("warm layers"));
        assert_eq!(recommendation_for(0.0), "Optimal thermal comfort conditions");
    }

    #[test]
    fn test_comfort_points_deterministic() {
        let sim = simulator(PmvModel::Detailed);
        let a = sim.simulate(28.0, 60.0, 2.0, 600.0, "Summer heat", Some(Season::Summer), true);
        let b = sim.simulate(28.0, 60.0, 2.0, 600.0, "Summer heat", Some(Season::Summer), true);
        assert_eq!(a.comfort_map, b.comfort_map);
        assert_eq!(a.overall_metrics, b.overall_metrics);

        let c = sim.simulate(28.0, 60.0, 2.0, 600.0, "Other name", Some(Season::Summer), true);
        assert_ne!(a.comfort_map, c.comfort_map);
    }

    #[test]
    fn test_comfort_point_count_and_values() {
        let sim = simulator(PmvModel::Detailed);
        let result = sim.simulate(28.0, 60.0, 2.0, 600.0, "Summer heat", Some(Season::Summer), true);
        let points = result.comfort_map.unwrap();
        assert!(points.len() >= 30 && points.len() <= 80);
        for point in &points {
            assert!((-3.0..=3.0).contains(&point.pmv));
            assert!((5.0..=100.0).contains(&point.ppd));
            assert!((1..=5).contains(&point.comfort_score));
            assert_relative_eq!(point.ppd, ppd_from_pmv(point.pmv));
        }
    }

    #[test]
    fn test_detailed_flag_controls_point_field() {
        let sim = simulator(PmvModel::Simplified);
        let compact = sim.simulate(22.0, 55.0, 1.5, 400.0, "Mild day", None, false);
        assert!(compact.comfort_map.is_none());
        assert!(compact.visualization.is_none());
    }

    #[test]
    fn test_model_choice_changes_numbers_not_shape() {
        let detailed = simulator(PmvModel::Detailed)
            .simulate(30.0, 45.0, 1.0, 700.0, "Hot noon", Some(Season::Summer), false);
        let simplified = simulator(PmvModel::Simplified)
            .simulate(30.0, 45.0, 1.0, 700.0, "Hot noon", Some(Season::Summer), false);
        assert_eq!(detailed.zone_analysis.len(), simplified.zone_analysis.len());
        // Both should land on the warm side for every zone
        for (d, s) in detailed.zone_analysis.iter().zip(&simplified.zone_analysis) {
            assert!(d.comfort_indices.pmv > 0.0);
            assert!(s.comfort_indices.pmv > 0.0);
        }
    }

    #[test]
    fn test_batch_keys_normalized() {
        let sim = simulator(PmvModel::Simplified);
        let scenarios = vec![ThermalScenario {
            air_temperature_c: 22.0,
            relative_humidity_percent: 55.0,
            wind_speed_ms: 1.5,
            solar_radiation_wm2: 400.0,
            name: "Comfortable Summer".to_string(),
            season: Some(Season::Summer),
        }];
        let results = sim.batch_simulate(&scenarios);
        assert!(results.contains_key("comfortable_summer"));
    }
}
