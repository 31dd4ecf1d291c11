//! Urban wind flow simulator
//!
//! A simplified CFD-style analysis of wind flow through the fixed urban
//! study area: logarithmic boundary layer profile, empirical urban effects
//! (street tunneling, building wakes, green-area damping, street-grid
//! anisotropy), Lawson pedestrian comfort, structural wind loads, and a
//! deterministic wind vector field for map display.

pub mod comfort;
pub mod profile;

use crate::config::{ConfigError, LocationConfig, SiteConfig};
use crate::export::{
    normalize_scenario_key, unix_now_s, write_envelope, ExportEnvelope, ExportError,
    ExportMetadata,
};
use crate::sampling::{numeric_seed, ScenarioRng};
use comfort::{wind_pressures, ComfortDistribution, PedestrianComfort, WindPressures};
use profile::{directional_factor, vertical_profile, wind_vector};
use rustc_hash::FxHashMap;
use serde::Serialize;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

/// Producing module name used in result envelopes.
pub const MODULE: &str = "WindSim";
/// Model identifier recorded in every result.
pub const MODEL_VERSION: &str = "WindSim_v1.9_CFD";
/// Export metadata version.
const EXPORT_VERSION: &str = "1.9.0";

/// Microenvironment category of a wind field point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvironmentType {
    Open,
    Tunnel,
    Wake,
    Green,
    Intersection,
}

impl EnvironmentType {
    /// Turbulence intensity typical for the microenvironment.
    #[must_use]
    fn turbulence_intensity(self) -> f64 {
        match self {
            EnvironmentType::Open => 0.12,
            EnvironmentType::Tunnel => 0.25,
            EnvironmentType::Wake => 0.15,
            EnvironmentType::Green => 0.10,
            EnvironmentType::Intersection => 0.20,
        }
    }

    /// Complex flow structures deflect the local direction more strongly.
    #[must_use]
    fn deviates_strongly(self) -> bool {
        matches!(self, EnvironmentType::Tunnel | EnvironmentType::Intersection)
    }
}

/// Urban modification of the reference flow, all speeds in m/s.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UrbanEffects {
    /// Peak speed in street tunnels.
    pub max_tunnel_speed: f64,
    /// Minimum speed in building wakes.
    pub min_wake_speed: f64,
    /// Area-average speed over the urban fabric.
    pub avg_urban_speed: f64,
    /// Speed at pedestrian height (1.5 m).
    pub pedestrian_speed: f64,
    /// Street-grid anisotropy factor applied to all of the above.
    pub directional_factor: f64,
    /// Raw tunnel amplification before the directional factor.
    pub tunnel_factor: f64,
}

/// One synthetic wind vector sample for map visualization.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WindFieldPoint {
    pub lat: f64,
    pub lng: f64,
    pub speed_ms: f64,
    /// Local meteorological direction [°].
    pub direction_deg: f64,
    /// Eastward velocity component [m/s].
    pub vx: f64,
    /// Northward velocity component [m/s].
    pub vy: f64,
    pub height_agl_m: f64,
    pub turbulence_intensity: f64,
    pub environment_type: EnvironmentType,
    /// Short-gust amplification: `1 + 0.5·turbulence`.
    pub gust_factor: f64,
}

/// Input echo block of a wind result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WindParameters {
    pub wind_speed_ref_ms: f64,
    pub wind_direction_deg: f64,
    pub reference_height_m: f64,
    pub surface_roughness_m: f64,
    pub air_density_kgm3: f64,
}

/// Urban morphology echo block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UrbanCharacteristics {
    pub building_density_percent: f64,
    pub average_building_height_m: f64,
    pub tunnel_amplification: f64,
    pub wake_reduction: f64,
    pub directional_factor: f64,
}

/// Characteristic speeds of the modified flow field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WindFieldAnalysis {
    pub max_speed_ms: f64,
    pub min_speed_ms: f64,
    pub avg_urban_speed_ms: f64,
    pub pedestrian_speed_ms: f64,
    /// Tunnel-to-wake speed ratio (0 when the flow is calm).
    pub speed_variation_factor: f64,
}

/// Pedestrian comfort block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComfortAssessment {
    pub pedestrian_comfort_level: PedestrianComfort,
    pub comfort_score: u8,
    pub comfort_description: &'static str,
    /// Share of the area comfortable or acceptable.
    pub comfort_zones_percent: f64,
    pub comfort_distribution: ComfortDistribution,
}

/// Structural load block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StructuralLoads {
    #[serde(flatten)]
    pub pressures: WindPressures,
    /// Design dynamic pressure in kN/m².
    pub design_wind_load_knm2: f64,
}

/// Map-display hints attached to detailed results.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WindVisualization {
    pub center_lat: f64,
    pub center_lng: f64,
    pub zoom_level: u8,
    pub vector_scale: u8,
    pub color_scale: &'static str,
    pub particle_count: usize,
}

/// Complete result of one wind scenario.
#[derive(Debug, Clone, Serialize)]
pub struct WindResult {
    pub scenario_name: String,
    pub module: &'static str,
    pub model_version: &'static str,
    /// Wall-clock duration of this call in milliseconds. The only
    /// non-deterministic field of the result.
    pub computation_time_ms: f64,
    pub parameters: WindParameters,
    pub urban_characteristics: UrbanCharacteristics,
    pub wind_field_analysis: WindFieldAnalysis,
    pub comfort_assessment: ComfortAssessment,
    pub structural_loads: StructuralLoads,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wind_field: Option<Vec<WindFieldPoint>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visualization: Option<WindVisualization>,
}

/// One entry of a batch run.
#[derive(Debug, Clone)]
pub struct WindScenario {
    pub wind_speed_ms: f64,
    pub direction_deg: f64,
    pub name: String,
}

/// Calibration echo written into the export envelope.
#[derive(Debug, Clone, Serialize)]
pub struct WindCalibration {
    pub building_density: f64,
    pub average_building_height_m: f64,
    pub surface_roughness_m: f64,
    pub reference_height_m: f64,
    pub comfort_criteria: &'static str,
}

/// Wind flow simulator for the fixed urban study area.
pub struct WindSimulator {
    location: LocationConfig,

    // Urban morphology
    building_density: f64,
    average_building_height: f64,
    surface_roughness: f64,

    // Flow constants
    air_density: f64,
    reference_height: f64,
    pedestrian_height: f64,

    // Empirical urban coefficients
    tunnel_amplification: f64,
    wake_reduction: f64,
    green_area_reduction: f64,
}

impl WindSimulator {
    /// Create a simulator from a validated site configuration.
    ///
    /// # Errors
    /// Returns [`ConfigError`] when the configuration fails validation.
    pub fn new(config: SiteConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        info!(
            area_km2 = config.location.area_km2,
            "wind simulator initialized"
        );
        Ok(Self {
            location: config.location,
            building_density: 0.25,
            average_building_height: 18.0,
            surface_roughness: 0.3,
            air_density: 1.225,
            reference_height: 10.0,
            pedestrian_height: 1.5,
            tunnel_amplification: 0.8,
            wake_reduction: 0.3,
            green_area_reduction: 0.4,
        })
    }

    /// Wind speed at `height` using the configured roughness and reference
    /// height. See [`profile::vertical_profile`].
    #[must_use]
    pub fn wind_profile(&self, height: f64, u_ref: f64) -> f64 {
        vertical_profile(height, u_ref, self.reference_height, self.surface_roughness)
    }

    /// Compute the urban modification of the reference flow.
    ///
    /// Tunnel amplification `1 + density·0.8`, wake reduction `1 − 0.3`,
    /// area-average reduction `1 − density·0.4`, pedestrian-level profile
    /// speed, all scaled by the street-grid directional factor.
    #[must_use]
    pub fn urban_effects(&self, wind_speed_ref: f64, direction_deg: f64) -> UrbanEffects {
        let tunnel_factor = 1.0 + self.building_density * self.tunnel_amplification;
        let max_tunnel_speed = wind_speed_ref * tunnel_factor;

        let min_wake_speed = wind_speed_ref * (1.0 - self.wake_reduction);

        let urban_reduction_factor = 1.0 - self.building_density * 0.4;
        let avg_urban_speed = wind_speed_ref * urban_reduction_factor;

        let pedestrian_speed = self.wind_profile(self.pedestrian_height, wind_speed_ref);

        let dir = directional_factor(direction_deg);

        UrbanEffects {
            max_tunnel_speed: max_tunnel_speed * dir,
            min_wake_speed: min_wake_speed * dir,
            avg_urban_speed: avg_urban_speed * dir,
            pedestrian_speed: pedestrian_speed * dir,
            directional_factor: dir,
            tunnel_factor,
        }
    }

    /// Generate the deterministic wind vector field.
    ///
    /// The scenario here is fully described by its physical inputs, so the
    /// seed quantizes speed and direction instead of hashing the name:
    /// `|⌊dir⌋ + ⌊speed·10⌋| mod 2³¹`. The point count scales with the
    /// reference speed, clamped to 20..=100.
    #[must_use]
    pub fn generate_wind_field(
        &self,
        wind_speed_ref: f64,
        direction_deg: f64,
        effects: &UrbanEffects,
    ) -> Vec<WindFieldPoint> {
        let raw = direction_deg.trunc() as i64 + (wind_speed_ref * 10.0).trunc() as i64;
        let mut rng = ScenarioRng::from_seed(numeric_seed(raw));

        let num_points = ((wind_speed_ref * 5.0) as usize).clamp(20, 100);

        let environment_weights = [
            (EnvironmentType::Open, 0.30),
            (EnvironmentType::Tunnel, 0.20),
            (EnvironmentType::Wake, 0.20),
            (EnvironmentType::Green, 0.15),
            (EnvironmentType::Intersection, 0.15),
        ];

        let mut points = Vec::with_capacity(num_points);
        for _ in 0..num_points {
            let lat = rng.normal(self.location.center_lat, 0.008);
            let lng = rng.normal(self.location.center_lng, 0.012);

            let spatial_variation = rng.uniform(0.6, 1.4);
            let environment = *rng.weighted_choice(&environment_weights);

            let local_speed = match environment {
                EnvironmentType::Tunnel => effects.max_tunnel_speed * spatial_variation,
                EnvironmentType::Wake => effects.min_wake_speed * spatial_variation,
                EnvironmentType::Green => {
                    effects.avg_urban_speed * (1.0 - self.green_area_reduction) * spatial_variation
                }
                EnvironmentType::Intersection => {
                    effects.avg_urban_speed * 1.1 * spatial_variation
                }
                EnvironmentType::Open => effects.avg_urban_speed * spatial_variation,
            };
            let turbulence = environment.turbulence_intensity();

            let mut direction_deviation = rng.normal(0.0, 25.0);
            if environment.deviates_strongly() {
                direction_deviation *= 1.5;
            }
            let local_direction = (direction_deg + direction_deviation).rem_euclid(360.0);

            let (vx, vy) = wind_vector(local_speed, local_direction);
            let height_agl_m = rng.uniform(1.0, 20.0);

            points.push(WindFieldPoint {
                lat,
                lng,
                speed_ms: local_speed,
                direction_deg: local_direction,
                vx,
                vy,
                height_agl_m,
                turbulence_intensity: turbulence,
                environment_type: environment,
                gust_factor: 1.0 + 0.5 * turbulence,
            });
        }

        points
    }

    /// Run one wind scenario.
    ///
    /// With `detailed` set, the result carries the wind vector field and
    /// visualization hints; otherwise both are omitted.
    #[must_use]
    pub fn simulate(
        &self,
        wind_speed_ref: f64,
        direction_deg: f64,
        scenario_name: &str,
        detailed: bool,
    ) -> WindResult {
        let started = Instant::now();
        info!(
            scenario = scenario_name,
            wind_speed_ref, direction_deg, "wind scenario"
        );

        let effects = self.urban_effects(wind_speed_ref, direction_deg);

        let comfort_level = PedestrianComfort::from_speed(effects.pedestrian_speed);
        let pressures = wind_pressures(wind_speed_ref, self.air_density);
        let distribution = ComfortDistribution::for_average_speed(effects.avg_urban_speed);

        debug!(
            pedestrian_speed = effects.pedestrian_speed,
            ?comfort_level,
            dynamic_pressure_pa = pressures.dynamic_pressure_pa,
            "urban flow"
        );

        let (wind_field, visualization) = if detailed {
            let field = self.generate_wind_field(wind_speed_ref, direction_deg, &effects);
            let particle_count = field.len();
            (
                Some(field),
                Some(WindVisualization {
                    center_lat: self.location.center_lat,
                    center_lng: self.location.center_lng,
                    zoom_level: 14,
                    vector_scale: 10,
                    color_scale: "Viridis",
                    particle_count,
                }),
            )
        } else {
            (None, None)
        };

        let speed_variation_factor = if effects.min_wake_speed > 0.0 {
            effects.max_tunnel_speed / effects.min_wake_speed
        } else {
            0.0
        };

        WindResult {
            scenario_name: scenario_name.to_string(),
            module: MODULE,
            model_version: MODEL_VERSION,
            computation_time_ms: started.elapsed().as_secs_f64() * 1e3,
            parameters: WindParameters {
                wind_speed_ref_ms: wind_speed_ref,
                wind_direction_deg: direction_deg,
                reference_height_m: self.reference_height,
                surface_roughness_m: self.surface_roughness,
                air_density_kgm3: self.air_density,
            },
            urban_characteristics: UrbanCharacteristics {
                building_density_percent: self.building_density * 100.0,
                average_building_height_m: self.average_building_height,
                tunnel_amplification: self.tunnel_amplification,
                wake_reduction: self.wake_reduction,
                directional_factor: effects.directional_factor,
            },
            wind_field_analysis: WindFieldAnalysis {
                max_speed_ms: effects.max_tunnel_speed,
                min_speed_ms: effects.min_wake_speed,
                avg_urban_speed_ms: effects.avg_urban_speed,
                pedestrian_speed_ms: effects.pedestrian_speed,
                speed_variation_factor,
            },
            comfort_assessment: ComfortAssessment {
                pedestrian_comfort_level: comfort_level,
                comfort_score: comfort_level.score(),
                comfort_description: comfort_level.description(),
                comfort_zones_percent: distribution.comfortable_percent(),
                comfort_distribution: distribution,
            },
            structural_loads: StructuralLoads {
                design_wind_load_knm2: pressures.dynamic_pressure_pa / 1000.0,
                pressures,
            },
            wind_field,
            visualization,
        }
    }

    /// Run a list of scenarios sequentially.
    ///
    /// Results are keyed by normalized scenario name; key collisions
    /// silently overwrite earlier entries.
    #[must_use]
    pub fn batch_simulate(&self, scenarios: &[WindScenario]) -> FxHashMap<String, WindResult> {
        info!(count = scenarios.len(), "wind batch simulation");
        let mut results = FxHashMap::default();
        for scenario in scenarios {
            let result = self.simulate(
                scenario.wind_speed_ms,
                scenario.direction_deg,
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
        results: FxHashMap<String, WindResult>,
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
            configuration: WindCalibration {
                building_density: self.building_density,
                average_building_height_m: self.average_building_height,
                surface_roughness_m: self.surface_roughness,
                reference_height_m: self.reference_height,
                comfort_criteria: "Lawson",
            },
            results,
        };
        write_envelope(path, &envelope)
    }
}
