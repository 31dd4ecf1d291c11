//! Reference scenario validation across all three simulators, exercised
//! through the public crate surface only.

use urban_sim_core::{
    FloodRiskLevel, FloodSimulator, PedestrianComfort, PmvModel, Season, SiteConfig,
    ThermalComfortSimulator, WindSimulator,
};

fn config() -> SiteConfig {
    SiteConfig::from_json_str(
        r#"{"location": {"city": "Testville", "center_lat": 54.10, "center_lng": 22.95,
            "area_km2": 5.0, "elevation_avg": 163.0}}"#,
    )
    .unwrap()
}

#[test]
fn test_intense_rain_floods_moderately() {
    // 65 mm/h over 2 h: 17 mm/h over drain capacity, 25.5 mm accumulated,
    // 0.204 m peak depth
    let sim = FloodSimulator::new(config()).unwrap();
    let result = sim.simulate(65.0, 2.0, "Intense rain", true);

    assert!((result.metrics.max_depth_m - 0.204).abs() < 1e-9);
    assert_eq!(result.metrics.risk_level, FloodRiskLevel::Moderate);
    assert_eq!(result.metrics.risk_score, 3);
    assert!(!result.impact_assessment.evacuation_needed);
    assert!(result.impact_assessment.buildings_at_risk > 0);

    let zones = result.flood_zones.unwrap();
    assert!(!zones.is_empty());
    for zone in &zones {
        assert!(zone.depth_m <= result.metrics.max_depth_m);
    }
}

#[test]
fn test_drizzle_never_floods() {
    let sim = FloodSimulator::new(config()).unwrap();
    let result = sim.simulate(5.0, 1.0, "Drizzle", false);

    assert_eq!(result.metrics.max_depth_m, 0.0);
    assert_eq!(result.metrics.risk_level, FloodRiskLevel::Minimal);
    assert_eq!(result.impact_assessment.buildings_at_risk, 0);
    assert_eq!(result.impact_assessment.economic_damage_pln, 0);
}

#[test]
fn test_summer_heat_wave_stresses_built_zones() {
    let sim = ThermalComfortSimulator::new(config(), PmvModel::Detailed).unwrap();
    let result = sim.simulate(32.0, 45.0, 1.0, 800.0, "Heat wave", Some(Season::Summer), true);

    assert_eq!(result.environmental_conditions.thermal_stress_category, "hot");
    assert_eq!(result.environmental_conditions.solar_load, "high");
    assert!(result.overall_metrics.heat_stress_zones >= 1);
    assert_eq!(result.overall_metrics.cold_stress_zones, 0);
    assert!(result.overall_metrics.uhi_effect_estimated_c > 0.0);

    // Every zone reads warm; the park is the least stressed
    let park = result
        .zone_analysis
        .iter()
        .find(|z| z.zone_id == "parks_green")
        .unwrap();
    for zone in &result.zone_analysis {
        assert!(zone.comfort_indices.pmv > 0.0);
        assert!(park.comfort_indices.pmv <= zone.comfort_indices.pmv);
    }
}

#[test]
fn test_winter_frost_reads_cold_everywhere() {
    let sim = ThermalComfortSimulator::new(config(), PmvModel::Detailed).unwrap();
    let result = sim.simulate(-5.0, 75.0, 3.0, 50.0, "Frost", Some(Season::Winter), false);

    assert_eq!(result.environmental_conditions.thermal_stress_category, "cold");
    assert_eq!(result.overall_metrics.heat_stress_zones, 0);
    assert_eq!(result.parameters.clothing_insulation_clo, 2.0);
    for zone in &result.zone_analysis {
        assert!(zone.comfort_indices.pmv < 0.0, "zone {} should be cold", zone.zone_id);
    }
}

#[test]
fn test_calm_westerly_is_comfortable() {
    let sim = WindSimulator::new(config()).unwrap();
    let result = sim.simulate(5.0, 270.0, "Calm westerly", false);

    assert_eq!(
        result.comfort_assessment.pedestrian_comfort_level,
        PedestrianComfort::Comfortable
    );
    // On a street axis the grid channels the flow
    assert!((result.urban_characteristics.directional_factor - 1.15).abs() < 1e-9);
    assert!(result.comfort_assessment.comfort_zones_percent >= 90.0);
}

#[test]
fn test_storm_drives_field_and_loads() {
    let sim = WindSimulator::new(config()).unwrap();
    let result = sim.simulate(25.0, 270.0, "Storm", true);

    assert!(result.comfort_assessment.comfort_score >= 4);
    // q = 0.5 · 1.225 · 25² ≈ 383 Pa
    assert!((result.structural_loads.pressures.dynamic_pressure_pa - 382.8125).abs() < 1e-6);

    let field = result.wind_field.unwrap();
    assert_eq!(field.len(), 100);
    assert!(field.iter().any(|p| p.speed_ms > result.parameters.wind_speed_ref_ms));
}
