//! Auxiliary thermal indices: UTCI, PET, mean radiant temperature, and
//! categorical condition classifiers.
//!
//! UTCI and PET use deliberately simple empirical correlations; the goal is
//! consistent relative ranking across scenarios and zones, not
//! reference-grade absolute values.

use super::pmv::pmv_simplified;
use super::zones::SurfaceClass;

/// Simplified Universal Thermal Climate Index [°C].
///
/// Air temperature corrected for radiant load (0.4 weighting), convective
/// wind chill above 0.5 m/s (`−2·√va`), and humidity. The humidity term
/// flips sign at 20 °C: moist air feels warmer in heat and colder in cold.
#[must_use]
pub fn utci_simplified(ta: f64, tr: f64, va: f64, rh: f64) -> f64 {
    let mut utci = ta + 0.4 * (tr - ta);

    if va > 0.5 {
        utci -= 2.0 * va.sqrt();
    }

    let humidity_effect = if ta > 20.0 {
        0.01 * (rh - 50.0)
    } else {
        -0.005 * (rh - 50.0)
    };

    utci + humidity_effect
}

/// Simplified Physiologically Equivalent Temperature [°C].
///
/// Empirical linear mapping from simplified PMV: `PET = 18 + 7·PMV`.
#[must_use]
pub fn pet_simplified(ta: f64, tr: f64, va: f64, rh: f64, met: f64, clo: f64) -> f64 {
    18.0 + 7.0 * pmv_simplified(ta, tr, va, rh, met, clo)
}

/// Estimate the mean radiant temperature [°C] from air temperature, solar
/// radiation, and the dominant surface class.
///
/// `tmrt = ta + solar·k/100` with the per-surface absorption coefficient
/// `k`; built surfaces add a radiative heat-island term capped at +2 °C
/// (reached at 800 W/m²).
#[must_use]
pub fn mean_radiant_temperature(ta: f64, solar_rad: f64, surface: SurfaceClass) -> f64 {
    let mut tmrt = ta + solar_rad * surface.solar_absorption() / 100.0;

    if surface.is_built() {
        tmrt += (solar_rad / 400.0).min(2.0);
    }

    tmrt
}

/// Seven-band air temperature stress category.
pub fn thermal_stress_category(ta: f64) -> &'static str {
    if ta < -10.0 {
        "extreme_cold"
    } else if ta < 0.0 {
        "cold"
    } else if ta < 18.0 {
        "cool"
    } else if ta < 26.0 {
        "comfortable"
    } else if ta < 32.0 {
        "warm"
    } else if ta < 38.0 {
        "hot"
    } else {
        "extreme_heat"
    }
}

/// Humidity comfort band; 40-60% RH is the optimum for outdoor comfort.
pub fn humidity_comfort(rh: f64) -> &'static str {
    if (40.0..=60.0).contains(&rh) {
        "optimal"
    } else {
        "suboptimal"
    }
}

/// Wind comfort band; a light 0.5-2.0 m/s breeze aids comfort.
pub fn wind_comfort(va: f64) -> &'static str {
    if (0.5..=2.0).contains(&va) {
        "optimal"
    } else {
        "suboptimal"
    }
}

/// Solar load band on global radiation [W/m²].
pub fn solar_load(solar_rad: f64) -> &'static str {
    if solar_rad < 200.0 {
        "low"
    } else if solar_rad < 600.0 {
        "moderate"
    } else {
        "high"
    }
}
