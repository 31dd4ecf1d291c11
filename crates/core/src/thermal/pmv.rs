//! PMV and PPD thermal comfort indices (ISO 7730)
//!
//! Two PMV formulations are provided and selected at simulator
//! configuration time via [`PmvModel`]:
//!
//! - [`pmv_detailed`]: the full Fanger heat-balance model with an iterative
//!   clothing-surface-temperature solution and six explicit heat-loss terms.
//! - [`pmv_simplified`]: an effective-temperature correlation for quick
//!   estimates, accurate to roughly ±0.5 PMV in moderate conditions.
//!
//! Both clamp the result to the ISO scale [-3, +3]. PPD follows from PMV
//! through the Fanger dissatisfaction curve.

use serde::Serialize;

/// Stefan-Boltzmann constant [W/(m²·K⁴)].
const STEFAN_BOLTZMANN: f64 = 5.67e-8;
/// Combined radiative exchange coefficient of the Fanger radiation term,
/// ε·σ with ε = 0.7 effective emissivity [W/(m²·K⁴)] (ISO 7730 eq. form).
const RADIATIVE_EXCHANGE: f64 = 3.96e-8;
/// One metabolic unit [W/m²].
const MET_UNIT: f64 = 58.15;
/// One clothing unit [m²·K/W].
const CLO_UNIT: f64 = 0.155;

/// PMV formulation selected when the simulator is configured.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PmvModel {
    /// Full iterative Fanger heat balance.
    #[default]
    Detailed,
    /// Effective-temperature correlation.
    Simplified,
}

/// Saturation water vapor pressure over liquid water [Pa].
///
/// Magnus formula: `es = 610.78·exp(17.27·ta / (ta + 237.3))`.
#[must_use]
pub fn saturation_vapor_pressure(ta: f64) -> f64 {
    610.78 * (17.27 * ta / (ta + 237.3)).exp()
}

/// Full Fanger PMV (ISO 7730).
///
/// Solves the clothing surface temperature by 10 fixed-point iterations of
/// the clothing heat balance, then evaluates the six-term body heat
/// balance:
///
/// ```text
/// L = M − W − HL1 − HL2 − HL3 − HL4 − HL5 − HL6
/// PMV = (0.303·e^(−0.036·M) + 0.028) · L
/// ```
///
/// with HL1 skin vapor diffusion, HL2 sweat evaporation (above one met of
/// net heat production), HL3/HL4 latent and sensible respiratory losses,
/// HL5 radiation, HL6 convection. The convective coefficient takes the
/// larger of the natural branch `2.38·|tcl − ta|^0.25` (still air,
/// va < 0.1 m/s) and the forced branch `12.1·√va`. Each iteration solves
/// the linearized clothing surface balance
///
/// ```text
/// tcl = (tsk + Icl·fcl·(hr·tr + hc·ta)) / (1 + Icl·fcl·(hr + hc))
/// ```
///
/// in Kelvin, with the skin temperature `tsk = 35.7 − 0.028·(M − W)`. The
/// radiative coefficient lags one iteration behind the surface-temperature
/// update and starts from air temperature, which keeps the first iteration
/// finite and converges to the same fixed point.
///
/// * `ta` air temperature [°C], `tr` mean radiant temperature [°C]
/// * `va` air speed [m/s], `rh` relative humidity [%]
/// * `met` metabolic rate [met], `clo` clothing insulation [clo]
#[must_use]
pub fn pmv_detailed(ta: f64, tr: f64, va: f64, rh: f64, met: f64, clo: f64) -> f64 {
    let ta_k = ta + 273.15;
    let tr_k = tr + 273.15;

    let pa = rh / 100.0 * saturation_vapor_pressure(ta);

    let m = met * MET_UNIT;
    // External work, zero for pedestrians
    let w = 0.0;

    let icl = clo * CLO_UNIT;
    let fcl = if icl <= 0.078 {
        1.0 + 1.290 * icl
    } else {
        1.05 + 0.645 * icl
    };

    let forced_hc = 12.1 * va.max(0.0).sqrt();

    // Mean skin temperature from the comfort regression [K]
    let tsk_k = 35.7 - 0.028 * (m - w) + 273.15;

    let mut tcl = ta;
    let mut tcl_k = ta + 273.15;
    let mut hc = forced_hc;
    for _ in 0..10 {
        hc = if va < 0.1 {
            (2.38 * (tcl - ta).abs().powf(0.25)).max(forced_hc)
        } else {
            forced_hc
        };

        let hr = 4.0 * STEFAN_BOLTZMANN * fcl * ((tcl_k + tr_k) / 2.0).powi(3);
        tcl_k = tcl + 273.15;

        let tcl_new_k = (tsk_k + icl * fcl * (hr * tr_k + hc * ta_k))
            / (1.0 + icl * fcl * (hr + hc));
        tcl = tcl_new_k - 273.15;
    }
    tcl_k = tcl + 273.15;

    // Heat-loss terms [W/m²]
    let hl1 = 3.05e-3 * (5733.0 - 6.99 * (m - w) - pa);
    let hl2 = if (m - w) > MET_UNIT {
        0.42 * ((m - w) - MET_UNIT)
    } else {
        0.0
    };
    let hl3 = 1.7e-5 * m * (5867.0 - pa);
    let hl4 = 0.0014 * m * (34.0 - ta);
    let hl5 = RADIATIVE_EXCHANGE * fcl * (tcl_k.powi(4) - tr_k.powi(4));
    let hl6 = fcl * hc * (tcl - ta);

    let thermal_load = m - w - hl1 - hl2 - hl3 - hl4 - hl5 - hl6;

    let pmv = (0.303 * (-0.036 * m).exp() + 0.028) * thermal_load;
    pmv.clamp(-3.0, 3.0)
}

/// Simplified PMV correlation.
///
/// Maps an effective temperature
/// `t_eff = ta + 0.3·(tr − ta) − 2·√va` through linear correction factors
/// for humidity, activity, and clothing:
///
/// ```text
/// PMV ≈ (t_eff − 22) / 8 · (1 + 0.01(rh − 50)) · (1 + 0.5(met − 1.2)) · (1 − 0.3(clo − 0.7))
/// ```
///
/// Neutral (PMV = 0) at 22 °C effective temperature with reference
/// humidity, activity, and clothing.
#[must_use]
pub fn pmv_simplified(ta: f64, tr: f64, va: f64, rh: f64, met: f64, clo: f64) -> f64 {
    let t_eff = ta + 0.3 * (tr - ta) - 2.0 * va.max(0.0).sqrt();

    let humidity_factor = 1.0 + 0.01 * (rh - 50.0);
    let met_factor = 1.0 + 0.5 * (met - 1.2);
    let clo_factor = 1.0 - 0.3 * (clo - 0.7);

    let pmv = (t_eff - 22.0) / 8.0 * humidity_factor * met_factor * clo_factor;
    pmv.clamp(-3.0, 3.0)
}

/// PPD from PMV (Fanger curve, ISO 7730):
/// `PPD = 100 − 95·exp(−0.03353·PMV⁴ − 0.2179·PMV²)`, clamped to [5, 100].
///
/// Even a perfectly neutral environment leaves 5% of occupants
/// dissatisfied.
#[must_use]
pub fn ppd_from_pmv(pmv: f64) -> f64 {
    let ppd = 100.0 - 95.0 * (-0.03353 * pmv.powi(4) - 0.2179 * pmv.powi(2)).exp();
    ppd.clamp(5.0, 100.0)
}
