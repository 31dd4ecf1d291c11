//! Urban Environmental Simulation Core Library
//!
//! Scenario simulators for three environmental hazards of a fixed urban
//! study area: pluvial flooding, pedestrian thermal comfort, and urban
//! wind flow. All three share one configuration layer, one deterministic
//! sampling layer for synthetic map point fields, and one JSON export
//! envelope.
//!
//! ## Determinism
//!
//! Identical configuration and scenario inputs always yield identical
//! results, point fields included: seeds derive from scenario identity
//! through a stable hash and every simulate call owns its own generator.
//! The only non-deterministic result field is the measured computation
//! time.

pub mod config;
pub mod export;
pub mod flood;
pub mod sampling;
pub mod thermal;
pub mod wind;

// Re-export configuration and export plumbing
pub use config::{ConfigError, LocationConfig, SiteConfig};
pub use export::{ExportEnvelope, ExportError, ExportMetadata};

// Re-export the flood simulator surface
pub use flood::{FloodResult, FloodRiskLevel, FloodScenario, FloodSimulator};

// Re-export the thermal comfort simulator surface
pub use thermal::pmv::PmvModel;
pub use thermal::zones::{Season, SurfaceClass};
pub use thermal::{ComfortLevel, ThermalComfortSimulator, ThermalResult, ThermalScenario};

// Re-export the wind simulator surface
pub use wind::comfort::PedestrianComfort;
pub use wind::{WindResult, WindScenario, WindSimulator};
