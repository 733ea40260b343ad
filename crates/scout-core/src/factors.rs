//! Fixed emission-factor tables (Philippine grid mix and IPCC Tier 1
//! defaults), in kg CO2e per unit of activity.
//!
//! Process-wide constant configuration, never mutable state. Every lookup has
//! an explicit fallback value for unrecognised keys — never a silent zero.

use crate::activity::{DisposalMethod, FuelType, WaterManagement};

// ─── Energy carriers ─────────────────────────────────────────────────────────

/// Per kWh of grid electricity.
pub const ELECTRICITY_KWH: f64 = 0.709;
/// Per kg of LPG.
pub const LPG_KG: f64 = 2.983;
/// Per litre of kerosene.
pub const KEROSENE_LITER: f64 = 2.391;
/// Per kg of firewood.
pub const FIREWOOD_KG: f64 = 0.015;
/// Per litre of diesel.
pub const DIESEL_LITER: f64 = 2.68;
/// Per litre of gasoline.
pub const GASOLINE_LITER: f64 = 2.32;
/// Per kg of coal.
pub const COAL_KG: f64 = 2.42;
/// Per unit of CNG.
pub const CNG_UNIT: f64 = 2.0;
/// Fallback for fuels without a dedicated factor.
pub const FUEL_FALLBACK: f64 = 2.0;

// ─── Agriculture ─────────────────────────────────────────────────────────────

/// Annual per-head factors for livestock.
pub const CATTLE_HEAD: f64 = 912.5;
pub const CARABAO_HEAD: f64 = 730.0;
pub const GOAT_HEAD: f64 = 182.5;
pub const PIG_HEAD: f64 = 401.5;
pub const CHICKEN_HEAD: f64 = 7.3;

/// Per kg of fertilizer applied.
pub const FERTILIZER_KG: f64 = 5.5;

// ─── Industrial processes ────────────────────────────────────────────────────

pub const CEMENT_TONNE: f64 = 800.0;
pub const LIME_TONNE: f64 = 900.0;
pub const STEEL_TONNE: f64 = 1800.0;
pub const REFRIGERANT_KG: f64 = 1430.0;
pub const SOLVENT_LITER: f64 = 2.0;
pub const OTHER_PROCESS_TONNE: f64 = 1000.0;

// ─── Lookups ─────────────────────────────────────────────────────────────────

/// Per-litre (or per-unit) factor for a transport fuel. Electric and
/// unrecognised fuels fall back to [`FUEL_FALLBACK`].
pub fn fuel_factor(fuel: FuelType) -> f64 {
  match fuel {
    FuelType::Gasoline => GASOLINE_LITER,
    FuelType::Diesel => DIESEL_LITER,
    FuelType::Cng => CNG_UNIT,
    FuelType::Electric | FuelType::Others => FUEL_FALLBACK,
  }
}

/// Per-kg factor for a waste disposal pathway.
pub fn disposal_factor(method: DisposalMethod) -> f64 {
  match method {
    DisposalMethod::Landfill => 1.8,
    DisposalMethod::OpenDumping => 2.0,
    DisposalMethod::Composting => 0.2,
    DisposalMethod::Recycling => 0.0,
    DisposalMethod::Incineration => 2.0,
    DisposalMethod::Others => 1.0,
  }
}

/// Annual per-hectare factor for a rice water regime. Unrecognised regimes
/// fall back to continuous flooding.
pub fn water_factor(regime: WaterManagement) -> f64 {
  match regime {
    WaterManagement::ContinuousFlooding => 1200.0,
    WaterManagement::IntermittentFlooding => 800.0,
    WaterManagement::DryCultivation => 100.0,
    WaterManagement::Others => 1200.0,
  }
}
