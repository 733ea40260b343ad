//! The estimator — converts one activity record into a CO2e figure.
//!
//! Pure and infallible for well-typed input: absent quantities are zero,
//! absent enumerated fields use the documented fallback category, and the
//! result is non-negative whenever the inputs are.

use serde::{Deserialize, Serialize};

use crate::{
  activity::{ActivityRecord, DisposalMethod, FuelType, WaterManagement},
  factors,
};

/// A CO2e mass in kilograms, rounded to two decimal places at construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmissionEstimate(f64);

impl EmissionEstimate {
  pub fn from_kg(kg: f64) -> Self { Self(round2(kg)) }

  pub fn kg(self) -> f64 { self.0 }
}

/// Half-away-from-zero rounding to two decimal places.
pub fn round2(value: f64) -> f64 { (value * 100.0).round() / 100.0 }

/// Estimate the CO2e emissions of one activity record.
pub fn estimate(record: &ActivityRecord) -> EmissionEstimate {
  let kg = match record {
    ActivityRecord::Energy(a) => {
      a.electricity_consumed_kwh * factors::ELECTRICITY_KWH
        + a.lpg_used_kg * factors::LPG_KG
        + a.kerosene_used_liters * factors::KEROSENE_LITER
        + a.firewood_used_kg * factors::FIREWOOD_KG
        + a.diesel_used_liters * factors::DIESEL_LITER
        + a.gasoline_used_liters * factors::GASOLINE_LITER
        + a.coal_used_kg * factors::COAL_KG
    }

    ActivityRecord::Transport(a) => {
      // Multiplicative trip-volume model: a zero in any quantity zeroes the
      // whole estimate.
      let fuel = a.fuel_type.unwrap_or(FuelType::Diesel);
      f64::from(a.number_of_vehicles)
        * a.distance_travelled_daily_km
        * f64::from(a.travel_frequency_per_week)
        * f64::from(a.trips_per_day)
        * factors::fuel_factor(fuel)
    }

    ActivityRecord::Waste(a) => {
      let method = a
        .waste_disposal_method
        .unwrap_or(DisposalMethod::Landfill);
      let mut factor = factors::disposal_factor(method);
      // Methane capture halves emissions, but only on managed landfills.
      if a.methane_capture && method == DisposalMethod::Landfill {
        factor *= 0.5;
      }
      a.waste_generated_kg_per_month * (a.organic_fraction_percent / 100.0) * factor
    }

    ActivityRecord::Agriculture(a) => {
      let mut kg = f64::from(a.number_of_cattle) * factors::CATTLE_HEAD
        + f64::from(a.number_of_carabao) * factors::CARABAO_HEAD
        + f64::from(a.number_of_goats) * factors::GOAT_HEAD
        + f64::from(a.number_of_pigs) * factors::PIG_HEAD
        + f64::from(a.number_of_chickens) * factors::CHICKEN_HEAD
        + a.fertilizer_applied_kg * factors::FERTILIZER_KG;
      if a.rice_paddy_area_hectares > 0.0 {
        let regime = a
          .rice_water_management
          .unwrap_or(WaterManagement::ContinuousFlooding);
        kg += a.rice_paddy_area_hectares * factors::water_factor(regime);
      }
      kg
    }

    ActivityRecord::Ippu(a) => {
      a.cement_produced_tonnes * factors::CEMENT_TONNE
        + a.lime_produced_tonnes * factors::LIME_TONNE
        + a.steel_produced_tonnes * factors::STEEL_TONNE
        + a.refrigerant_consumed_kg * factors::REFRIGERANT_KG
        + a.solvent_used_liters * factors::SOLVENT_LITER
        + a.other_process_emissions_co2e_tonnes * factors::OTHER_PROCESS_TONNE
    }
  };

  EmissionEstimate::from_kg(kg)
}
