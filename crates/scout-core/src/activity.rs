//! Activity records — the sector-tagged unit of reported data.
//!
//! An activity record carries the raw quantities a community reports for one
//! sector. Records are validated at the boundary (all numeric fields are
//! non-negative), never mutated, and consumed exactly once by the estimator.
//! Absent numeric fields deserialise to zero; absent enumerated fields carry
//! `None` and the estimator substitutes the documented fallback category.

use serde::{Deserialize, Serialize};

use crate::{Result, sector::Sector};

// ─── Field enums ─────────────────────────────────────────────────────────────

/// Vehicle category reported for transport activity. Informational only; the
/// estimate depends on the fuel, not the vehicle body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleType {
  PrivateCar,
  Motorcycle,
  Jeepney,
  Tricycle,
  Bus,
  Others,
}

/// Transport fuel. Electric and unrecognised fuels share the fallback factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FuelType {
  Gasoline,
  Diesel,
  Electric,
  Cng,
  Others,
}

/// Waste disposal pathway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisposalMethod {
  Landfill,
  OpenDumping,
  Composting,
  Recycling,
  Incineration,
  Others,
}

/// Manure handling practice. Recorded with the submission; not part of the
/// Tier 1 estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ManureManagement {
  DryLot,
  Pasture,
  Lagoon,
  Composting,
  Others,
  None,
}

/// Rice paddy water regime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaterManagement {
  ContinuousFlooding,
  IntermittentFlooding,
  DryCultivation,
  Others,
}

/// Fertilizer category. Recorded with the submission; the estimate uses only
/// the applied mass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FertilizerType {
  Synthetic,
  Organic,
  None,
  Others,
}

// ─── Sector payloads ─────────────────────────────────────────────────────────

/// Household and institutional fuel and electricity use.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnergyActivity {
  pub electricity_consumed_kwh: f64,
  pub lpg_used_kg:              f64,
  pub kerosene_used_liters:     f64,
  pub firewood_used_kg:         f64,
  pub diesel_used_liters:       f64,
  pub gasoline_used_liters:     f64,
  pub coal_used_kg:             f64,
}

/// Fleet travel volume. The estimate multiplies every quantity, so a zero in
/// any of them zeroes the whole figure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransportActivity {
  pub vehicle_type:                Option<VehicleType>,
  pub fuel_type:                   Option<FuelType>,
  pub number_of_vehicles:          u32,
  pub distance_travelled_daily_km: f64,
  pub travel_frequency_per_week:   u32,
  pub trips_per_day:               u32,
}

/// Monthly waste generation and its disposal pathway.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WasteActivity {
  pub waste_generated_kg_per_month: f64,
  pub organic_fraction_percent:     f64,
  pub waste_disposal_method:        Option<DisposalMethod>,
  pub methane_capture:              bool,
}

/// Livestock headcounts, fertilizer use, and rice cultivation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgricultureActivity {
  pub number_of_cattle:         u32,
  pub number_of_carabao:        u32,
  pub number_of_goats:          u32,
  pub number_of_pigs:           u32,
  pub number_of_chickens:       u32,
  pub manure_management:        Option<ManureManagement>,
  pub rice_paddy_area_hectares: f64,
  pub rice_water_management:    Option<WaterManagement>,
  pub fertilizer_type:          Option<FertilizerType>,
  pub fertilizer_applied_kg:    f64,
}

/// Industrial process and product use output quantities.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IppuActivity {
  pub cement_produced_tonnes:              f64,
  pub lime_produced_tonnes:                f64,
  pub steel_produced_tonnes:               f64,
  pub refrigerant_consumed_kg:             f64,
  pub solvent_used_liters:                 f64,
  pub other_process_emissions_co2e_tonnes: f64,
}

// ─── ActivityRecord ──────────────────────────────────────────────────────────

/// The typed payload of a submission. The variant name serves as the sector
/// discriminant stored in the database, and the serialised form is a flat
/// object tagged with a `sector` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "sector", rename_all = "lowercase")]
pub enum ActivityRecord {
  Energy(EnergyActivity),
  Transport(TransportActivity),
  Waste(WasteActivity),
  Agriculture(AgricultureActivity),
  Ippu(IppuActivity),
}

impl ActivityRecord {
  pub fn sector(&self) -> Sector {
    match self {
      Self::Energy(_) => Sector::Energy,
      Self::Transport(_) => Sector::Transport,
      Self::Waste(_) => Sector::Waste,
      Self::Agriculture(_) => Sector::Agriculture,
      Self::Ippu(_) => Sector::Ippu,
    }
  }

  /// Serialise the payload fields (without the sector tag) for the
  /// `activity_json` database column.
  pub fn to_json(&self) -> Result<serde_json::Value> {
    let mut value = serde_json::to_value(self)?;
    if let Some(map) = value.as_object_mut() {
      map.remove("sector");
    }
    Ok(value)
  }

  /// Rebuild from the sector discriminant and the JSON payload stored in the
  /// database.
  pub fn from_parts(sector: Sector, payload: serde_json::Value) -> Result<Self> {
    let mut wrapped = payload;
    if let Some(map) = wrapped.as_object_mut() {
      map.insert(
        "sector".to_owned(),
        serde_json::Value::String(sector.as_str().to_owned()),
      );
    }
    Ok(serde_json::from_value(wrapped)?)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn serialises_as_flat_tagged_object() {
    let record = ActivityRecord::Energy(EnergyActivity {
      electricity_consumed_kwh: 100.0,
      ..Default::default()
    });
    let value = serde_json::to_value(&record).unwrap();
    assert_eq!(value["sector"], "energy");
    assert_eq!(value["electricity_consumed_kwh"], 100.0);
  }

  #[test]
  fn absent_numeric_fields_default_to_zero() {
    let record: ActivityRecord =
      serde_json::from_value(serde_json::json!({ "sector": "waste" })).unwrap();
    let ActivityRecord::Waste(waste) = record else {
      panic!("expected waste variant");
    };
    assert_eq!(waste.waste_generated_kg_per_month, 0.0);
    assert_eq!(waste.waste_disposal_method, None);
    assert!(!waste.methane_capture);
  }

  #[test]
  fn payload_round_trips_through_parts() {
    let record = ActivityRecord::Transport(TransportActivity {
      fuel_type: Some(FuelType::Gasoline),
      number_of_vehicles: 2,
      distance_travelled_daily_km: 12.5,
      travel_frequency_per_week: 5,
      trips_per_day: 2,
      ..Default::default()
    });

    let payload = record.to_json().unwrap();
    assert!(payload.get("sector").is_none());

    let rebuilt = ActivityRecord::from_parts(Sector::Transport, payload).unwrap();
    assert_eq!(rebuilt, record);
  }

  #[test]
  fn unknown_sector_tag_is_rejected() {
    let result: Result<ActivityRecord, _> =
      serde_json::from_value(serde_json::json!({ "sector": "forestry" }));
    assert!(result.is_err());
  }
}
