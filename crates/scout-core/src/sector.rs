//! Sector — the closed set of activity categories the engine understands.
//!
//! Dispatch on the sector tag is always an exhaustive match, so adding a
//! sector is a compile-time-checked change across the whole workspace.

use std::{cmp::Ordering, fmt};

use serde::{Deserialize, Serialize};

/// The five reporting sectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sector {
  Energy,
  Transport,
  Waste,
  Agriculture,
  Ippu,
}

impl Sector {
  pub const ALL: [Sector; 5] = [
    Sector::Energy,
    Sector::Transport,
    Sector::Waste,
    Sector::Agriculture,
    Sector::Ippu,
  ];

  /// The stable string form used in storage, JSON, and sort keys.
  pub fn as_str(self) -> &'static str {
    match self {
      Sector::Energy => "energy",
      Sector::Transport => "transport",
      Sector::Waste => "waste",
      Sector::Agriculture => "agriculture",
      Sector::Ippu => "ippu",
    }
  }

  pub fn parse(s: &str) -> Option<Sector> {
    match s {
      "energy" => Some(Sector::Energy),
      "transport" => Some(Sector::Transport),
      "waste" => Some(Sector::Waste),
      "agriculture" => Some(Sector::Agriculture),
      "ippu" => Some(Sector::Ippu),
      _ => None,
    }
  }
}

impl fmt::Display for Sector {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

// Sectors order by their string form; every sorted query output relies on
// this matching the storage representation.
impl Ord for Sector {
  fn cmp(&self, other: &Self) -> Ordering { self.as_str().cmp(other.as_str()) }
}

impl PartialOrd for Sector {
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
    Some(self.cmp(other))
  }
}
