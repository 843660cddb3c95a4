//! Manufacturing process definitions

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// The closed set of manufacturing processes the shop offers
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ProcessKind {
    /// Fused deposition modeling (filament 3D printing)
    Fdm,
    /// Stereolithography (resin 3D printing)
    Sla,
    /// CNC machining
    Cnc,
    /// Laser cutting
    Laser,
}

impl ProcessKind {
    /// Get all process kinds, in display order
    pub fn all() -> &'static [ProcessKind] {
        &[
            ProcessKind::Fdm,
            ProcessKind::Sla,
            ProcessKind::Cnc,
            ProcessKind::Laser,
        ]
    }

    /// Get the string identifier for this process
    pub fn as_str(&self) -> &'static str {
        match self {
            ProcessKind::Fdm => "fdm",
            ProcessKind::Sla => "sla",
            ProcessKind::Cnc => "cnc",
            ProcessKind::Laser => "laser",
        }
    }

    /// Cost multiplier applied to the summed base costs for this process
    pub fn cost_multiplier(&self) -> f64 {
        match self {
            ProcessKind::Fdm => 1.0,
            ProcessKind::Sla => 1.3,
            ProcessKind::Cnc => 2.0,
            ProcessKind::Laser => 0.8,
        }
    }

    /// Machine hours consumed per cm³ of bounding volume
    pub fn hours_per_cm3(&self) -> f64 {
        match self {
            ProcessKind::Fdm => 0.5,
            ProcessKind::Sla => 0.3,
            ProcessKind::Cnc => 1.0,
            ProcessKind::Laser => 0.1,
        }
    }
}

impl std::fmt::Display for ProcessKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ProcessKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fdm" => Ok(ProcessKind::Fdm),
            "sla" => Ok(ProcessKind::Sla),
            "cnc" => Ok(ProcessKind::Cnc),
            "laser" => Ok(ProcessKind::Laser),
            _ => Err(format!(
                "Invalid process: {}. Use fdm, sla, cnc, or laser",
                s
            )),
        }
    }
}

/// Display metadata for one process, loaded from the embedded catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessEntry {
    /// Process identifier
    pub id: ProcessKind,

    /// Human-readable name
    pub name: String,

    /// One-line description shown in listings
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_kind_roundtrip() {
        for kind in ProcessKind::all() {
            let parsed: ProcessKind = kind.as_str().parse().unwrap();
            assert_eq!(parsed, *kind);
        }
    }

    #[test]
    fn test_process_kind_rejects_unknown() {
        assert!("sls".parse::<ProcessKind>().is_err());
    }

    #[test]
    fn test_cost_multipliers() {
        assert_eq!(ProcessKind::Fdm.cost_multiplier(), 1.0);
        assert_eq!(ProcessKind::Sla.cost_multiplier(), 1.3);
        assert_eq!(ProcessKind::Cnc.cost_multiplier(), 2.0);
        assert_eq!(ProcessKind::Laser.cost_multiplier(), 0.8);
    }

    #[test]
    fn test_hour_rates() {
        assert_eq!(ProcessKind::Fdm.hours_per_cm3(), 0.5);
        assert_eq!(ProcessKind::Sla.hours_per_cm3(), 0.3);
        assert_eq!(ProcessKind::Cnc.hours_per_cm3(), 1.0);
        assert_eq!(ProcessKind::Laser.hours_per_cm3(), 0.1);
    }

    #[test]
    fn test_serde_uses_lowercase_ids() {
        let yaml = serde_yml::to_string(&ProcessKind::Laser).unwrap();
        assert_eq!(yaml.trim(), "laser");
        let parsed: ProcessKind = serde_yml::from_str("cnc").unwrap();
        assert_eq!(parsed, ProcessKind::Cnc);
    }
}
