//! Sample projects for the quick-start flow

use serde::{Deserialize, Serialize};

use crate::catalog::process::ProcessKind;
use crate::pricing::model::{Dimensions, QuoteRequest};

/// A pre-built example project that fills in a complete quote request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SampleProject {
    /// Sample identifier (e.g. "gear")
    pub id: String,

    /// Display name
    pub name: String,

    /// Manufacturing process
    pub process: ProcessKind,

    /// Material id within the process's material list
    pub material: String,

    /// Bounding-box dimensions
    pub dimensions: Dimensions,

    /// Order quantity
    pub quantity: u32,
}

impl SampleProject {
    /// Build a quote request from this sample
    pub fn to_request(&self) -> QuoteRequest {
        QuoteRequest {
            process: self.process,
            material: self.material.clone(),
            dimensions: self.dimensions,
            quantity: self.quantity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_to_request_copies_all_fields() {
        let sample = SampleProject {
            id: "gear".to_string(),
            name: "Mechanical Gear".to_string(),
            process: ProcessKind::Fdm,
            material: "petg".to_string(),
            dimensions: Dimensions {
                width_mm: 50.0,
                depth_mm: 50.0,
                height_mm: 15.0,
            },
            quantity: 4,
        };

        let request = sample.to_request();
        assert_eq!(request.process, ProcessKind::Fdm);
        assert_eq!(request.material, "petg");
        assert_eq!(request.quantity, 4);
        assert_eq!(request.dimensions.volume_mm3(), 50.0 * 50.0 * 15.0);
    }
}
