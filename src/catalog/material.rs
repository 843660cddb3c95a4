//! Material definitions, priced per unit volume

use serde::{Deserialize, Serialize};

/// A material offered for a process, priced per cm³ of bounding volume
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Material {
    /// Material identifier (e.g. "pla", "aluminum_6061")
    pub id: String,

    /// Display name
    pub name: String,

    /// Price per cm³ in the base currency unit
    pub price_per_cm3: f64,
}

/// Result of resolving a material id against a process's material list
#[derive(Debug, Clone, Copy)]
pub struct MaterialLookup<'a> {
    /// The material that will be used
    pub material: &'a Material,

    /// True when the requested id was unknown and the process default
    /// was substituted
    pub fell_back: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_material_yaml_shape() {
        let yaml = "id: pla\nname: PLA\nprice_per_cm3: 2.5\n";
        let material: Material = serde_yml::from_str(yaml).unwrap();
        assert_eq!(material.id, "pla");
        assert_eq!(material.price_per_cm3, 2.5);
    }
}
