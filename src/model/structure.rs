use serde::{Deserialize, Serialize};

/// Lattice constants as stored with a structure record.
///
/// `volume` and `matrix` are accepted when present but never trusted; the
/// basis is always rebuilt from the six parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Lattice {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    /// Degrees
    pub alpha: f64,
    pub beta: f64,
    pub gamma: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matrix: Option<[[f64; 3]; 3]>,
}

impl Lattice {
    pub fn new(a: f64, b: f64, c: f64, alpha: f64, beta: f64, gamma: f64) -> Self {
        Self {
            a,
            b,
            c,
            alpha,
            beta,
            gamma,
            volume: None,
            matrix: None,
        }
    }

    pub fn cubic(a: f64) -> Self {
        Self::new(a, a, a, 90.0, 90.0, 90.0)
    }

    pub fn with_volume(mut self, volume: f64) -> Self {
        self.volume = Some(volume);
        self
    }

    pub fn mean_length(&self) -> f64 {
        (self.a + self.b + self.c) / 3.0
    }
}

fn default_occupancy() -> f64 {
    1.0
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Site {
    /// Element symbol, possibly decorated ("Fe2+", "O1")
    pub species: String,
    pub frac_coords: [f64; 3],
    // Recomputed from frac_coords; kept only so records round-trip.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cart_coords: Option<[f64; 3]>,
    #[serde(default = "default_occupancy")]
    pub occupancy: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Site {
    pub fn new(species: impl Into<String>, frac_coords: [f64; 3]) -> Self {
        Self {
            species: species.into(),
            frac_coords,
            cart_coords: None,
            occupancy: 1.0,
            label: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Structure {
    pub lattice: Lattice,
    #[serde(default)]
    pub sites: Vec<Site>,

    // Record metadata, carried along but unused by the geometry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_sites: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spacegroup_symbol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crystal_system: Option<String>,
}

impl Structure {
    pub fn new(lattice: Lattice, sites: Vec<Site>) -> Self {
        Self {
            lattice,
            sites,
            id: None,
            num_sites: None,
            spacegroup_symbol: None,
            crystal_system: None,
        }
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_structure_record() {
        let json = r#"{
            "id": 1,
            "num_sites": 2,
            "is_ordered": true,
            "spacegroup_symbol": "Fm-3m",
            "lattice": {
                "id": 1, "a": 5.64, "b": 5.64, "c": 5.64,
                "alpha": 90.0, "beta": 90.0, "gamma": 90.0,
                "volume": 179.41,
                "matrix": [[5.64, 0.0, 0.0], [0.0, 5.64, 0.0], [0.0, 0.0, 5.64]]
            },
            "sites": [
                {"species": "Na", "frac_coords": [0.0, 0.0, 0.0], "cart_coords": [0.0, 0.0, 0.0]},
                {"species": "Cl", "frac_coords": [0.5, 0.5, 0.5], "occupancy": 0.5, "label": "Cl1"}
            ]
        }"#;

        let s = Structure::from_json(json).unwrap();
        assert_eq!(s.sites.len(), 2);
        assert_eq!(s.sites[0].occupancy, 1.0);
        assert_eq!(s.sites[1].occupancy, 0.5);
        assert_eq!(s.sites[1].label.as_deref(), Some("Cl1"));
        assert_eq!(s.lattice.volume, Some(179.41));
        assert_eq!(s.spacegroup_symbol.as_deref(), Some("Fm-3m"));
    }

    #[test]
    fn test_missing_sites_is_empty() {
        let json = r#"{"lattice": {"a": 3.0, "b": 3.0, "c": 3.0, "alpha": 90, "beta": 90, "gamma": 90}}"#;
        let s = Structure::from_json(json).unwrap();
        assert!(s.sites.is_empty());
        assert_eq!(s.lattice.mean_length(), 3.0);
    }
}
