//! Astronomical data ingestion.
//!
//! Reads body parameters from JSON shaped like the le-systeme-solaire
//! `bodies` endpoint and hands them to the regular [`CelestialBody`]
//! constructors. Nothing here simulates; it only builds a [`SolarSystem`].
//!
//! Accepted documents are either `{"bodies": [...]}` or a bare array of
//! records. Units follow that schema: mean radius and semi-major axis in km,
//! sidereal orbit in days, mass as `massValue × 10^massExponent` kg.

use std::collections::HashMap;
use std::path::Path;

use bevy::prelude::*;
use serde::Deserialize;

use crate::bodies::{BodyError, BodyId, CelestialBody};
use crate::system::SolarSystem;

#[derive(thiserror::Error, Debug)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("record '{name}' is missing {field}")]
    MissingField { name: String, field: &'static str },

    #[error("record '{name}' is not a star, planet or moon")]
    Unsupported { name: String },

    #[error("record '{name}' has invalid parameters: {source}")]
    InvalidBody {
        name: String,
        #[source]
        source: BodyError,
    },
}

/// Mass in scientific notation.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MassRecord {
    pub mass_value: f64,
    pub mass_exponent: i32,
}

impl MassRecord {
    /// Mass in kg.
    pub fn kilograms(&self) -> f64 {
        self.mass_value * 10f64.powi(self.mass_exponent)
    }
}

/// Reference from a moon to the planet it orbits.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct ParentRecord {
    /// Catalog id of the parent planet
    pub planet: String,
}

/// One body as it appears in the catalog.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CatalogRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub english_name: String,
    #[serde(default)]
    pub is_planet: bool,
    #[serde(default)]
    pub body_type: Option<String>,
    #[serde(default)]
    pub mass: Option<MassRecord>,
    /// Mean radius in km
    #[serde(default)]
    pub mean_radius: Option<f64>,
    /// Semi-major axis in km, used as the circular orbital radius
    #[serde(default)]
    pub semimajor_axis: Option<f64>,
    /// Sidereal orbital period in days
    #[serde(default)]
    pub sideral_orbit: Option<f64>,
    /// Mean surface temperature in K
    #[serde(default)]
    pub avg_temp: Option<f64>,
    #[serde(default)]
    pub around_planet: Option<ParentRecord>,
}

/// How a record maps onto the body model.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecordRole {
    Star,
    Planet,
    Moon,
}

impl CatalogRecord {
    /// Display name, falling back to the catalog id.
    pub fn name(&self) -> &str {
        if self.english_name.is_empty() {
            &self.id
        } else {
            &self.english_name
        }
    }

    pub fn role(&self) -> Option<RecordRole> {
        if self.body_type.as_deref() == Some("Star") {
            Some(RecordRole::Star)
        } else if self.is_planet {
            Some(RecordRole::Planet)
        } else if self.around_planet.is_some() {
            Some(RecordRole::Moon)
        } else {
            None
        }
    }

    /// Mass in kg; missing mass counts as zero.
    pub fn mass_kg(&self) -> f64 {
        self.mass.map(|m| m.kilograms()).unwrap_or(0.0)
    }

    fn required(&self, value: Option<f64>, field: &'static str) -> Result<f64, CatalogError> {
        value.ok_or_else(|| CatalogError::MissingField {
            name: self.name().to_string(),
            field,
        })
    }

    fn invalid(&self, source: BodyError) -> CatalogError {
        CatalogError::InvalidBody {
            name: self.name().to_string(),
            source,
        }
    }

    /// Build the body for this record. Moons need the id of their parent in
    /// the target system.
    pub fn to_body(&self, parent: Option<BodyId>) -> Result<CelestialBody, CatalogError> {
        let name = self.name().to_string();
        let mass = self.mass_kg();
        let radius = self.mean_radius.unwrap_or(0.0);

        match (self.role(), parent) {
            (Some(RecordRole::Star), _) => {
                // The schema has no luminosity field.
                let temperature = self.avg_temp.unwrap_or(0.0);
                CelestialBody::star(name, mass, radius, 0.0, temperature)
                    .map_err(|e| self.invalid(e))
            }
            (Some(RecordRole::Planet), _) => {
                let orbital_radius = self.required(self.semimajor_axis, "semimajorAxis")?;
                let period = self.required(self.sideral_orbit, "sideralOrbit")?;
                CelestialBody::planet(name, mass, radius, orbital_radius, period)
                    .map_err(|e| self.invalid(e))
            }
            (Some(RecordRole::Moon), Some(parent)) => {
                let orbital_radius = self.required(self.semimajor_axis, "semimajorAxis")?;
                let period = self.required(self.sideral_orbit, "sideralOrbit")?;
                CelestialBody::moon(name, mass, radius, orbital_radius, period, parent)
                    .map_err(|e| self.invalid(e))
            }
            (Some(RecordRole::Moon), None) => Err(CatalogError::MissingField {
                name,
                field: "aroundPlanet",
            }),
            (None, _) => Err(CatalogError::Unsupported { name }),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Document {
    Wrapped { bodies: Vec<CatalogRecord> },
    Bare(Vec<CatalogRecord>),
}

/// Parsed catalog records, in document order.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    records: Vec<CatalogRecord>,
}

impl Catalog {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let bytes = std::fs::read(path)?;
        Self::from_slice(&bytes)
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self, CatalogError> {
        let records = match serde_json::from_slice::<Document>(bytes)? {
            Document::Wrapped { bodies } => bodies,
            Document::Bare(bodies) => bodies,
        };
        Ok(Self { records })
    }

    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        Self::from_slice(json.as_bytes())
    }

    pub fn records(&self) -> &[CatalogRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Record by English name.
    pub fn get(&self, english_name: &str) -> Option<&CatalogRecord> {
        self.records.iter().find(|r| r.english_name == english_name)
    }

    pub fn planets(&self) -> impl Iterator<Item = &CatalogRecord> {
        self.records
            .iter()
            .filter(|r| r.role() == Some(RecordRole::Planet))
    }

    /// Build a system from the catalog: stars, then planets, then moons whose
    /// parent planet made it in. Records that cannot become a valid body are
    /// skipped with a warning.
    pub fn build_system(&self) -> SolarSystem {
        let mut system = SolarSystem::new();
        let mut planet_ids: HashMap<&str, BodyId> = HashMap::new();

        for role in [RecordRole::Star, RecordRole::Planet, RecordRole::Moon] {
            for record in self.records.iter().filter(|r| r.role() == Some(role)) {
                let parent = record
                    .around_planet
                    .as_ref()
                    .and_then(|p| planet_ids.get(p.planet.as_str()).copied());
                if role == RecordRole::Moon && parent.is_none() {
                    warn!("Skipping moon '{}': parent planet not loaded", record.name());
                    continue;
                }

                let body = match record.to_body(parent) {
                    Ok(body) => body,
                    Err(err) => {
                        warn!("Skipping catalog record: {err}");
                        continue;
                    }
                };

                match system.add_celestial_body(body) {
                    Ok(id) if role == RecordRole::Planet => {
                        planet_ids.insert(record.id.as_str(), id);
                    }
                    Ok(_) => {}
                    Err(err) => warn!("Skipping catalog record: {err}"),
                }
            }
        }

        system
    }
}
