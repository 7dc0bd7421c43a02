//! Persona registry: the ordered, immutable set of department personas.
//!
//! Registration order is significant: when two personas are equidistant
//! from a candidate, the one registered first wins.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{Error, Result};

use super::types::{Persona, Trait, TraitVector};

/// Default personas file shipped with the binary.
pub const BUNDLED_PERSONAS_TOML: &str = include_str!("../../config/personas.toml");

/// Result column names a department may not take.
const RESERVED_DEPARTMENTS: [&str; 3] = ["Candidate", "Best Department", "Message"];

/// Ordered collection of personas, keyed by department name.
#[derive(Debug, Clone, PartialEq)]
pub struct PersonaRegistry {
    personas: Vec<Persona>,
}

impl PersonaRegistry {
    /// Build a registry, rejecting empty input, reserved names and
    /// duplicate departments.
    pub fn new(personas: Vec<Persona>) -> Result<Self> {
        if personas.is_empty() {
            return Err(Error::RegistryEmpty);
        }

        let mut seen = HashSet::new();
        for persona in &personas {
            if RESERVED_DEPARTMENTS.contains(&persona.department.as_str()) {
                return Err(Error::ReservedDepartment {
                    department: persona.department.clone(),
                });
            }
            if !seen.insert(persona.department.as_str()) {
                return Err(Error::DuplicatePersona {
                    department: persona.department.clone(),
                });
            }
        }

        Ok(Self { personas })
    }

    /// The five reference department personas.
    pub fn reference() -> Self {
        Self {
            personas: vec![
                Persona::new("Sales", TraitVector::new(85.80, 87.10, 78.30, 83.00))
                    .with_metric("SalesRevenue", 485000.00)
                    .with_metric("MarketShare", 5.09),
                Persona::new("Retail", TraitVector::new(78.60, 81.00, 87.30, 71.00))
                    .with_metric("SalesRevenue", 406700.00)
                    .with_metric("MarketShare", 4.06),
                Persona::new("Product", TraitVector::new(70.50, 86.50, 76.70, 90.60))
                    .with_metric("EBIT", 502000.00)
                    .with_metric("ProjectDeliveryRate", 90.00),
                Persona::new("HR", TraitVector::new(86.50, 90.50, 80.60, 76.30))
                    .with_metric("RetentionRate", 85.50),
                Persona::new("Legal", TraitVector::new(90.40, 85.60, 70.40, 80.60))
                    .with_metric("ComplianceRate", 95.10),
            ],
        }
    }

    /// Load from a personas TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "Loading personas file");
        let content = fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => Error::config_not_found(path),
            _ => Error::IoRead {
                path: path.to_path_buf(),
                source: e,
            },
        })?;
        let file: PersonaFile =
            toml::from_str(&content).map_err(|e| Error::config_parse(path, e))?;
        let registry = Self::from_file(file)?;
        info!(
            path = %path.display(),
            personas = registry.len(),
            "Persona registry loaded"
        );
        Ok(registry)
    }

    /// Parse a personas TOML document.
    #[cfg(test)]
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: PersonaFile =
            toml::from_str(content).map_err(|e| Error::config_parse("<inline>", e))?;
        Self::from_file(file)
    }

    fn from_file(file: PersonaFile) -> Result<Self> {
        let personas = file
            .personas
            .into_iter()
            .map(RawPersona::into_persona)
            .collect::<Result<Vec<_>>>()?;
        Self::new(personas)
    }

    /// Personas in registration order.
    pub fn personas(&self) -> &[Persona] {
        &self.personas
    }

    #[cfg(test)]
    pub fn get(&self, department: &str) -> Option<&Persona> {
        self.personas.iter().find(|p| p.department == department)
    }

    /// Department names in registration order.
    pub fn departments(&self) -> impl Iterator<Item = &str> {
        self.personas.iter().map(|p| p.department.as_str())
    }

    pub fn len(&self) -> usize {
        self.personas.len()
    }
}

// ─────────────────────────────────────────────────────────────────
// File format
// ─────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct PersonaFile {
    #[serde(default, rename = "persona")]
    personas: Vec<RawPersona>,
}

#[derive(Debug, Deserialize)]
struct RawPersona {
    department: String,
    traits: toml::Table,
    #[serde(default)]
    metrics: toml::Table,
}

impl RawPersona {
    fn into_persona(self) -> Result<Persona> {
        let mut declared = HashSet::new();
        for key in self.traits.keys() {
            let t = key.parse::<Trait>().map_err(|_| Error::UnknownTrait {
                department: self.department.clone(),
                trait_name: key.clone(),
            })?;
            if !declared.insert(t) {
                return Err(Error::config_field_invalid(
                    format!("{}.traits.{}", self.department, key),
                    format!(
                        "trait '{}' of '{}' is declared more than once",
                        t.key(),
                        self.department
                    ),
                ));
            }
        }

        let mut scores = [0.0; 4];
        for (slot, t) in scores.iter_mut().zip(Trait::all()) {
            let value = self
                .traits
                .iter()
                .find(|(k, _)| k.parse::<Trait>().ok() == Some(*t))
                .map(|(_, v)| v)
                .ok_or_else(|| Error::MissingTrait {
                    department: self.department.clone(),
                    trait_name: t.key().to_string(),
                })?;
            *slot = number(value).filter(|v| v.is_finite()).ok_or_else(|| {
                Error::config_field_invalid(
                    format!("{}.traits.{}", self.department, t.key()),
                    format!(
                        "trait '{}' of '{}' must be a finite number",
                        t.key(),
                        self.department
                    ),
                )
            })?;
        }

        let mut persona = Persona::new(self.department.clone(), TraitVector::from_array(scores));
        for (name, value) in &self.metrics {
            let value = number(value).ok_or_else(|| {
                Error::config_field_invalid(
                    format!("{}.metrics.{}", self.department, name),
                    format!("metric '{}' of '{}' must be a number", name, self.department),
                )
            })?;
            persona = persona.with_metric(name.clone(), value);
        }

        Ok(persona)
    }
}

fn number(value: &toml::Value) -> Option<f64> {
    match value {
        toml::Value::Float(f) => Some(*f),
        toml::Value::Integer(i) => Some(*i as f64),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_reference_order() {
        let registry = PersonaRegistry::reference();
        let names: Vec<_> = registry.departments().collect();
        assert_eq!(names, ["Sales", "Retail", "Product", "HR", "Legal"]);
    }

    #[test]
    fn test_bundled_file_matches_reference() {
        let bundled = PersonaRegistry::from_toml_str(BUNDLED_PERSONAS_TOML).unwrap();
        assert_eq!(bundled, PersonaRegistry::reference());
    }

    #[test]
    fn test_get() {
        let registry = PersonaRegistry::reference();
        let hr = registry.get("HR").unwrap();
        assert_eq!(hr.traits.balanced, 90.5);
        assert_eq!(hr.metric("RetentionRate"), Some(85.5));
        assert!(registry.get("Finance").is_none());
    }

    #[test]
    fn test_empty_rejected() {
        assert!(matches!(
            PersonaRegistry::new(vec![]),
            Err(Error::RegistryEmpty)
        ));
        assert!(matches!(
            PersonaRegistry::from_toml_str(""),
            Err(Error::RegistryEmpty)
        ));
    }

    #[test]
    fn test_duplicate_rejected() {
        let v = TraitVector::new(1.0, 2.0, 3.0, 4.0);
        let err = PersonaRegistry::new(vec![Persona::new("Ops", v), Persona::new("Ops", v)])
            .unwrap_err();
        assert!(matches!(err, Error::DuplicatePersona { ref department } if department == "Ops"));
    }

    #[test]
    fn test_result_column_names_rejected() {
        let v = TraitVector::new(1.0, 2.0, 3.0, 4.0);
        for name in ["Candidate", "Best Department", "Message"] {
            let err = PersonaRegistry::new(vec![Persona::new("Ops", v), Persona::new(name, v)])
                .unwrap_err();
            assert!(
                matches!(err, Error::ReservedDepartment { ref department } if department == name)
            );
        }
        assert!(PersonaRegistry::new(vec![Persona::new("Candidates", v)]).is_ok());
    }

    #[test]
    fn test_trait_declared_twice_in_different_case_rejected() {
        let toml = r#"
[[persona]]
department = "Ops"
[persona.traits]
Diplomatic = 10
diplomatic = 90
balanced = 50
sociable = 50
innovative = 50
"#;
        let err = PersonaRegistry::from_toml_str(toml).unwrap_err();
        match err {
            Error::ConfigValidation { message, field } => {
                assert!(message.contains("more than once"));
                assert_eq!(field.as_deref(), Some("Ops.traits.diplomatic"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_missing_trait_rejected() {
        let toml = r#"
[[persona]]
department = "Ops"
[persona.traits]
diplomatic = 50
balanced = 50
innovative = 50
"#;
        let err = PersonaRegistry::from_toml_str(toml).unwrap_err();
        match err {
            Error::MissingTrait {
                department,
                trait_name,
            } => {
                assert_eq!(department, "Ops");
                assert_eq!(trait_name, "sociable");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_trait_rejected() {
        let toml = r#"
[[persona]]
department = "Ops"
[persona.traits]
diplomatic = 50
balanced = 50
sociable = 50
innovative = 50
creative = 50
"#;
        let err = PersonaRegistry::from_toml_str(toml).unwrap_err();
        assert!(matches!(err, Error::UnknownTrait { ref trait_name, .. } if trait_name == "creative"));
    }

    #[test]
    fn test_non_numeric_trait_rejected() {
        let toml = r#"
[[persona]]
department = "Ops"
[persona.traits]
diplomatic = "high"
balanced = 50
sociable = 50
innovative = 50
"#;
        let err = PersonaRegistry::from_toml_str(toml).unwrap_err();
        assert!(matches!(err, Error::ConfigValidation { .. }));
    }

    #[test]
    fn test_non_finite_trait_rejected() {
        let toml = r#"
[[persona]]
department = "Ops"
[persona.traits]
diplomatic = nan
balanced = 50
sociable = 50
innovative = 50
"#;
        let err = PersonaRegistry::from_toml_str(toml).unwrap_err();
        assert!(matches!(err, Error::ConfigValidation { .. }));
    }

    #[test]
    fn test_trait_range_not_enforced_at_load() {
        let toml = r#"
[[persona]]
department = "Outlier"
[persona.traits]
diplomatic = 120
balanced = -5
sociable = 50
innovative = 50
"#;
        let registry = PersonaRegistry::from_toml_str(toml).unwrap();
        assert_eq!(registry.get("Outlier").unwrap().traits.diplomatic, 120.0);
    }

    #[test]
    fn test_load_from_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("personas.toml");
        fs::write(&path, BUNDLED_PERSONAS_TOML).unwrap();
        let registry = PersonaRegistry::load(&path).unwrap();
        assert_eq!(registry.len(), 5);
    }

    #[test]
    fn test_load_missing_file() {
        let tmp = TempDir::new().unwrap();
        let err = PersonaRegistry::load(&tmp.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, Error::ConfigNotFound { .. }));
    }
}
