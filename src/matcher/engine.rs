//! Nearest-persona matching.
//!
//! A candidate is validated first; a valid candidate is assigned to the
//! persona at the smallest Euclidean distance, with ties going to the
//! persona registered first.

use tracing::{debug, warn};

use crate::persona::PersonaRegistry;

use super::candidate::Candidate;
use super::outcome::{DistanceMap, InvalidReason, MatchOutcome, WarningCode};

/// Inclusive lower bound for a trait score.
pub const SCORE_MIN: f64 = 0.0;
/// Inclusive upper bound for a trait score.
pub const SCORE_MAX: f64 = 100.0;

/// Check scores in trait order, reporting the first failure.
///
/// NaN is out of range.
pub fn validate(candidate: &Candidate) -> Result<(), InvalidReason> {
    if let Some((score_trait, score)) = candidate
        .scores
        .iter()
        .find(|(_, score)| !(SCORE_MIN..=SCORE_MAX).contains(score))
    {
        return Err(InvalidReason::OutOfRangeScore { score_trait, score });
    }

    if candidate.scores.iter().all(|(_, score)| score == 0.0) {
        return Err(InvalidReason::DegenerateZeroProfile);
    }

    Ok(())
}

/// Distance from the candidate to every persona, in registry order.
pub fn distances(candidate: &Candidate, registry: &PersonaRegistry) -> DistanceMap {
    let mut map = DistanceMap::new();
    for persona in registry.personas() {
        map.push(persona.department.clone(), candidate.scores.distance(&persona.traits));
    }
    map
}

/// Match one candidate against the registry.
pub fn match_candidate(candidate: &Candidate, registry: &PersonaRegistry) -> MatchOutcome {
    if let Err(reason) = validate(candidate) {
        match reason {
            InvalidReason::DegenerateZeroProfile => {
                warn!(
                    code = %WarningCode::DegenerateZeroProfile,
                    "All-zero candidate profile"
                );
            }
            InvalidReason::OutOfRangeScore { score_trait, score } => {
                debug!(%score_trait, score, "Candidate score out of range");
            }
        }
        return MatchOutcome::Invalid(reason);
    }

    let distances = distances(candidate, registry);
    let best_department = match distances.nearest() {
        Some((department, distance)) => {
            debug!(
                candidate = %candidate,
                department,
                distance,
                "Nearest persona"
            );
            department.to_string()
        }
        // PersonaRegistry never holds zero personas.
        None => unreachable!("persona registry is empty"),
    };

    MatchOutcome::Matched {
        best_department,
        distances,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persona::types::Persona;
    use crate::persona::{Trait, TraitVector};

    fn registry() -> PersonaRegistry {
        PersonaRegistry::reference()
    }

    #[test]
    fn test_exact_persona_has_zero_distance() {
        let candidate = Candidate::new(85.8, 87.1, 78.3, 83.0);
        let outcome = match_candidate(&candidate, &registry());
        assert_eq!(outcome.best_department(), Some("Sales"));
        assert_eq!(outcome.distances().unwrap().get("Sales"), Some(0.0));
    }

    #[test]
    fn test_every_persona_gets_a_distance() {
        let candidate = Candidate::new(50.0, 50.0, 50.0, 50.0);
        let registry = registry();
        let outcome = match_candidate(&candidate, &registry);
        let distances = outcome.distances().unwrap();

        assert_eq!(distances.len(), registry.len());
        for persona in registry.personas() {
            let d = distances.get(&persona.department).unwrap();
            assert!(d.is_finite() && d > 0.0);
        }
    }

    #[test]
    fn test_argmin_matches_direct_recomputation() {
        let candidate = Candidate::new(50.0, 50.0, 50.0, 50.0);
        let registry = registry();
        let outcome = match_candidate(&candidate, &registry);

        let mut expected: Option<(&str, f64)> = None;
        for p in registry.personas() {
            let t = &p.traits;
            let d = ((50.0 - t.diplomatic).powi(2)
                + (50.0 - t.balanced).powi(2)
                + (50.0 - t.sociable).powi(2)
                + (50.0 - t.innovative).powi(2))
            .sqrt();
            if expected.map_or(true, |(_, best)| d < best) {
                expected = Some((p.department.as_str(), d));
            }
            let got = outcome.distances().unwrap().get(&p.department).unwrap();
            assert!((got - d).abs() < 1e-9);
        }
        assert_eq!(outcome.best_department(), expected.map(|(name, _)| name));
    }

    #[test]
    fn test_default_slider_profile() {
        let outcome = match_candidate(&Candidate::new(85.0, 90.0, 75.0, 80.0), &registry());
        assert_eq!(outcome.best_department(), Some("Sales"));
    }

    #[test]
    fn test_out_of_range_is_invalid() {
        let registry = registry();
        for candidate in [
            Candidate::new(-0.1, 50.0, 50.0, 50.0),
            Candidate::new(50.0, 100.5, 50.0, 50.0),
            Candidate::new(50.0, 50.0, 150.0, 50.0),
            Candidate::new(50.0, 50.0, 50.0, f64::NAN),
            Candidate::new(50.0, 50.0, 50.0, f64::INFINITY),
        ] {
            let outcome = match_candidate(&candidate, &registry);
            assert!(!outcome.is_valid(), "{candidate} should be invalid");
            assert!(outcome.distances().is_none());
            assert!(outcome.best_department().is_none());
            assert_eq!(outcome.warning(), None);
        }
    }

    #[test]
    fn test_first_offending_trait_reported() {
        let err = validate(&Candidate::new(50.0, 150.0, -3.0, 50.0)).unwrap_err();
        assert_eq!(
            err,
            InvalidReason::OutOfRangeScore {
                score_trait: Trait::Balanced,
                score: 150.0
            }
        );
    }

    #[test]
    fn test_bounds_are_inclusive() {
        assert!(validate(&Candidate::new(0.0, 100.0, 0.0, 100.0)).is_ok());
        assert!(validate(&Candidate::new(100.0, 100.0, 100.0, 100.0)).is_ok());
    }

    #[test]
    fn test_all_zero_is_invalid_with_warning() {
        let outcome = match_candidate(&Candidate::new(0.0, 0.0, 0.0, 0.0), &registry());
        assert_eq!(
            outcome,
            MatchOutcome::Invalid(InvalidReason::DegenerateZeroProfile)
        );
        assert_eq!(outcome.warning(), Some(WarningCode::DegenerateZeroProfile));
    }

    #[test]
    fn test_range_checked_before_zero_profile() {
        let err = validate(&Candidate::new(0.0, 0.0, 0.0, -1.0)).unwrap_err();
        assert!(matches!(err, InvalidReason::OutOfRangeScore { .. }));
    }

    #[test]
    fn test_deterministic() {
        let candidate = Candidate::new(61.0, 72.5, 88.0, 40.0);
        let registry = registry();
        assert_eq!(
            match_candidate(&candidate, &registry),
            match_candidate(&candidate, &registry)
        );
    }

    #[test]
    fn test_tie_goes_to_first_registered() {
        let v = TraitVector::new(50.0, 50.0, 50.0, 50.0);
        let registry = PersonaRegistry::new(vec![
            Persona::new("Zeta", v),
            Persona::new("Alpha", v),
            Persona::new("Far", TraitVector::new(0.0, 0.0, 0.0, 0.0)),
        ])
        .unwrap();

        let outcome = match_candidate(&Candidate::new(60.0, 40.0, 50.0, 50.0), &registry);
        assert_eq!(outcome.best_department(), Some("Zeta"));

        let swapped = PersonaRegistry::new(vec![Persona::new("Alpha", v), Persona::new("Zeta", v)])
            .unwrap();
        let outcome = match_candidate(&Candidate::new(60.0, 40.0, 50.0, 50.0), &swapped);
        assert_eq!(outcome.best_department(), Some("Alpha"));
    }
}
