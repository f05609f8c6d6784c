//! Coverage member-match operation
//!
//! Matches a member's "old" coverage (as read off their card) against the
//! coverages known to the system, resolves the match to its beneficiary
//! patient, and copies that beneficiary's identifier onto the member
//! patient supplied in the request. Matching by beneficiary demographics is
//! not implemented; matching goes through the coverage lookup only.
//!
//! Storage stays behind the [`CoverageLookup`] trait so the operation can
//! run against any backend (or an in-memory table in tests). Each failure
//! mode carries its own stable message key for user-facing translation.

use summa_models::{Coverage, Patient};
use thiserror::Error;

/// Operation parameter names, as they appear on the wire.
pub const PARAM_MEMBER_PATIENT: &str = "memberPatient";
pub const PARAM_OLD_COVERAGE: &str = "oldCoverage";
pub const PARAM_NEW_COVERAGE: &str = "newCoverage";

#[derive(Debug, Error)]
pub enum MemberMatchError {
    #[error("missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("could not find a coverage matching the supplied coverage")]
    CoverageNotFound,

    #[error("matched coverage resolves to no beneficiary patient")]
    BeneficiaryNotFound,

    #[error("beneficiary patient carries no identifier")]
    BeneficiaryWithoutIdentifier,
}

impl MemberMatchError {
    /// Stable key identifying this failure in user-facing message catalogs.
    pub fn message_key(&self) -> &'static str {
        match self {
            MemberMatchError::MissingParameter(_) => {
                "operation.member.match.error.missing.parameter"
            }
            MemberMatchError::CoverageNotFound => {
                "operation.member.match.error.coverage.not.found"
            }
            MemberMatchError::BeneficiaryNotFound => {
                "operation.member.match.error.beneficiary.not.found"
            }
            MemberMatchError::BeneficiaryWithoutIdentifier => {
                "operation.member.match.error.beneficiary.without.identifier"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, MemberMatchError>;

/// The three operation inputs, each optional until validated.
#[derive(Debug, Clone, Default)]
pub struct MemberMatchRequest {
    /// The target of the operation; returned with the matched identifier
    /// appended.
    pub member_patient: Option<Patient>,
    /// Old coverage information, as extracted from the beneficiary's card.
    pub old_coverage: Option<Coverage>,
    /// New coverage information, returned unmodified.
    pub new_coverage: Option<Coverage>,
}

/// Successful match result
#[derive(Debug, Clone, PartialEq)]
pub struct MemberMatchOutcome {
    /// The member patient with the beneficiary's identifier appended
    pub member_patient: Patient,
    /// The new coverage, passed through untouched
    pub new_coverage: Coverage,
}

/// Lookup seam to coverage storage.
pub trait CoverageLookup {
    /// Find the stored coverage matching the supplied one (by id or
    /// identifier).
    fn find_matching_coverage(&self, coverage: &Coverage) -> Option<Coverage>;

    /// Resolve a stored coverage to its beneficiary patient.
    fn beneficiary_patient(&self, coverage: &Coverage) -> Option<Patient>;
}

/// Run the member-match operation.
///
/// Parameters are validated for presence in wire order before any lookup;
/// a failure at any step surfaces immediately and nothing is modified.
pub fn member_match(
    request: MemberMatchRequest,
    lookup: &impl CoverageLookup,
) -> Result<MemberMatchOutcome> {
    let mut member_patient = request
        .member_patient
        .ok_or(MemberMatchError::MissingParameter(PARAM_MEMBER_PATIENT))?;
    let old_coverage = request
        .old_coverage
        .ok_or(MemberMatchError::MissingParameter(PARAM_OLD_COVERAGE))?;
    let new_coverage = request
        .new_coverage
        .ok_or(MemberMatchError::MissingParameter(PARAM_NEW_COVERAGE))?;

    let coverage = lookup
        .find_matching_coverage(&old_coverage)
        .ok_or(MemberMatchError::CoverageNotFound)?;
    let beneficiary = lookup
        .beneficiary_patient(&coverage)
        .ok_or(MemberMatchError::BeneficiaryNotFound)?;
    let identifier = beneficiary
        .identifier
        .first()
        .cloned()
        .ok_or(MemberMatchError::BeneficiaryWithoutIdentifier)?;

    member_patient.identifier.push(identifier);
    Ok(MemberMatchOutcome {
        member_patient,
        new_coverage,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use summa_models::{Identifier, Reference};

    /// In-memory lookup: one stored coverage and its beneficiary.
    struct InMemoryLookup {
        coverage: Option<Coverage>,
        beneficiary: Option<Patient>,
    }

    impl CoverageLookup for InMemoryLookup {
        fn find_matching_coverage(&self, coverage: &Coverage) -> Option<Coverage> {
            let stored = self.coverage.as_ref()?;
            (stored.id == coverage.id).then(|| stored.clone())
        }

        fn beneficiary_patient(&self, _coverage: &Coverage) -> Option<Patient> {
            self.beneficiary.clone()
        }
    }

    fn coverage(id: &str) -> Coverage {
        Coverage {
            id: Some(id.to_string()),
            beneficiary: Some(Reference::literal("Patient/pat-9")),
            ..Default::default()
        }
    }

    fn beneficiary_with_identifier() -> Patient {
        Patient {
            id: Some("pat-9".to_string()),
            identifier: vec![Identifier::new("http://example.org/member-ids", "MBR-42")],
            ..Default::default()
        }
    }

    fn full_request() -> MemberMatchRequest {
        MemberMatchRequest {
            member_patient: Some(Patient {
                id: Some("pat-1".to_string()),
                ..Default::default()
            }),
            old_coverage: Some(coverage("cov-1")),
            new_coverage: Some(coverage("cov-2")),
        }
    }

    fn working_lookup() -> InMemoryLookup {
        InMemoryLookup {
            coverage: Some(coverage("cov-1")),
            beneficiary: Some(beneficiary_with_identifier()),
        }
    }

    #[test]
    fn test_successful_match_appends_identifier() {
        let outcome = member_match(full_request(), &working_lookup()).unwrap();

        assert_eq!(outcome.member_patient.identifier.len(), 1);
        assert_eq!(
            outcome.member_patient.identifier[0].value.as_deref(),
            Some("MBR-42")
        );
        // New coverage passes through unmodified.
        assert_eq!(outcome.new_coverage, coverage("cov-2"));
    }

    #[test]
    fn test_each_missing_parameter_reports_its_own_name() {
        let cases: Vec<(Box<dyn Fn(&mut MemberMatchRequest)>, &str)> = vec![
            (Box::new(|r| r.member_patient = None), PARAM_MEMBER_PATIENT),
            (Box::new(|r| r.old_coverage = None), PARAM_OLD_COVERAGE),
            (Box::new(|r| r.new_coverage = None), PARAM_NEW_COVERAGE),
        ];

        for (strip, expected) in cases {
            let mut request = full_request();
            strip(&mut request);
            let err = member_match(request, &working_lookup()).unwrap_err();
            match err {
                MemberMatchError::MissingParameter(name) => assert_eq!(name, expected),
                other => panic!("expected MissingParameter, got {other:?}"),
            }
            assert_eq!(
                err_key(expected),
                "operation.member.match.error.missing.parameter"
            );
        }
    }

    fn err_key(param: &'static str) -> &'static str {
        MemberMatchError::MissingParameter(param).message_key()
    }

    #[test]
    fn test_no_matching_coverage() {
        let lookup = InMemoryLookup {
            coverage: None,
            beneficiary: None,
        };
        let err = member_match(full_request(), &lookup).unwrap_err();
        assert!(matches!(err, MemberMatchError::CoverageNotFound));
        assert_eq!(
            err.message_key(),
            "operation.member.match.error.coverage.not.found"
        );
    }

    #[test]
    fn test_coverage_without_beneficiary() {
        let lookup = InMemoryLookup {
            coverage: Some(coverage("cov-1")),
            beneficiary: None,
        };
        let err = member_match(full_request(), &lookup).unwrap_err();
        assert!(matches!(err, MemberMatchError::BeneficiaryNotFound));
        assert_eq!(
            err.message_key(),
            "operation.member.match.error.beneficiary.not.found"
        );
    }

    #[test]
    fn test_beneficiary_without_identifier() {
        let lookup = InMemoryLookup {
            coverage: Some(coverage("cov-1")),
            beneficiary: Some(Patient {
                id: Some("pat-9".to_string()),
                ..Default::default()
            }),
        };
        let err = member_match(full_request(), &lookup).unwrap_err();
        assert!(matches!(err, MemberMatchError::BeneficiaryWithoutIdentifier));
        assert_eq!(
            err.message_key(),
            "operation.member.match.error.beneficiary.without.identifier"
        );
    }

    #[test]
    fn test_message_keys_are_distinct() {
        let keys = [
            MemberMatchError::MissingParameter(PARAM_OLD_COVERAGE).message_key(),
            MemberMatchError::CoverageNotFound.message_key(),
            MemberMatchError::BeneficiaryNotFound.message_key(),
            MemberMatchError::BeneficiaryWithoutIdentifier.message_key(),
        ];
        for (i, a) in keys.iter().enumerate() {
            for b in keys.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }
}
