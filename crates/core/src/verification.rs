//! Bot verification policy
//!
//! Interprets a site-verification response. A request is only treated as
//! coming from a human when the provider reports success and the trust score
//! reaches the threshold.

use serde::{Deserialize, Serialize};

/// Minimum trust score accepted by default.
pub const TRUST_SCORE_THRESHOLD: f64 = 0.5;

/// Site verification response as returned by the provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SiteVerification {
    /// Whether the token was valid
    pub success: bool,

    /// Trust score, absent for providers that do not score
    #[serde(default)]
    pub score: Option<f64>,

    /// Provider error codes
    #[serde(default, rename = "error-codes")]
    pub error_codes: Vec<String>,
}

/// Why a verification was rejected.
#[derive(Debug, Clone, PartialEq)]
pub enum RejectionReason {
    /// The provider reported failure.
    ProviderFailure {
        /// Provider error codes
        error_codes: Vec<String>,
    },

    /// The trust score was missing or below the threshold.
    LowScore {
        /// Reported score
        score: Option<f64>,
        /// Threshold in force
        threshold: f64,
    },
}

/// Verification verdict.
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    /// Likely human.
    Human {
        /// Reported trust score
        score: f64,
    },

    /// Treated as a bot; the guarded operation must not proceed.
    Rejected(RejectionReason),
}

impl Verdict {
    /// Whether the guarded operation may proceed.
    #[must_use]
    pub const fn is_human(&self) -> bool {
        matches!(self, Self::Human { .. })
    }
}

/// Assess a verification response against `threshold`.
#[must_use]
pub fn assess(verification: &SiteVerification, threshold: f64) -> Verdict {
    if !verification.success {
        return Verdict::Rejected(RejectionReason::ProviderFailure {
            error_codes: verification.error_codes.clone(),
        });
    }

    match verification.score {
        Some(score) if score >= threshold => Verdict::Human { score },
        score => Verdict::Rejected(RejectionReason::LowScore { score, threshold }),
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn score_at_threshold_is_human() {
        let verification = SiteVerification {
            success: true,
            score: Some(0.5),
            error_codes: Vec::new(),
        };

        assert_eq!(
            assess(&verification, TRUST_SCORE_THRESHOLD),
            Verdict::Human { score: 0.5 }
        );
    }

    #[test]
    fn low_score_is_rejected() {
        let verification = SiteVerification {
            success: true,
            score: Some(0.3),
            error_codes: Vec::new(),
        };

        let verdict = assess(&verification, TRUST_SCORE_THRESHOLD);

        assert!(!verdict.is_human());
        assert!(matches!(
            verdict,
            Verdict::Rejected(RejectionReason::LowScore {
                score: Some(_),
                ..
            })
        ));
    }

    #[test]
    fn missing_score_is_rejected() {
        let verification = SiteVerification {
            success: true,
            score: None,
            error_codes: Vec::new(),
        };

        assert!(!assess(&verification, TRUST_SCORE_THRESHOLD).is_human());
    }

    #[test]
    fn provider_failure_wins_over_high_score() -> TestResult {
        let verification: SiteVerification = serde_json::from_str(
            r#"{"success":false,"score":0.9,"error-codes":["timeout-or-duplicate"]}"#,
        )?;

        assert_eq!(
            assess(&verification, TRUST_SCORE_THRESHOLD),
            Verdict::Rejected(RejectionReason::ProviderFailure {
                error_codes: vec!["timeout-or-duplicate".to_string()]
            })
        );

        Ok(())
    }
}
