//! Consent strategies and the decision table.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ConsentError;

/// When third-party scripts load relative to the visitor's consent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConsentStrategy {
    /// Consent is never asked for; scripts always load.
    AlwaysGrant,
    /// Scripts always load, consent is revoked until given.
    RevokeImmediately,
    /// Scripts always load; consent is only revoked once geolocation says
    /// it is required.
    #[default]
    #[serde(alias = "load-scripts-then-revoke-consent-after-geolocation-check")]
    RevokeAfterGeoCheck,
    /// Scripts load only after consent, or when none is required.
    RequireBeforeLoading,
}

impl ConsentStrategy {
    pub const ALL: [ConsentStrategy; 4] = [
        ConsentStrategy::AlwaysGrant,
        ConsentStrategy::RevokeImmediately,
        ConsentStrategy::RevokeAfterGeoCheck,
        ConsentStrategy::RequireBeforeLoading,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ConsentStrategy::AlwaysGrant => "always-grant",
            ConsentStrategy::RevokeImmediately => "revoke-immediately",
            ConsentStrategy::RevokeAfterGeoCheck => "revoke-after-geo-check",
            ConsentStrategy::RequireBeforeLoading => "require-before-loading",
        }
    }
}

impl fmt::Display for ConsentStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConsentStrategy {
    type Err = ConsentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "load-scripts-then-revoke-consent-after-geolocation-check" => {
                Ok(ConsentStrategy::RevokeAfterGeoCheck)
            }
            _ => ConsentStrategy::ALL
                .into_iter()
                .find(|strategy| strategy.as_str() == s)
                .ok_or_else(|| ConsentError::UnknownStrategy(s.to_string())),
        }
    }
}

/// A decision the visitor made explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserDecision {
    Granted,
    Denied,
}

impl UserDecision {
    /// The persisted form: `"true"` or `"false"`.
    pub fn as_stored(self) -> &'static str {
        match self {
            UserDecision::Granted => "true",
            UserDecision::Denied => "false",
        }
    }

    /// Reads a persisted value. Anything but `"true"` or `"false"` counts as
    /// no decision.
    pub fn from_stored(value: &str) -> Option<Self> {
        match value {
            "true" => Some(UserDecision::Granted),
            "false" => Some(UserDecision::Denied),
            _ => None,
        }
    }
}

/// Consent status reported to trackers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsentStatus {
    Granted,
    Denied,
}

impl ConsentStatus {
    pub fn is_granted(self) -> bool {
        self == ConsentStatus::Granted
    }
}

/// The facts derived from one consent state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsentDecision {
    pub consent_status: ConsentStatus,
    pub should_load_scripts: bool,
    pub should_show_banner: bool,
}

/// Applies `strategy` to a user decision (`None` when unset) and a consent
/// requirement (`None` while unknown).
///
/// The banner shows only while the visitor has not decided and consent is
/// known to be required. `AlwaysGrant` ignores both inputs.
pub fn decide(
    strategy: ConsentStrategy,
    user_decision: Option<UserDecision>,
    requires_consent: Option<bool>,
) -> ConsentDecision {
    use ConsentStatus::{Denied, Granted};

    if strategy == ConsentStrategy::AlwaysGrant {
        return ConsentDecision {
            consent_status: Granted,
            should_load_scripts: true,
            should_show_banner: false,
        };
    }

    let should_show_banner = user_decision.is_none() && requires_consent == Some(true);
    let consent_status = match (user_decision, requires_consent) {
        (Some(UserDecision::Granted), _) => Granted,
        (Some(UserDecision::Denied), _) => Denied,
        (None, Some(true)) => Denied,
        (None, Some(false)) => Granted,
        (None, None) => match strategy {
            ConsentStrategy::RevokeAfterGeoCheck => Granted,
            _ => Denied,
        },
    };
    let should_load_scripts = match strategy {
        ConsentStrategy::RequireBeforeLoading => consent_status.is_granted(),
        _ => true,
    };

    ConsentDecision {
        consent_status,
        should_load_scripts,
        should_show_banner,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strategy_names_round_trip() {
        for strategy in ConsentStrategy::ALL {
            assert_eq!(strategy.as_str().parse::<ConsentStrategy>().unwrap(), strategy);
        }
    }

    #[test]
    fn long_geolocation_name_is_accepted() {
        let parsed: ConsentStrategy = serde_json::from_str(
            "\"load-scripts-then-revoke-consent-after-geolocation-check\"",
        )
        .unwrap();
        assert_eq!(parsed, ConsentStrategy::RevokeAfterGeoCheck);
    }

    #[test]
    fn unknown_strategy_is_rejected() {
        assert!("sometimes".parse::<ConsentStrategy>().is_err());
    }

    #[test]
    fn stored_values() {
        assert_eq!(UserDecision::from_stored("true"), Some(UserDecision::Granted));
        assert_eq!(UserDecision::from_stored("false"), Some(UserDecision::Denied));
        assert_eq!(UserDecision::from_stored("TRUE"), None);
        assert_eq!(UserDecision::from_stored(""), None);
    }
}
