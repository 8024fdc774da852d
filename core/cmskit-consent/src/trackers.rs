//! Which analytics trackers to load, and what to tell them, for a consent
//! decision.

use serde::{Deserialize, Serialize};

use crate::strategy::{ConsentDecision, ConsentStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tracker {
    FacebookPixel,
    GoogleAnalytics,
    GoogleTagManager,
    MicrosoftClarity,
}

impl Tracker {
    /// Google trackers have no revoke path once loaded.
    fn loads_only_when_granted(self) -> bool {
        matches!(self, Tracker::GoogleAnalytics | Tracker::GoogleTagManager)
    }
}

/// Consent signal sent to a loaded tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsentCommand {
    Grant,
    Revoke,
}

impl From<ConsentStatus> for ConsentCommand {
    fn from(status: ConsentStatus) -> Self {
        match status {
            ConsentStatus::Granted => ConsentCommand::Grant,
            ConsentStatus::Denied => ConsentCommand::Revoke,
        }
    }
}

/// Site tracker ids. Empty ids count as not configured.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerIds {
    pub facebook_pixel: Option<String>,
    pub google_analytics: Option<String>,
    pub google_tag_manager: Option<String>,
    pub clarity: Option<String>,
}

impl TrackerIds {
    fn configured(id: &Option<String>) -> Option<&str> {
        id.as_deref().map(str::trim).filter(|id| !id.is_empty())
    }
}

/// What to do with one configured tracker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackerPlan {
    pub tracker: Tracker,
    pub id: String,
    /// Whether the tracker's script is injected.
    pub load_script: bool,
    pub consent_command: ConsentCommand,
    /// Whether page views may be reported.
    pub track_page_view: bool,
}

/// Plans every configured tracker for `decision`.
///
/// Google Analytics is left out when Google Tag Manager is configured, so
/// page views are not counted twice.
pub fn plan_trackers(ids: &TrackerIds, decision: &ConsentDecision) -> Vec<TrackerPlan> {
    let gtm = TrackerIds::configured(&ids.google_tag_manager);
    let ga = TrackerIds::configured(&ids.google_analytics).filter(|_| gtm.is_none());

    [
        (Tracker::FacebookPixel, TrackerIds::configured(&ids.facebook_pixel)),
        (Tracker::GoogleAnalytics, ga),
        (Tracker::GoogleTagManager, gtm),
        (Tracker::MicrosoftClarity, TrackerIds::configured(&ids.clarity)),
    ]
    .into_iter()
    .filter_map(|(tracker, id)| id.map(|id| plan(tracker, id, decision)))
    .collect()
}

fn plan(tracker: Tracker, id: &str, decision: &ConsentDecision) -> TrackerPlan {
    let granted = decision.consent_status.is_granted();
    let load_script = decision.should_load_scripts && (granted || !tracker.loads_only_when_granted());
    TrackerPlan {
        tracker,
        id: id.to_string(),
        load_script,
        consent_command: decision.consent_status.into(),
        track_page_view: load_script && granted,
    }
}
