//! Cookie consent for cmskit sites.
//!
//! [`decide`] is the pure strategy table mapping a visitor's stored decision
//! and the consent requirement of their origin to three facts: whether
//! tracking scripts load, the consent status trackers are told, and whether
//! the consent banner shows. [`ConsentEngine`] holds that state for one
//! session: it reads the [`DecisionStore`], asks a [`RequirementProbe`] when
//! the visitor has not decided yet, and publishes every change.
//!
//! The server side of the probe is [`geo::requires_consent_for_country`].

mod config;
mod engine;
mod error;
pub mod geo;
mod probe;
mod store;
mod strategy;
pub mod trackers;

pub use config::{ConsentConfig, DEFAULT_BASE_URL, DEFAULT_CONSENT_API_PATH};
pub use engine::{ConsentEngine, ConsentSnapshot, ConsentState};
pub use error::{ConsentError, ConsentResult};
pub use probe::{HttpRequirementProbe, RequirementProbe};
pub use store::{DECISION_KEY, DecisionStore, FileDecisionStore, MemoryDecisionStore};
pub use strategy::{ConsentDecision, ConsentStatus, ConsentStrategy, UserDecision, decide};
