//! The consent engine: one visitor session's consent state.

use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::error::ConsentResult;
use crate::probe::RequirementProbe;
use crate::store::DecisionStore;
use crate::strategy::{ConsentDecision, ConsentStrategy, UserDecision, decide};

/// Inputs of the decision table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsentState {
    pub strategy: ConsentStrategy,
    pub user_decision: Option<UserDecision>,
    /// `None` until the requirement probe settles, and forever if it never
    /// does.
    pub requires_consent: Option<bool>,
}

impl ConsentState {
    pub fn decision(&self) -> ConsentDecision {
        decide(self.strategy, self.user_decision, self.requires_consent)
    }
}

/// A state together with the decision derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsentSnapshot {
    pub state: ConsentState,
    pub decision: ConsentDecision,
}

impl From<ConsentState> for ConsentSnapshot {
    fn from(state: ConsentState) -> Self {
        Self {
            state,
            decision: state.decision(),
        }
    }
}

/// Consent state of one mounted session.
///
/// Every change is published on a [`watch`] channel; script loaders
/// [`subscribe`](ConsentEngine::subscribe) to learn when consent settles.
/// Dropping the engine unmounts it.
pub struct ConsentEngine {
    strategy: ConsentStrategy,
    store: Arc<dyn DecisionStore>,
    state: Arc<watch::Sender<ConsentSnapshot>>,
    alive: Arc<AtomicBool>,
    probe_task: Option<JoinHandle<()>>,
}

impl ConsentEngine {
    /// Mounts an engine for `strategy`.
    ///
    /// `AlwaysGrant` never touches the store or the probe. Every other
    /// strategy reads the stored decision; when there is none, exactly one
    /// probe is started on the current tokio runtime. An unreadable store
    /// counts as no decision.
    pub fn mount(
        strategy: ConsentStrategy,
        store: Arc<dyn DecisionStore>,
        probe: Arc<dyn RequirementProbe>,
    ) -> ConsentResult<Self> {
        let alive = Arc::new(AtomicBool::new(true));

        if strategy == ConsentStrategy::AlwaysGrant {
            let state = ConsentState {
                strategy,
                user_decision: None,
                requires_consent: Some(false),
            };
            let (tx, _) = watch::channel(ConsentSnapshot::from(state));
            info!(%strategy, "consent mounted, probe skipped");
            return Ok(Self {
                strategy,
                store,
                state: Arc::new(tx),
                alive,
                probe_task: None,
            });
        }

        let user_decision = store.load().unwrap_or_else(|e| {
            warn!(error = %e, "could not read stored consent decision, treating as undecided");
            None
        });
        let state = ConsentState {
            strategy,
            user_decision,
            requires_consent: None,
        };
        let (tx, _) = watch::channel(ConsentSnapshot::from(state));
        let tx = Arc::new(tx);

        let probe_task = match user_decision {
            Some(decision) => {
                info!(%strategy, ?decision, "consent mounted with stored decision");
                None
            }
            None => {
                let handle = Handle::try_current()?;
                debug!(%strategy, "no stored decision, probing consent requirement");
                Some(handle.spawn(run_probe(probe, tx.clone(), alive.clone())))
            }
        };

        Ok(Self {
            strategy,
            store,
            state: tx,
            alive,
            probe_task,
        })
    }

    pub fn strategy(&self) -> ConsentStrategy {
        self.strategy
    }

    pub fn snapshot(&self) -> ConsentSnapshot {
        *self.state.borrow()
    }

    pub fn decision(&self) -> ConsentDecision {
        self.snapshot().decision
    }

    /// A receiver that sees the current snapshot and every later change.
    pub fn subscribe(&self) -> watch::Receiver<ConsentSnapshot> {
        self.state.subscribe()
    }

    /// Records that the visitor granted consent.
    pub fn accept(&self) -> ConsentDecision {
        self.record(UserDecision::Granted)
    }

    /// Records that the visitor denied consent.
    pub fn reject(&self) -> ConsentDecision {
        self.record(UserDecision::Denied)
    }

    fn record(&self, decision: UserDecision) -> ConsentDecision {
        update(&self.state, |state| state.user_decision = Some(decision));
        if let Err(e) = self.store.save(decision) {
            warn!(error = %e, ?decision, "could not persist consent decision, keeping it for this session");
        }
        let snapshot = self.snapshot();
        info!(?decision, status = ?snapshot.decision.consent_status, "consent decision recorded");
        snapshot.decision
    }

    /// Waits for the requirement probe, if one was started, to finish.
    pub async fn probe_settled(&mut self) {
        if let Some(task) = self.probe_task.take() {
            if let Err(e) = task.await {
                if !e.is_cancelled() {
                    warn!(error = %e, "consent probe task failed");
                }
            }
        }
    }

    /// Stops listening for the probe. A result that arrives later is
    /// discarded.
    pub fn unmount(&mut self) {
        self.alive.store(false, Ordering::SeqCst);
        if let Some(task) = self.probe_task.take() {
            task.abort();
        }
    }
}

impl Drop for ConsentEngine {
    fn drop(&mut self) {
        self.unmount();
    }
}

fn update(state: &watch::Sender<ConsentSnapshot>, f: impl FnOnce(&mut ConsentState)) {
    state.send_modify(|snapshot| {
        f(&mut snapshot.state);
        snapshot.decision = snapshot.state.decision();
    });
}

async fn run_probe(
    probe: Arc<dyn RequirementProbe>,
    state: Arc<watch::Sender<ConsentSnapshot>>,
    alive: Arc<AtomicBool>,
) {
    let requires_consent = match probe.requires_consent().await {
        Ok(required) => required,
        Err(e) => {
            warn!(error = %e, "consent requirement probe failed, assuming consent is required");
            true
        }
    };

    if !alive.load(Ordering::SeqCst) {
        debug!("engine unmounted, discarding probe result");
        return;
    }
    update(&state, |s| s.requires_consent = Some(requires_consent));
    info!(requires_consent, "consent requirement settled");
}
