use cmskit_consent::{ConsentDecision, ConsentStatus, ConsentStrategy, UserDecision, decide};
use pretty_assertions::assert_eq;

use ConsentStatus::{Denied, Granted};
use ConsentStrategy::*;

fn expect(status: ConsentStatus, load: bool, banner: bool) -> ConsentDecision {
    ConsentDecision {
        consent_status: status,
        should_load_scripts: load,
        should_show_banner: banner,
    }
}

// ── Undecided visitor ────────────────────────────────────────────

#[test]
fn consent_required() {
    assert_eq!(decide(AlwaysGrant, None, Some(true)), expect(Granted, true, false));
    assert_eq!(decide(RevokeImmediately, None, Some(true)), expect(Denied, true, true));
    assert_eq!(decide(RevokeAfterGeoCheck, None, Some(true)), expect(Denied, true, true));
    assert_eq!(decide(RequireBeforeLoading, None, Some(true)), expect(Denied, false, true));
}

#[test]
fn consent_not_required() {
    for strategy in ConsentStrategy::ALL {
        assert_eq!(
            decide(strategy, None, Some(false)),
            expect(Granted, true, false),
            "{strategy}"
        );
    }
}

#[test]
fn requirement_unknown() {
    assert_eq!(decide(AlwaysGrant, None, None), expect(Granted, true, false));
    assert_eq!(decide(RevokeImmediately, None, None), expect(Denied, true, false));
    assert_eq!(decide(RevokeAfterGeoCheck, None, None), expect(Granted, true, false));
    assert_eq!(decide(RequireBeforeLoading, None, None), expect(Denied, false, false));
}

// ── Decided visitor ──────────────────────────────────────────────

#[test]
fn granted_decision_wins() {
    for strategy in ConsentStrategy::ALL {
        for requires in [None, Some(true), Some(false)] {
            assert_eq!(
                decide(strategy, Some(UserDecision::Granted), requires),
                expect(Granted, true, false),
                "{strategy} {requires:?}"
            );
        }
    }
}

#[test]
fn denied_decision() {
    for requires in [None, Some(true), Some(false)] {
        assert_eq!(
            decide(AlwaysGrant, Some(UserDecision::Denied), requires),
            expect(Granted, true, false)
        );
        assert_eq!(
            decide(RevokeImmediately, Some(UserDecision::Denied), requires),
            expect(Denied, true, false)
        );
        assert_eq!(
            decide(RevokeAfterGeoCheck, Some(UserDecision::Denied), requires),
            expect(Denied, true, false)
        );
        assert_eq!(
            decide(RequireBeforeLoading, Some(UserDecision::Denied), requires),
            expect(Denied, false, false)
        );
    }
}

#[test]
fn banner_only_while_undecided_and_required() {
    for strategy in ConsentStrategy::ALL {
        for decision in [None, Some(UserDecision::Granted), Some(UserDecision::Denied)] {
            for requires in [None, Some(true), Some(false)] {
                let shown = decide(strategy, decision, requires).should_show_banner;
                let expected =
                    strategy != AlwaysGrant && decision.is_none() && requires == Some(true);
                assert_eq!(shown, expected, "{strategy} {decision:?} {requires:?}");
            }
        }
    }
}
