use boost_core::guard::{guard_payment, guard_snapshot};
use boost_core::model::SessionSnapshot;
use boost_core::GuardDecision;
use dioxus::prelude::*;
use dioxus_router::use_navigator;

use crate::routes::Route;

/// Which rule a protected page follows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gate {
    /// Any signed-in user.
    Member,
    /// Signed-in users without premium; others are sent elsewhere.
    Checkout,
}

impl Gate {
    /// `admitted` is true once the page has been rendered for this visit.
    /// The checkout page then stays put when the user turns premium, so the
    /// success step can run its own redirect.
    #[must_use]
    pub fn decide(self, snapshot: &SessionSnapshot, admitted: bool) -> GuardDecision {
        match self {
            Self::Member => guard_snapshot(snapshot),
            Self::Checkout if admitted && snapshot.is_authenticated() => GuardDecision::Render,
            Self::Checkout => guard_payment(snapshot),
        }
    }
}

/// Session snapshot published by the shell.
#[must_use]
pub fn use_session() -> Signal<SessionSnapshot> {
    use_context::<Signal<SessionSnapshot>>()
}

/// Renders `children` only once the gate allows it.
///
/// While the session is being restored a neutral placeholder is shown, and
/// protected content is never rendered for a visitor who gets redirected.
#[component]
pub fn Protected(gate: Gate, children: Element) -> Element {
    let snapshot = use_session();
    let navigator = use_navigator();
    let mut admitted = use_signal(|| false);

    use_effect(move || {
        let was_admitted = *admitted.peek();
        match gate.decide(&snapshot.read(), was_admitted) {
            GuardDecision::Render if !was_admitted => admitted.set(true),
            GuardDecision::Redirect(target) => {
                navigator.replace(Route::from(target));
            }
            _ => {}
        }
    });

    match gate.decide(&snapshot.read(), admitted()) {
        GuardDecision::Loading => rsx! {
            div { class: "page page-loading",
                div { class: "spinner" }
                p { "Loading..." }
            }
        },
        GuardDecision::Render => children,
        GuardDecision::Redirect(_) => rsx! {
            div { class: "page page-loading" }
        },
    }
}
