use boost_core::NavTarget;
use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable, use_navigator};

use crate::context::AppContext;
use crate::notifications::{NoticeStack, Notices, Notifier, use_notifier};
use crate::views::{AuthView, DashboardView, HomeView, ModuleView, PaymentView, use_session};

#[derive(Clone, Routable, PartialEq, Debug)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Shell)]
        #[route("/", HomeView)] Home {},
        #[route("/auth?:tab", AuthView)] Auth { tab: String },
        #[route("/dashboard", DashboardView)] Dashboard {},
        #[route("/module/:id", ModuleView)] Module { id: u64 },
        #[route("/payment?:checkout_id", PaymentView)] Payment { checkout_id: String },
}

impl From<NavTarget> for Route {
    fn from(target: NavTarget) -> Self {
        match target {
            NavTarget::Auth { tab } => Self::Auth {
                tab: tab.as_query().to_string(),
            },
            NavTarget::Dashboard => Self::Dashboard {},
        }
    }
}

/// Root layout: restores and reconciles the session, follows service
/// navigation requests and hosts notifications.
#[component]
fn Shell() -> Element {
    let ctx = use_context::<AppContext>();
    let snapshot = use_context_provider(|| Signal::new(ctx.session().snapshot()));
    let notices = use_signal(Notices::default);
    use_context_provider(|| Notifier::new(notices));
    let navigator = use_navigator();

    let session = ctx.session();
    let auth = ctx.auth();
    use_future(move || {
        let session = session.clone();
        let auth = auth.clone();
        let mut snapshot = snapshot;
        async move {
            let mut rx = session.subscribe();
            if session.restore().await.is_authenticated() {
                // Cached user may be stale.
                spawn(async move {
                    if let Err(err) = auth.reconcile_session().await {
                        tracing::warn!(error = %err, "could not refresh the cached user");
                    }
                });
            }
            loop {
                let current = rx.borrow_and_update().clone();
                snapshot.set(current);
                if rx.changed().await.is_err() {
                    break;
                }
            }
        }
    });

    let navigation = ctx.navigation();
    use_future(move || {
        let navigation = navigation.clone();
        async move {
            let mut rx = navigation.subscribe();
            while rx.changed().await.is_ok() {
                let target = *rx.borrow_and_update();
                if let Some(target) = target {
                    tracing::debug!(?target, "following navigation request");
                    navigator.push(Route::from(target));
                }
            }
        }
    });

    rsx! {
        div { class: "app",
            Header {}
            main { class: "content",
                Outlet::<Route> {}
            }
            NoticeStack {}
        }
    }
}

#[component]
fn Header() -> Element {
    let ctx = use_context::<AppContext>();
    let snapshot = use_session();
    let notifier = use_notifier();
    let navigator = use_navigator();
    let user = snapshot.read().session.user().cloned();

    let on_logout = move |_| {
        let session = ctx.session();
        spawn(async move {
            session.logout().await;
            notifier.info("You are signed out.");
            navigator.push(Route::Home {});
        });
    };

    rsx! {
        header { class: "topbar",
            Link { class: "brand", to: Route::Home {}, "ConfianceBoost" }
            nav { class: "topbar-links",
                match user {
                    Some(user) => rsx! {
                        Link { to: Route::Dashboard {}, "Dashboard" }
                        if user.is_premium {
                            span { class: "badge badge-premium", "Premium" }
                        } else {
                            Link {
                                class: "cta-premium",
                                to: Route::Payment { checkout_id: String::new() },
                                "Go Premium"
                            }
                        }
                        span { class: "avatar", title: "{user.full_name()}", "{user.initials()}" }
                        button { class: "btn btn-ghost", onclick: on_logout, "Log out" }
                    },
                    None => rsx! {
                        Link { to: Route::Auth { tab: "login".to_string() }, "Sign in" }
                        Link {
                            class: "btn btn-primary",
                            to: Route::Auth { tab: "register".to_string() },
                            "Get started"
                        }
                    },
                }
            }
        }
    }
}
