use dioxus::prelude::*;
use dioxus_router::Link;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, use_session, view_state_from_resource};

#[component]
pub fn HomeView() -> Element {
    let ctx = use_context::<AppContext>();
    let snapshot = use_session();
    let catalog = ctx.catalog();

    let resource = use_resource(move || {
        let catalog = catalog.clone();
        async move {
            catalog
                .stats()
                .await
                .map_err(|err| ViewError::from_api(&err))
        }
    });
    let state = view_state_from_resource(&resource);
    let signed_in = snapshot.read().is_authenticated();

    rsx! {
        div { class: "page home",
            section { class: "hero",
                h1 { "Build lasting self-confidence" }
                p { class: "lead",
                    "A guided program of short modules and practical exercises to speak up, "
                    "set boundaries and trust yourself."
                }
                if signed_in {
                    Link { class: "btn btn-primary", to: Route::Dashboard {}, "Continue my program" }
                } else {
                    Link {
                        class: "btn btn-primary",
                        to: Route::Auth { tab: "register".to_string() },
                        "Start now"
                    }
                }
            }

            section { class: "stats",
                match state {
                    ViewState::Idle | ViewState::Loading => rsx! {
                        p { class: "muted", "Loading..." }
                    },
                    ViewState::Ready(stats) => rsx! {
                        div { class: "stat",
                            strong { "{stats.total_students}+" }
                            span { "students" }
                        }
                        div { class: "stat",
                            strong { "{stats.completion_rate}%" }
                            span { "completion rate" }
                        }
                        div { class: "stat",
                            strong { "{stats.average_rating:.1}/5" }
                            span { "average rating" }
                        }
                        div { class: "stat",
                            strong { "{stats.module_count}" }
                            span { "modules" }
                        }
                    },
                    ViewState::Error(_) => rsx! {},
                }
            }
        }
    }
}
