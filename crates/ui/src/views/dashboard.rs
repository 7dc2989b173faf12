use boost_core::model::{Dashboard, Module};
use dioxus::prelude::*;
use dioxus_router::Link;

use crate::context::AppContext;
use crate::notifications::use_notifier;
use crate::routes::Route;
use crate::views::{Gate, Protected, ViewError, ViewState, use_session, view_state_from_resource};
use crate::vm::{DashboardVm, ModuleCardVm};

#[component]
pub fn DashboardView() -> Element {
    rsx! {
        Protected { gate: Gate::Member,
            DashboardPage {}
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
struct DashboardData {
    dashboard: Dashboard,
    modules: Vec<Module>,
}

#[component]
fn DashboardPage() -> Element {
    let ctx = use_context::<AppContext>();
    let snapshot = use_session();
    let notifier = use_notifier();
    let progress = ctx.progress();
    let catalog = ctx.catalog();
    let mut requesting = use_signal(|| false);

    let resource = {
        let catalog = catalog.clone();
        use_resource(move || {
            let progress = progress.clone();
            let catalog = catalog.clone();
            async move {
                let dashboard = progress
                    .get_dashboard()
                    .await
                    .map_err(|err| ViewError::from_api(&err))?;
                let modules = catalog
                    .modules()
                    .await
                    .map_err(|err| ViewError::from_api(&err))?;
                Ok::<_, ViewError>(DashboardData { dashboard, modules })
            }
        })
    };
    let state = view_state_from_resource(&resource);

    let on_certificate = move |_| {
        if requesting() {
            return;
        }
        let catalog = catalog.clone();
        let mut resource = resource;
        spawn(async move {
            requesting.set(true);
            match catalog.generate_certificate().await {
                Ok(certificate) => {
                    notifier.success(format!("Certificate issued: {}", certificate.title));
                    resource.restart();
                }
                Err(err) => notifier.error(err.user_message()),
            }
            requesting.set(false);
        });
    };

    let retry = move |_| {
        let mut resource = resource;
        resource.restart();
    };

    rsx! {
        div { class: "page dashboard",
            match state {
                ViewState::Idle | ViewState::Loading => rsx! {
                    p { class: "muted", "Loading your progress..." }
                },
                ViewState::Error(err) => rsx! {
                    div { class: "error-panel",
                        p { "{err.message()}" }
                        button { class: "btn", onclick: retry, "Retry" }
                    }
                },
                ViewState::Ready(data) => {
                    let user = snapshot.read().session.user().cloned();
                    let vm = DashboardVm::build(user.as_ref(), &data.dashboard, &data.modules);
                    rsx! {
                        section { class: "dashboard-head",
                            div { class: "avatar avatar-lg", "{vm.initials}" }
                            div {
                                h1 { "{vm.greeting}" }
                                p { class: "muted", "Overall progress: {vm.overall_percentage}%" }
                                div { class: "progress",
                                    div { class: "progress-bar", style: "width: {vm.overall_percentage}%" }
                                }
                            }
                            if !vm.is_premium {
                                Link {
                                    class: "btn btn-premium",
                                    to: Route::Payment { checkout_id: String::new() },
                                    "Unlock Premium"
                                }
                            }
                        }

                        section { class: "tiles",
                            for tile in vm.tiles.iter() {
                                div { class: "tile", key: "{tile.label}",
                                    strong { "{tile.value}" }
                                    span { "{tile.label}" }
                                }
                            }
                        }

                        section { class: "modules",
                            h2 { "Your modules" }
                            if vm.modules.is_empty() {
                                p { class: "muted", "No modules available yet." }
                            }
                            ul {
                                for card in vm.modules.iter().cloned() {
                                    ModuleCard { key: "{card.id}", card }
                                }
                            }
                        }

                        if vm.can_request_certificate {
                            section { class: "certificate",
                                p { "You finished every module. Claim your certificate!" }
                                button {
                                    class: "btn btn-primary",
                                    disabled: requesting(),
                                    onclick: on_certificate,
                                    "Get my certificate"
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn ModuleCard(card: ModuleCardVm) -> Element {
    rsx! {
        li { class: "module-card",
            div { class: "module-card-head",
                span { class: "module-index", "{card.position}" }
                h3 { "{card.title}" }
                span { class: "chip", "{card.status_label}" }
            }
            p { class: "muted", "{card.description}" }
            p { class: "module-meta",
                "{card.duration} · {card.completed_lessons}/{card.lessons} lessons"
            }
            div { class: "progress",
                div { class: "progress-bar", style: "width: {card.percentage}%" }
            }
            Link { class: "btn", to: Route::Module { id: card.id }, "{card.action_label}" }
        }
    }
}
