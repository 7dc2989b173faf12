use boost_core::model::{Dashboard, Exercise, ExerciseId, LessonId, Module, ModuleId};
use dioxus::prelude::*;
use dioxus_router::Link;

use crate::context::AppContext;
use crate::notifications::use_notifier;
use crate::routes::Route;
use crate::views::{Gate, Protected, ViewError, ViewState, view_state_from_resource};
use crate::vm::ModuleDetailVm;
use services::CatalogClient;

#[component]
pub fn ModuleView(id: u64) -> Element {
    rsx! {
        Protected { gate: Gate::Member,
            ModulePage { id }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum ModuleAction {
    Start,
    CompleteLesson(u64),
    Finish,
    ToggleExercise { id: String, completed: bool },
}

/// Confirmed state that replaces part of the initial load after an action.
enum Applied {
    Progress(Dashboard),
    Exercises(Vec<Exercise>),
}

#[derive(Clone, Debug, PartialEq)]
struct ModuleData {
    module: Module,
    dashboard: Dashboard,
    exercises: Vec<Exercise>,
}

/// Exercise records are optional; the module's static list is the fallback.
async fn load_exercises(catalog: &CatalogClient, module_id: ModuleId) -> Vec<Exercise> {
    match catalog.exercises(module_id).await {
        Ok(exercises) => exercises,
        Err(err) => {
            tracing::warn!(module_id = %module_id, error = %err, "exercise list unavailable");
            Vec::new()
        }
    }
}

#[component]
fn ModulePage(id: u64) -> Element {
    let ctx = use_context::<AppContext>();
    let notifier = use_notifier();
    let module_id = ModuleId::new(id);
    let mut pending = use_signal(|| false);
    let mut fresh_dashboard = use_signal(|| None::<Dashboard>);
    let mut fresh_exercises = use_signal(|| None::<Vec<Exercise>>);

    let resource = {
        let catalog = ctx.catalog();
        let progress = ctx.progress();
        use_resource(move || {
            let catalog = catalog.clone();
            let progress = progress.clone();
            async move {
                let module = catalog
                    .module(module_id)
                    .await
                    .map_err(|err| ViewError::from_api(&err))?;
                let dashboard = progress
                    .get_dashboard()
                    .await
                    .map_err(|err| ViewError::from_api(&err))?;
                let exercises = load_exercises(&catalog, module_id).await;
                Ok::<_, ViewError>(ModuleData {
                    module,
                    dashboard,
                    exercises,
                })
            }
        })
    };
    let state = view_state_from_resource(&resource).map(|data| {
        let dashboard = fresh_dashboard().unwrap_or(data.dashboard);
        let exercises = fresh_exercises().unwrap_or(data.exercises);
        ModuleDetailVm::build(&data.module, dashboard.module(module_id), &exercises)
    });

    // Progress mutations already return the refetched dashboard.
    let run = use_callback(move |action: ModuleAction| {
        if pending() {
            return;
        }
        let progress = ctx.progress();
        let catalog = ctx.catalog();
        spawn(async move {
            pending.set(true);
            let outcome = match action {
                ModuleAction::Start => progress
                    .start_module(module_id)
                    .await
                    .map(|dashboard| (Applied::Progress(dashboard), None)),
                ModuleAction::CompleteLesson(lesson) => progress
                    .complete_lesson(module_id, LessonId::new(lesson))
                    .await
                    .map(|dashboard| (Applied::Progress(dashboard), None)),
                ModuleAction::Finish => progress
                    .update_progress(module_id, 100, true)
                    .await
                    .map(|dashboard| {
                        (
                            Applied::Progress(dashboard),
                            Some("Module completed. Well done!"),
                        )
                    }),
                ModuleAction::ToggleExercise { id, completed } => {
                    match catalog
                        .complete_exercise(&ExerciseId::new(id), completed)
                        .await
                    {
                        Ok(_) => Ok((
                            Applied::Exercises(load_exercises(&catalog, module_id).await),
                            None,
                        )),
                        Err(err) => Err(err),
                    }
                }
            };
            match outcome {
                Ok((applied, message)) => {
                    match applied {
                        Applied::Progress(dashboard) => fresh_dashboard.set(Some(dashboard)),
                        Applied::Exercises(exercises) => fresh_exercises.set(Some(exercises)),
                    }
                    if let Some(message) = message {
                        notifier.success(message);
                    }
                }
                Err(err) => notifier.error(err.user_message()),
            }
            pending.set(false);
        });
    });

    rsx! {
        div { class: "page module",
            Link { class: "back", to: Route::Dashboard {}, "← Back to dashboard" }
            match state {
                ViewState::Idle | ViewState::Loading => rsx! {
                    p { class: "muted", "Loading module..." }
                },
                ViewState::Error(err) => rsx! {
                    div { class: "error-panel",
                        p { "{err.message()}" }
                    }
                },
                ViewState::Ready(vm) => rsx! {
                    section { class: "module-head",
                        h1 { "{vm.title}" }
                        p { class: "muted", "{vm.description}" }
                        p { class: "module-meta", "{vm.duration} · {vm.status_label} · {vm.percentage}%" }
                        div { class: "progress",
                            div { class: "progress-bar", style: "width: {vm.percentage}%" }
                        }
                        if vm.can_start {
                            button {
                                class: "btn btn-primary",
                                disabled: pending(),
                                onclick: move |_| run.call(ModuleAction::Start),
                                "Start this module"
                            }
                        }
                    }

                    section { class: "module-intro",
                        h2 { "Introduction" }
                        p { "{vm.introduction}" }
                        if let Some(url) = vm.video_url.clone() {
                            a { class: "video-link", href: "{url}", "Watch the video" }
                        }
                    }

                    section { class: "lessons",
                        h2 { "Lessons" }
                        ul {
                            for lesson in vm.lessons.iter().cloned() {
                                li {
                                    key: "{lesson.id}",
                                    class: if lesson.completed { "lesson lesson-done" } else { "lesson" },
                                    span { "{lesson.label}" }
                                    if lesson.completed {
                                        span { class: "chip", "Done" }
                                    } else {
                                        button {
                                            class: "btn btn-small",
                                            disabled: pending(),
                                            onclick: move |_| run.call(ModuleAction::CompleteLesson(lesson.id)),
                                            "Mark as done"
                                        }
                                    }
                                }
                            }
                        }
                    }

                    section { class: "exercises",
                        h2 { "Exercises" }
                        ul {
                            for exercise in vm.exercises.iter().cloned() {
                                li { key: "{exercise.id}", class: "exercise",
                                    label {
                                        input {
                                            r#type: "checkbox",
                                            checked: exercise.completed,
                                            disabled: pending(),
                                            onchange: move |_| run.call(ModuleAction::ToggleExercise {
                                                id: exercise.id.clone(),
                                                completed: !exercise.completed,
                                            }),
                                        }
                                        "{exercise.description}"
                                    }
                                }
                            }
                        }
                    }

                    if !vm.is_completed {
                        button {
                            class: "btn btn-primary",
                            disabled: pending(),
                            onclick: move |_| run.call(ModuleAction::Finish),
                            "Complete module"
                        }
                    }
                },
            }
        }
    }
}
