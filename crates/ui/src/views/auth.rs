use boost_core::AuthTab;
use dioxus::prelude::*;
use dioxus_router::use_navigator;

use crate::context::AppContext;
use crate::notifications::use_notifier;
use crate::routes::Route;
use crate::views::use_session;
use crate::vm::{AuthFailure, LoginForm, RegisterForm, sign_in, sign_up};

#[component]
pub fn AuthView(tab: String) -> Element {
    let ctx = use_context::<AppContext>();
    let snapshot = use_session();
    let navigator = use_navigator();
    let notifier = use_notifier();

    let initial_tab = AuthTab::from_query(&tab);
    let mut active = use_signal(|| initial_tab);
    let mut login = use_signal(LoginForm::default);
    let mut register = use_signal(RegisterForm::default);
    let mut inline_error = use_signal(|| None::<String>);
    let mut busy = use_signal(|| false);

    // Already signed in: the form has nothing to offer.
    use_effect(move || {
        let snapshot = snapshot.read();
        if !snapshot.restoring && snapshot.is_authenticated() {
            navigator.replace(Route::Dashboard {});
        }
    });

    let on_login = {
        let ctx = ctx.clone();
        move |evt: FormEvent| {
            evt.prevent_default();
            if busy() {
                return;
            }
            let auth = ctx.auth();
            let session = ctx.session();
            let form = login();
            spawn(async move {
                busy.set(true);
                inline_error.set(None);
                match sign_in(&auth, &session, form).await {
                    Ok(user) => {
                        notifier.success(format!("Welcome back, {}!", user.first_name));
                        navigator.push(Route::Dashboard {});
                    }
                    Err(AuthFailure::Invalid(text)) => inline_error.set(Some(text)),
                    Err(AuthFailure::Rejected(text)) => notifier.error(text),
                }
                busy.set(false);
            });
        }
    };

    let on_register = move |evt: FormEvent| {
        evt.prevent_default();
        if busy() {
            return;
        }
        let auth = ctx.auth();
        let session = ctx.session();
        let form = register();
        spawn(async move {
            busy.set(true);
            inline_error.set(None);
            match sign_up(&auth, &session, form).await {
                Ok(_) => {
                    notifier.success("Account created. Welcome to ConfianceBoost!");
                    navigator.push(Route::Dashboard {});
                }
                Err(AuthFailure::Invalid(text)) => inline_error.set(Some(text)),
                Err(AuthFailure::Rejected(text)) => notifier.error(text),
            }
            busy.set(false);
        });
    };

    let tab_class = |tab: AuthTab| {
        if active() == tab { "tab tab-active" } else { "tab" }
    };

    rsx! {
        div { class: "page auth",
            div { class: "auth-card",
                div { class: "tabs",
                    button {
                        class: tab_class(AuthTab::Login),
                        onclick: move |_| {
                            active.set(AuthTab::Login);
                            inline_error.set(None);
                        },
                        "Sign in"
                    }
                    button {
                        class: tab_class(AuthTab::Register),
                        onclick: move |_| {
                            active.set(AuthTab::Register);
                            inline_error.set(None);
                        },
                        "Create account"
                    }
                }

                if let Some(text) = inline_error() {
                    p { class: "form-error", role: "alert", "{text}" }
                }

                match active() {
                    AuthTab::Login => rsx! {
                        form { class: "auth-form", onsubmit: on_login,
                            label { "Email"
                                input {
                                    r#type: "email",
                                    value: "{login.read().email}",
                                    oninput: move |evt| login.write().email = evt.value(),
                                }
                            }
                            label { "Password"
                                input {
                                    r#type: "password",
                                    value: "{login.read().password}",
                                    oninput: move |evt| login.write().password = evt.value(),
                                }
                            }
                            button { class: "btn btn-primary", r#type: "submit", disabled: busy(),
                                if busy() { "Signing in..." } else { "Sign in" }
                            }
                        }
                    },
                    AuthTab::Register => rsx! {
                        form { class: "auth-form", onsubmit: on_register,
                            div { class: "row",
                                label { "First name"
                                    input {
                                        value: "{register.read().first_name}",
                                        oninput: move |evt| register.write().first_name = evt.value(),
                                    }
                                }
                                label { "Last name"
                                    input {
                                        value: "{register.read().last_name}",
                                        oninput: move |evt| register.write().last_name = evt.value(),
                                    }
                                }
                            }
                            label { "Email"
                                input {
                                    r#type: "email",
                                    value: "{register.read().email}",
                                    oninput: move |evt| register.write().email = evt.value(),
                                }
                            }
                            label { "Password"
                                input {
                                    r#type: "password",
                                    value: "{register.read().password}",
                                    oninput: move |evt| register.write().password = evt.value(),
                                }
                            }
                            label { "Confirm password"
                                input {
                                    r#type: "password",
                                    value: "{register.read().confirm_password}",
                                    oninput: move |evt| register.write().confirm_password = evt.value(),
                                }
                            }
                            button { class: "btn btn-primary", r#type: "submit", disabled: busy(),
                                if busy() { "Creating account..." } else { "Create account" }
                            }
                        }
                    },
                }
            }
        }
    }
}
