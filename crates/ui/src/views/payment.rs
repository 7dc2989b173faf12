use boost_core::model::PaymentStep;
use dioxus::prelude::*;

use crate::context::AppContext;
use crate::notifications::use_notifier;
use crate::views::{Gate, Protected};
use crate::vm::{PREMIUM_PRICE, payment_copy};
use services::CheckoutStart;

#[component]
pub fn PaymentView(checkout_id: String) -> Element {
    rsx! {
        Protected { gate: Gate::Checkout,
            PaymentPage { checkout_id }
        }
    }
}

#[component]
fn PaymentPage(checkout_id: String) -> Element {
    let ctx = use_context::<AppContext>();
    let notifier = use_notifier();
    // One flow per visit; dropping it with the page cancels a pending redirect.
    let flow = use_hook(|| ctx.checkout_flow());
    let mut step = use_signal(|| flow.step());
    let mut busy = use_signal(|| false);
    let mut awaiting = use_signal(|| None::<String>);

    {
        let flow = flow.clone();
        use_future(move || {
            let flow = flow.clone();
            async move {
                let mut rx = flow.subscribe();
                loop {
                    let current = *rx.borrow_and_update();
                    step.set(current);
                    if rx.changed().await.is_err() {
                        break;
                    }
                }
            }
        });
    }

    // Coming back from the provider with `?checkout_id=...`.
    {
        let flow = flow.clone();
        use_hook(move || {
            let checkout_id = checkout_id.trim().to_string();
            if checkout_id.is_empty() {
                return;
            }
            spawn(async move {
                match flow.resume(&checkout_id).await {
                    Ok(_) => notifier.success("Payment confirmed. Premium unlocked!"),
                    Err(err) => notifier.error(err.user_message()),
                }
            });
        });
    }

    let on_pay = {
        let flow = flow.clone();
        let opener = ctx.link_opener();
        move |_| {
            if busy() {
                return;
            }
            let flow = flow.clone();
            let opener = opener.clone();
            spawn(async move {
                busy.set(true);
                match flow.start().await {
                    Ok(CheckoutStart::Demo { step, .. }) => {
                        if step == PaymentStep::Success {
                            notifier.success("Demo mode: payment simulated. Premium unlocked!");
                        }
                    }
                    Ok(CheckoutStart::Redirect { checkout_id, url }) => {
                        opener.open_url(&url);
                        awaiting.set(Some(checkout_id));
                        notifier.info("Finish the payment in your browser, then confirm here.");
                    }
                    Err(err) => notifier.error(err.user_message()),
                }
                busy.set(false);
            });
        }
    };

    let on_confirm = {
        let flow = flow.clone();
        move |_| {
            let Some(checkout_id) = awaiting() else {
                return;
            };
            let flow = flow.clone();
            spawn(async move {
                busy.set(true);
                match flow.resume(&checkout_id).await {
                    Ok(_) => {
                        awaiting.set(None);
                        notifier.success("Payment confirmed. Premium unlocked!");
                    }
                    Err(err) => notifier.error(err.user_message()),
                }
                busy.set(false);
            });
        }
    };

    let copy = payment_copy(step());

    rsx! {
        div { class: "page payment",
            div { class: "payment-card",
                h1 { "{copy.heading}" }
                p { class: "muted", "{copy.body}" }

                match step() {
                    PaymentStep::Processing => rsx! {
                        div { class: "spinner" }
                    },
                    PaymentStep::Success => rsx! {
                        div { class: "success-mark", "✓" }
                    },
                    PaymentStep::Checkout => rsx! {
                        p { class: "price", "{PREMIUM_PRICE}" }
                        ul { class: "perks",
                            li { "Every module and exercise" }
                            li { "Progress tracking" }
                            li { "Completion certificate" }
                            li { "Priority support" }
                        }
                    },
                }

                if copy.show_pay_button {
                    button {
                        class: "btn btn-premium",
                        disabled: busy(),
                        onclick: on_pay,
                        if busy() { "Preparing checkout..." } else { "Pay {PREMIUM_PRICE}" }
                    }
                    if awaiting().is_some() {
                        button {
                            class: "btn",
                            disabled: busy(),
                            onclick: on_confirm,
                            "I have completed the payment"
                        }
                    }
                }
            }
        }
    }
}
