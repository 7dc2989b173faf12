use boost_core::model::PaymentStep;

/// Headline and body text for each checkout step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PaymentCopy {
    pub heading: &'static str,
    pub body: &'static str,
    pub show_pay_button: bool,
}

#[must_use]
pub fn payment_copy(step: PaymentStep) -> PaymentCopy {
    match step {
        PaymentStep::Checkout => PaymentCopy {
            heading: "Unlock the full program",
            body: "Lifetime access to every module, exercises and your certificate.",
            show_pay_button: true,
        },
        PaymentStep::Processing => PaymentCopy {
            heading: "Confirming your payment",
            body: "This only takes a moment. Please keep this window open.",
            show_pay_button: false,
        },
        PaymentStep::Success => PaymentCopy {
            heading: "Welcome to Premium!",
            body: "Your access is active. Taking you to your dashboard...",
            show_pay_button: false,
        },
    }
}

/// Display price of the premium program.
pub const PREMIUM_PRICE: &str = "97 €";
