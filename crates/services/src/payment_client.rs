use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use boost_core::NavTarget;
use boost_core::model::{
    ActivationReceipt, CheckoutRequest, CheckoutSession, PaymentStep, PaymentStepError,
    PaymentVerification, PremiumActivation, UserRecord,
};
use serde::Serialize;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::api_client::ApiClient;
use crate::error::ApiError;
use crate::navigation::Navigator;
use crate::session_store::SessionStore;

#[derive(Serialize)]
struct VerifyRequest<'a> {
    checkout_id: &'a str,
}

/// Thin wrapper over the `/payment/*` endpoints.
#[derive(Clone)]
pub struct PaymentClient {
    api: ApiClient,
}

impl PaymentClient {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// # Errors
    ///
    /// Returns the backend failure.
    pub async fn create_checkout(
        &self,
        request: &CheckoutRequest,
    ) -> Result<CheckoutSession, ApiError> {
        self.api.post("/payment/create-checkout", request).await
    }

    /// # Errors
    ///
    /// Returns the backend failure.
    pub async fn verify(&self, checkout_id: &str) -> Result<PaymentVerification, ApiError> {
        self.api
            .post("/payment/verify", &VerifyRequest { checkout_id })
            .await
    }

    /// # Errors
    ///
    /// Returns the backend failure.
    pub async fn activate_premium(
        &self,
        activation: &PremiumActivation,
    ) -> Result<ActivationReceipt, ApiError> {
        self.api.post("/payment/activate-premium", activation).await
    }
}

/// Delays of the checkout page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaymentTimings {
    /// Wait before a demo checkout is verified automatically.
    pub demo_verify_delay: Duration,
    /// Wait between success and the dashboard redirect.
    pub success_redirect_delay: Duration,
}

impl Default for PaymentTimings {
    fn default() -> Self {
        Self {
            demo_verify_delay: Duration::from_secs(2),
            success_redirect_delay: Duration::from_secs(3),
        }
    }
}

impl PaymentTimings {
    /// No waiting at all. Handy for tests.
    #[must_use]
    pub fn immediate() -> Self {
        Self {
            demo_verify_delay: Duration::ZERO,
            success_redirect_delay: Duration::ZERO,
        }
    }
}

/// Outcome of [`CheckoutFlow::start`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutStart {
    /// Demo checkout, already verified.
    Demo { checkout_id: String, step: PaymentStep },
    /// Real checkout; the caller opens `url` and later calls `resume`.
    Redirect { checkout_id: String, url: String },
}

/// Drives `checkout → processing → success` for one payment page.
///
/// Success is terminal: the user is marked premium, exactly one dashboard
/// redirect is scheduled and later `resume` calls return immediately. The
/// pending redirect is aborted when the flow is dropped.
pub struct CheckoutFlow {
    payments: PaymentClient,
    session: Arc<SessionStore>,
    navigator: Arc<dyn Navigator>,
    timings: PaymentTimings,
    step: watch::Sender<PaymentStep>,
    redirect: Mutex<Option<JoinHandle<()>>>,
}

impl CheckoutFlow {
    #[must_use]
    pub fn new(
        payments: PaymentClient,
        session: Arc<SessionStore>,
        navigator: Arc<dyn Navigator>,
        timings: PaymentTimings,
    ) -> Self {
        let (step, _rx) = watch::channel(PaymentStep::Checkout);
        Self {
            payments,
            session,
            navigator,
            timings,
            step,
            redirect: Mutex::new(None),
        }
    }

    #[must_use]
    pub fn step(&self) -> PaymentStep {
        *self.step.borrow()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<PaymentStep> {
        self.step.subscribe()
    }

    /// Open a checkout for the signed-in user.
    ///
    /// # Errors
    ///
    /// - `ApiError::NotAuthenticated` without a session
    /// - `ApiError::PaymentStep` when a verification is running or done
    /// - `ApiError::InvalidResponse` when a real checkout has no URL
    /// - any failure of the demo verification, see [`CheckoutFlow::resume`]
    pub async fn start(&self) -> Result<CheckoutStart, ApiError> {
        let user = self.session.user().ok_or(ApiError::NotAuthenticated)?;
        self.step().begin_verification()?;

        let checkout = self
            .payments
            .create_checkout(&CheckoutRequest::for_user(&user))
            .await?;
        tracing::info!(
            checkout_id = %checkout.checkout_id,
            demo = checkout.is_demo,
            "checkout created"
        );

        if checkout.is_demo {
            tokio::time::sleep(self.timings.demo_verify_delay).await;
            let step = self.resume(&checkout.checkout_id).await?;
            return Ok(CheckoutStart::Demo {
                checkout_id: checkout.checkout_id,
                step,
            });
        }

        let url = checkout
            .checkout_url
            .filter(|url| !url.trim().is_empty())
            .ok_or(ApiError::InvalidResponse("checkout_url"))?;
        Ok(CheckoutStart::Redirect {
            checkout_id: checkout.checkout_id,
            url,
        })
    }

    /// Verify `checkout_id` and activate premium when it is paid.
    ///
    /// After success this is a no-op returning `PaymentStep::Success`.
    ///
    /// # Errors
    ///
    /// - `ApiError::PaymentStep` when another verification is in flight
    /// - `ApiError::PaymentNotConfirmed` when the provider reports unpaid
    /// - `ApiError::ActivationRejected` when the backend refuses activation
    /// - any transport or backend failure
    ///
    /// Every error puts the flow back to `PaymentStep::Checkout`.
    pub async fn resume(&self, checkout_id: &str) -> Result<PaymentStep, ApiError> {
        match self.enter_processing() {
            Ok(()) => {}
            Err(PaymentStepError::AlreadyCompleted) => {
                tracing::debug!(checkout_id, "payment already completed");
                return Ok(PaymentStep::Success);
            }
            Err(err) => return Err(err.into()),
        }

        match self.verify_and_activate(checkout_id).await {
            Ok(user) => {
                self.session.update_user(user).await;
                self.step
                    .send_modify(|step| *step = step.resolve(true).unwrap_or(PaymentStep::Success));
                tracing::info!(checkout_id, "premium activated");
                self.schedule_redirect();
                Ok(PaymentStep::Success)
            }
            Err(err) => {
                tracing::warn!(checkout_id, error = %err, "payment verification failed");
                self.step.send_replace(PaymentStep::Checkout);
                Err(err)
            }
        }
    }

    /// Wait for the scheduled dashboard redirect, if any.
    pub async fn wait_for_redirect(&self) {
        let handle = self
            .redirect
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(handle) = handle {
            if let Err(err) = handle.await {
                tracing::debug!(error = %err, "redirect task did not finish");
            }
        }
    }

    fn enter_processing(&self) -> Result<(), PaymentStepError> {
        let mut outcome = Ok(());
        self.step.send_if_modified(|step| match step.begin_verification() {
            Ok(next) => {
                *step = next;
                true
            }
            Err(err) => {
                outcome = Err(err);
                false
            }
        });
        outcome
    }

    async fn verify_and_activate(&self, checkout_id: &str) -> Result<UserRecord, ApiError> {
        let user = self.session.user().ok_or(ApiError::NotAuthenticated)?;

        let verification = self.payments.verify(checkout_id).await?;
        if !verification.is_paid {
            return Err(ApiError::PaymentNotConfirmed);
        }

        let activation = PremiumActivation {
            user_id: user.id.clone(),
            order_id: verification.order_reference(checkout_id),
            checkout_id: checkout_id.to_string(),
        };
        let receipt = self.payments.activate_premium(&activation).await?;
        if !receipt.success {
            return Err(ApiError::ActivationRejected {
                message: receipt.message,
            });
        }
        Ok(receipt.user.unwrap_or(user).with_premium())
    }

    fn schedule_redirect(&self) {
        let mut slot = self.redirect.lock().unwrap_or_else(PoisonError::into_inner);
        if slot.is_some() {
            return;
        }
        let navigator = Arc::clone(&self.navigator);
        let delay = self.timings.success_redirect_delay;
        *slot = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            navigator.navigate(NavTarget::Dashboard);
        }));
    }
}

impl Drop for CheckoutFlow {
    fn drop(&mut self) {
        let slot = self.redirect.get_mut().unwrap_or_else(PoisonError::into_inner);
        if let Some(handle) = slot.take() {
            handle.abort();
        }
    }
}
