use std::sync::Arc;

use storage::Storage;

use crate::api_client::ApiClient;
use crate::auth_gateway::AuthGateway;
use crate::catalog_client::CatalogClient;
use crate::config::ApiConfig;
use crate::error::AppServicesError;
use crate::navigation::NavigationQueue;
use crate::payment_client::{CheckoutFlow, PaymentClient, PaymentTimings};
use crate::progress_client::ProgressClient;
use crate::session_store::SessionStore;
use crate::transport::{ApiTransport, HttpTransport};

/// Assembles app-facing services around one session and one transport.
///
/// Restoration is left to the caller so the UI can show its loading state.
#[derive(Clone)]
pub struct AppServices {
    session: Arc<SessionStore>,
    navigation: NavigationQueue,
    auth: Arc<AuthGateway>,
    progress: Arc<ProgressClient>,
    catalog: Arc<CatalogClient>,
    payments: PaymentClient,
    timings: PaymentTimings,
}

impl AppServices {
    /// Build services backed by `SQLite` storage and the HTTP backend.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage or the HTTP client cannot be
    /// initialised.
    pub async fn new_sqlite(db_url: &str, config: ApiConfig) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        let transport = HttpTransport::new(&config)?;
        tracing::info!(api = %config.api_root(), "services ready");
        Ok(Self::with_parts(
            storage,
            Arc::new(transport),
            PaymentTimings::default(),
        ))
    }

    /// Wire services over arbitrary storage and transport.
    #[must_use]
    pub fn with_parts(
        storage: Storage,
        transport: Arc<dyn ApiTransport>,
        timings: PaymentTimings,
    ) -> Self {
        let session = Arc::new(SessionStore::new(Arc::clone(&storage.local)));
        let navigation = NavigationQueue::new();
        let api = ApiClient::new(
            transport,
            Arc::clone(&session),
            Arc::new(navigation.clone()),
        );

        Self {
            session,
            navigation,
            auth: Arc::new(AuthGateway::new(api.clone())),
            progress: Arc::new(ProgressClient::new(api.clone())),
            catalog: Arc::new(CatalogClient::new(api.clone())),
            payments: PaymentClient::new(api),
            timings,
        }
    }

    #[must_use]
    pub fn session(&self) -> Arc<SessionStore> {
        Arc::clone(&self.session)
    }

    #[must_use]
    pub fn navigation(&self) -> NavigationQueue {
        self.navigation.clone()
    }

    #[must_use]
    pub fn auth(&self) -> Arc<AuthGateway> {
        Arc::clone(&self.auth)
    }

    #[must_use]
    pub fn progress(&self) -> Arc<ProgressClient> {
        Arc::clone(&self.progress)
    }

    #[must_use]
    pub fn catalog(&self) -> Arc<CatalogClient> {
        Arc::clone(&self.catalog)
    }

    /// A fresh checkout flow for one visit of the payment page.
    #[must_use]
    pub fn checkout_flow(&self) -> Arc<CheckoutFlow> {
        Arc::new(CheckoutFlow::new(
            self.payments.clone(),
            Arc::clone(&self.session),
            Arc::new(self.navigation.clone()),
            self.timings,
        ))
    }
}
