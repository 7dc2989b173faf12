use std::sync::Arc;

use services::{
    AuthGateway, CatalogClient, CheckoutFlow, NavigationQueue, ProgressClient, SessionStore,
};

use crate::platform::{DesktopLinkOpener, LinkOpenerRef};

pub trait UiApp: Send + Sync {
    fn session(&self) -> Arc<SessionStore>;
    fn navigation(&self) -> NavigationQueue;

    fn auth(&self) -> Arc<AuthGateway>;
    fn progress(&self) -> Arc<ProgressClient>;
    fn catalog(&self) -> Arc<CatalogClient>;

    /// A new checkout flow per payment page visit.
    fn checkout_flow(&self) -> Arc<CheckoutFlow>;
}

#[derive(Clone)]
pub struct AppContext {
    app: Arc<dyn UiApp>,
    session: Arc<SessionStore>,
    navigation: NavigationQueue,
    auth: Arc<AuthGateway>,
    progress: Arc<ProgressClient>,
    catalog: Arc<CatalogClient>,
    link_opener: LinkOpenerRef,
}

impl AppContext {
    #[must_use]
    pub fn new(app: Arc<dyn UiApp>) -> Self {
        Self::with_link_opener(app, Arc::new(DesktopLinkOpener))
    }

    #[must_use]
    pub fn with_link_opener(app: Arc<dyn UiApp>, link_opener: LinkOpenerRef) -> Self {
        Self {
            session: app.session(),
            navigation: app.navigation(),
            auth: app.auth(),
            progress: app.progress(),
            catalog: app.catalog(),
            link_opener,
            app,
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

    #[must_use]
    pub fn checkout_flow(&self) -> Arc<CheckoutFlow> {
        self.app.checkout_flow()
    }

    #[must_use]
    pub fn link_opener(&self) -> LinkOpenerRef {
        Arc::clone(&self.link_opener)
    }
}

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
