use std::sync::Arc;

mod desktop;

/// Opens external pages, such as the payment provider's checkout.
pub trait UiLinkOpener: Send + Sync {
    fn open_url(&self, url: &str);
}

pub type LinkOpenerRef = Arc<dyn UiLinkOpener>;

pub use desktop::DesktopLinkOpener;
