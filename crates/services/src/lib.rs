#![forbid(unsafe_code)]

pub mod api_client;
pub mod app_services;
pub mod auth_gateway;
pub mod catalog_client;
pub mod config;
pub mod error;
pub mod navigation;
pub mod payment_client;
pub mod progress_client;
pub mod session_store;
pub mod transport;

pub use api_client::ApiClient;
pub use app_services::AppServices;
pub use auth_gateway::{AuthGateway, AuthSuccess};
pub use catalog_client::{CatalogClient, ExerciseAck};
pub use config::{ApiConfig, DEFAULT_BASE_URL};
pub use error::{ApiError, AppServicesError, ConfigError, TransportError};
pub use navigation::{NavigationQueue, Navigator};
pub use payment_client::{CheckoutFlow, CheckoutStart, PaymentClient, PaymentTimings};
pub use progress_client::ProgressClient;
pub use session_store::{SessionStore, TOKEN_KEY, USER_KEY};
pub use transport::{ApiRequest, ApiResponse, ApiTransport, HttpMethod, HttpTransport};
