mod auth;
mod dashboard;
mod guarded;
mod home;
mod module;
mod payment;
mod state;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use auth::AuthView;
pub use dashboard::DashboardView;
pub use guarded::{Gate, Protected, use_session};
pub use home::HomeView;
pub use module::ModuleView;
pub use payment::PaymentView;
pub use state::{ViewError, ViewState, view_state_from_resource};
