#![forbid(unsafe_code)]

pub mod guard;
pub mod model;

pub use guard::{AuthTab, GuardDecision, NavTarget};
