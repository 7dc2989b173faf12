mod auth_vm;
mod dashboard_vm;
mod module_vm;
mod payment_vm;
mod time_fmt;

pub use auth_vm::{AuthFailure, LoginForm, RegisterForm, sign_in, sign_up};
pub use dashboard_vm::{DashboardVm, ModuleCardVm, StatTileVm};
pub use module_vm::{ExerciseVm, LessonVm, ModuleDetailVm};
pub use payment_vm::{PREMIUM_PRICE, PaymentCopy, payment_copy};
pub use time_fmt::{format_date, format_study_time};
