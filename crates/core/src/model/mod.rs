mod course;
mod credentials;
mod ids;
mod payment;
mod progress;
mod session;
mod timestamp;
mod user;

pub use ids::{ExerciseId, LessonId, ModuleId, ParseIdError, UserId};

pub use course::{Certificate, Exercise, Module, ModuleContent, PlatformStats};
pub use credentials::{
    LoginDraft, LoginRequest, MIN_PASSWORD_LEN, ProfileUpdate, RegistrationDraft,
    RegistrationRequest, ValidationError,
};
pub use payment::{
    ActivationReceipt, CheckoutRequest, CheckoutSession, PaymentStep, PaymentStepError,
    PaymentVerification, PremiumActivation,
};
pub use progress::{
    Dashboard, DashboardStats, MAX_PERCENTAGE, ModuleProgress, ProgressError, ProgressStatus,
    ProgressUpdate,
};
pub use session::{AuthToken, Session, SessionSnapshot};
pub use timestamp::parse_backend_time;
pub use user::UserRecord;
