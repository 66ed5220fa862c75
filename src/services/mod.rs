pub mod authentication;
pub mod authorization;
pub mod login;
pub mod session;

pub use authentication::{AuthenticationService, FailureReason};
pub use authorization::{AuthorizationModel, AuthorizationRule, Decision, Requirement};
pub use login::{LoginError, login};
pub use session::{MemorySessions, Session, SessionLayer};
