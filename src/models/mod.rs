pub mod principal;
pub mod role;
pub mod user;

pub use principal::Principal;
pub use role::Role;
pub use user::User;
