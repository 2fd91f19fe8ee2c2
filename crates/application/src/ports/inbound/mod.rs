//! These traits define what the application can do.

pub mod admin;
pub mod auth;
pub mod autologin;
pub mod email;
pub mod password;
pub mod profile;
pub mod register;
pub mod roles;

pub use admin::*;
pub use auth::*;
pub use autologin::*;
pub use email::*;
pub use password::*;
pub use profile::*;
pub use register::*;
pub use roles::*;
