//! Authentication: token issuing/validation, password hashing, and the
//! signup/login/session HTTP surface.

pub mod extract;
pub mod handlers;
pub mod jwt;
pub mod password;
