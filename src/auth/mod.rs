//! Authentication module

pub mod gate;
pub mod jwt;
pub mod middleware;
pub mod password;

pub use gate::{extract_bearer, AuthError, AuthGate};
pub use jwt::{Claims, TokenError, TokenService};
pub use middleware::{require_auth, CurrentUser};
pub use password::PasswordHasher;
