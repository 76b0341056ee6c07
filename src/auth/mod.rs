pub mod backend;
pub mod jwt;

pub use backend::{AuthBackend, AuthHooks};
pub use jwt::{sign_token, verify_token, Claims, TokenError};
