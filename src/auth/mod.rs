//! Authentication domain module
//!
//! Email/password authentication with bcrypt hashing and JWT access tokens.

mod jwt;
mod service;

pub use jwt::{generate_access_token, get_user_id_from_claims, verify_token, Claims, JwtError};
pub use service::{AuthError, AuthService, AuthTokensResponse};
