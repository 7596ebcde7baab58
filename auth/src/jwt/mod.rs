pub mod claims;
pub mod errors;
pub mod handler;
pub mod validator;

pub use claims::AccessTokenClaims;
pub use claims::RefreshTokenClaims;
pub use claims::Role;
pub use errors::ClaimsError;
pub use errors::JwtError;
pub use handler::JwtHandler;
pub use validator::ClaimValidator;
