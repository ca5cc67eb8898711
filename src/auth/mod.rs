pub mod admin_jwt;
pub mod config;
pub mod extractors;
pub mod firebase;
pub mod jwks;
pub mod middleware;
pub mod password;
pub mod principal;

pub use config::{AdminJwtConfig, FirebaseAuthConfig};
pub use extractors::{AdminPrincipal, PrincipalExtractor, UserPrincipal};
pub use jwks::JwksCache;
pub use middleware::AuthLayer;
pub use principal::Principal;
