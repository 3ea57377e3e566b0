//! JWT token encoding, decoding, and the credential lifecycle built on them.

pub mod claims;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod issuer;

pub use claims::{Claims, TokenType};
pub use decoder::JwtDecoder;
pub use encoder::JwtEncoder;
pub use error::CredentialError;
pub use issuer::{CredentialIssuer, TokenPair};
