//! Identity provider client
//!
//! Pacta never stores credentials: every protected operation forwards the
//! caller's opaque bearer token to the identity provider and acts on the
//! answer. "No user" is a normal outcome (`Ok(None)`), distinct from a
//! provider failure (`Err`); the API layer turns both into a redirect to
//! the sign-in entry point, never into a storage side effect.

mod error;
mod http;
mod provider;

pub use error::IdentityError;
pub use http::HttpIdentityProvider;
pub use provider::{IdentityProvider, User};
