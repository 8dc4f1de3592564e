//! Identity gate.
//!
//! Every protected route resolves the caller's identity from the identity
//! provider on every request; a missing or unresolvable identity is a
//! redirect to the sign-in entry point, not an error response.

pub mod middleware;
pub mod models;

pub use middleware::identity_gate;
pub use models::Identity;
