//! Spotify authentication
//!
//! Two pieces:
//! - `TokenStore`: the single session-scoped access-token slot
//! - `AuthFlow`: the authorization-code state machine
//!   (Unauthenticated → AwaitingCallback → Authenticated) plus the
//!   client-credentials grant for app-only access

mod flow;
mod token;

pub use flow::{AuthError, AuthFlow, AuthPhase, CallbackOutcome};
pub use token::{AccessToken, TokenStore};
