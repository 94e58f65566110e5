//! Value objects representing immutable domain concepts.

pub mod flow_response;
pub mod session_cookie;

// Re-export commonly used types
pub use flow_response::{
    FlowAction, FlowResponse, FormOutcome, GuardOutcome, OutcomeKind, PageLoad,
    VerificationPageState, REDIRECT_STATUS,
};
pub use session_cookie::{CookieAttributes, SessionCookie};
