//! Results returned by the verification flow and the layout guard.
//!
//! Redirects are plain return values; the transport layer decides how to
//! signal them.

use std::collections::HashMap;

use ev_shared::error_codes;
use ev_shared::validation::ValidationErrors;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::session_cookie::SessionCookie;

/// Status used for every redirect the flow produces
pub const REDIRECT_STATUS: u16 = 302;

/// Which user-facing outcome a form submission produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeKind {
    /// Nothing was submitted; re-prompt without touching any state
    EmptyInput,
    /// The submitted code did not validate
    InvalidCode,
    /// A new code was issued and delivered
    CodeSent,
}

/// Structured outcome re-rendered into the submitting form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormOutcome {
    pub kind: OutcomeKind,
    pub message: String,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub field_errors: HashMap<String, Vec<String>>,
    pub status: u16,
}

impl FormOutcome {
    pub fn empty_input() -> Self {
        let mut errors = ValidationErrors::new();
        errors.add_error("code", "Please enter a code", error_codes::VALIDATION_ERROR);
        Self::from_validation("No code provided", &errors)
    }

    /// Re-prompt with per-field messages from a failed validation
    pub fn from_validation(message: impl Into<String>, errors: &ValidationErrors) -> Self {
        Self {
            kind: OutcomeKind::EmptyInput,
            message: message.into(),
            field_errors: errors.to_field_errors(),
            status: 400,
        }
    }

    pub fn invalid_code() -> Self {
        Self {
            kind: OutcomeKind::InvalidCode,
            message: "Invalid code".to_string(),
            field_errors: HashMap::new(),
            status: 400,
        }
    }

    pub fn code_sent() -> Self {
        Self {
            kind: OutcomeKind::CodeSent,
            message: "Code successfully sent, please check your email".to_string(),
            field_errors: HashMap::new(),
            status: 200,
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// What the transport layer should do with the request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FlowAction {
    Redirect { target: String, status: u16 },
    Outcome(FormOutcome),
}

/// Action plus an optional cookie-set instruction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowResponse {
    pub action: FlowAction,
    pub set_cookie: Option<SessionCookie>,
}

impl FlowResponse {
    pub fn redirect(target: impl Into<String>) -> Self {
        Self {
            action: FlowAction::Redirect {
                target: target.into(),
                status: REDIRECT_STATUS,
            },
            set_cookie: None,
        }
    }

    pub fn outcome(outcome: FormOutcome) -> Self {
        Self {
            action: FlowAction::Outcome(outcome),
            set_cookie: None,
        }
    }

    pub fn with_cookie(mut self, cookie: SessionCookie) -> Self {
        self.set_cookie = Some(cookie);
        self
    }

    /// Redirect target, if this response is a redirect
    pub fn redirect_target(&self) -> Option<&str> {
        match &self.action {
            FlowAction::Redirect { target, .. } => Some(target),
            FlowAction::Outcome(_) => None,
        }
    }

    /// Form outcome, if this response re-renders the form
    pub fn form_outcome(&self) -> Option<&FormOutcome> {
        match &self.action {
            FlowAction::Outcome(outcome) => Some(outcome),
            FlowAction::Redirect { .. } => None,
        }
    }
}

/// Decision of the authenticated-layout guard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GuardOutcome {
    Allowed {
        user_id: Uuid,
        display_name: String,
        /// Present when the session was refreshed during validation
        set_cookie: Option<SessionCookie>,
    },
    Redirect { target: String, status: u16 },
}

impl GuardOutcome {
    pub fn is_allowed(&self) -> bool {
        matches!(self, GuardOutcome::Allowed { .. })
    }
}

/// Data the verification page renders with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationPageState {
    pub email: String,
    pub email_verified: bool,
}

/// Result of loading the verification page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PageLoad {
    Redirect { target: String, status: u16 },
    Render {
        state: VerificationPageState,
        set_cookie: Option<SessionCookie>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_outcome() {
        let outcome = FormOutcome::empty_input();
        assert_eq!(outcome.kind, OutcomeKind::EmptyInput);
        assert_eq!(outcome.message, "No code provided");
        assert_eq!(
            outcome.field_errors["code"],
            vec!["Please enter a code".to_string()]
        );
        assert!(!outcome.is_success());
    }

    #[test]
    fn test_invalid_and_sent_outcomes() {
        let invalid = FormOutcome::invalid_code();
        assert_eq!(invalid.message, "Invalid code");
        assert_eq!(invalid.status, 400);

        let sent = FormOutcome::code_sent();
        assert_eq!(sent.kind, OutcomeKind::CodeSent);
        assert!(sent.is_success());
    }

    #[test]
    fn test_flow_response_accessors() {
        let redirect = FlowResponse::redirect("/user");
        assert_eq!(redirect.redirect_target(), Some("/user"));
        assert!(redirect.form_outcome().is_none());
        assert!(redirect.set_cookie.is_none());

        let outcome = FlowResponse::outcome(FormOutcome::invalid_code());
        assert!(outcome.redirect_target().is_none());
        assert_eq!(outcome.form_outcome().map(|o| o.kind), Some(OutcomeKind::InvalidCode));
    }

    #[test]
    fn test_outcome_serialization_skips_empty_field_errors() {
        let json = serde_json::to_value(FormOutcome::invalid_code()).unwrap();
        assert!(json.get("field_errors").is_none());
        assert_eq!(json["kind"], "invalid_code");

        let json = serde_json::to_value(FormOutcome::empty_input()).unwrap();
        assert_eq!(json["field_errors"]["code"][0], "Please enter a code");
    }

    #[test]
    fn test_outcome_from_validation_groups_by_field() {
        let mut errors = ValidationErrors::new();
        errors.add_error("code", "Please enter a code", error_codes::VALIDATION_ERROR);
        errors.add_error("code", "Code must be 6 digits", error_codes::VALIDATION_ERROR);

        let outcome = FormOutcome::from_validation("Check the form", &errors);
        assert_eq!(outcome.kind, OutcomeKind::EmptyInput);
        assert_eq!(outcome.message, "Check the form");
        assert_eq!(outcome.status, 400);
        assert_eq!(outcome.field_errors.len(), 1);
        assert_eq!(outcome.field_errors["code"].len(), 2);
    }
}
