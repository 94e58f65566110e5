//! Verification email template

use super::email_service::EmailMessage;

/// Subject line of the verification email
pub const VERIFICATION_SUBJECT: &str = "Verify your email address";

/// Render the verification email carrying `code`
pub fn verification_email(to: &str, code: &str, lifetime_minutes: i64) -> EmailMessage {
    let text = format!(
        "Your verification code is: {code}\n\n\
         Enter it on the verification page to confirm your email address. \
         The code expires in {lifetime_minutes} minutes.\n\n\
         If you did not request this, you can ignore this email."
    );

    let html = format!(
        "<!DOCTYPE html>\
         <html><body style=\"font-family: sans-serif;\">\
         <h2>{VERIFICATION_SUBJECT}</h2>\
         <p>Your verification code is:</p>\
         <p style=\"font-size: 28px; font-weight: bold; letter-spacing: 4px;\">{code}</p>\
         <p>The code expires in {lifetime_minutes} minutes.</p>\
         <p>If you did not request this, you can ignore this email.</p>\
         </body></html>"
    );

    EmailMessage {
        to: to.to_string(),
        subject: VERIFICATION_SUBJECT.to_string(),
        html,
        text,
    }
}
