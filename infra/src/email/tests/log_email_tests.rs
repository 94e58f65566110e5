use crate::email::log_email::OUTBOX_CAPACITY;
use crate::email::{EmailMessage, EmailService, LogEmailService};
use crate::InfrastructureError;

fn message(to: &str) -> EmailMessage {
    EmailMessage {
        to: to.to_string(),
        subject: "Verify your email address".to_string(),
        html: "<p>123456</p>".to_string(),
        text: "Your verification code is: 123456".to_string(),
    }
}

#[tokio::test]
async fn test_log_email_send_success() {
    let service = LogEmailService::new();

    let message_id = service.send_email(&message("ada@example.com")).await.unwrap();

    assert!(message_id.starts_with("log_"));
    assert_eq!(service.get_message_count(), 1);
    assert_eq!(service.provider_name(), "log");
}

#[tokio::test]
async fn test_log_email_records_outbox() {
    let service = LogEmailService::new();
    service.send_email(&message("ada@example.com")).await.unwrap();
    service.send_email(&message("bob@example.com")).await.unwrap();

    let last = service.last_message_to("ada@example.com").await.unwrap();
    assert!(last.text.contains("123456"));
    assert!(service.last_message_to("eve@example.com").await.is_none());
    assert_eq!(service.get_message_count(), 2);
}

#[tokio::test]
async fn test_log_email_rejects_invalid_recipient() {
    let service = LogEmailService::new();

    let result = service.send_email(&message("not-an-email")).await;

    assert!(matches!(result, Err(InfrastructureError::Email(_))));
    assert_eq!(service.get_message_count(), 0);
}

#[tokio::test]
async fn test_log_email_simulated_failure() {
    let mut service = LogEmailService::failing();
    assert!(!service.is_available().await);

    let result = service.send_email(&message("ada@example.com")).await;
    assert!(matches!(result, Err(InfrastructureError::Email(_))));

    service.set_simulate_failure(false);
    assert!(service.is_available().await);
    assert!(service.send_email(&message("ada@example.com")).await.is_ok());
}

#[tokio::test]
async fn test_log_email_clones_share_outbox() {
    let service = LogEmailService::new();
    let handle = service.clone();

    service.send_email(&message("ada@example.com")).await.unwrap();

    assert_eq!(handle.get_message_count(), 1);
    assert!(handle.last_message_to("ada@example.com").await.is_some());
}

#[tokio::test]
async fn test_log_email_outbox_is_bounded() {
    let service = LogEmailService::new();

    service.send_email(&message("first@example.com")).await.unwrap();
    for _ in 0..OUTBOX_CAPACITY {
        service.send_email(&message("ada@example.com")).await.unwrap();
    }

    assert_eq!(service.outbox_len().await, OUTBOX_CAPACITY);
    assert_eq!(service.get_message_count(), OUTBOX_CAPACITY as u64 + 1);
    // The oldest message was evicted
    assert!(service.last_message_to("first@example.com").await.is_none());
    assert!(service.last_message_to("ada@example.com").await.is_some());
}
