//! Contact form route
//!
//! Validates the payload, composes a plain-text message, and forwards it to
//! the SMTP transport. Validation always runs before any send is attempted.

use hyper::{Request, StatusCode};
use serde::Deserialize;
use std::sync::Arc;

use crate::error::ApiError;
use crate::mail::{compose_contact_body, ContactTransport};
use crate::routes::{error_response, json_response, parse_json_body, BoxBody, MessageResponse};
use crate::server::AppState;

/// Contact form payload. `phone` and `subject` are optional.
#[derive(Debug, Deserialize)]
pub struct ContactInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Validated contact fields
#[derive(Debug)]
pub struct ContactFields {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: Option<String>,
    pub message: String,
}

/// Basic email shape check: `local@domain.tld`, no whitespace anywhere.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .rsplit_once('.')
        .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
}

/// Validate a contact submission
pub fn validate_contact(input: ContactInput) -> Result<ContactFields, ApiError> {
    let name = input.name.unwrap_or_default();
    let email = input.email.unwrap_or_default();
    let message = input.message.unwrap_or_default();

    if name.is_empty() || email.is_empty() || message.is_empty() {
        return Err(ApiError::Validation(
            "Name, email, and message are required".into(),
        ));
    }

    if !is_valid_email(&email) {
        return Err(ApiError::Validation("Invalid email format".into()));
    }

    Ok(ContactFields {
        name,
        email,
        phone: input.phone,
        subject: input.subject,
        message,
    })
}

/// Validate a submission and forward it through the mail transport.
/// Validation failures never reach the transport.
pub async fn submit_contact(
    transport: Option<&dyn ContactTransport>,
    input: ContactInput,
) -> Result<(), ApiError> {
    let fields = validate_contact(input)?;

    let transport = transport
        .ok_or_else(|| ApiError::Mail("Mail transport is not configured".into()))?;

    let body = compose_contact_body(
        &fields.name,
        &fields.email,
        fields.phone.as_deref(),
        fields.subject.as_deref(),
        &fields.message,
    );
    let subject = fields
        .subject
        .as_deref()
        .filter(|s| !s.is_empty())
        .unwrap_or("Portfolio Contact");

    transport.send_contact(subject, body).await
}

/// POST /api/contact - forward a contact form submission by mail
pub async fn handle_contact(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
) -> hyper::Response<BoxBody> {
    let result = async {
        let input: ContactInput = parse_json_body(req).await?;
        submit_contact(state.mailer.as_deref(), input).await
    }
    .await;

    match result {
        Ok(()) => json_response(
            StatusCode::OK,
            &MessageResponse::new("Message sent successfully"),
        ),
        Err(err) => error_response(err, "Internal server error while sending message"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Records sends instead of talking to SMTP
    #[derive(Default)]
    struct RecordingTransport {
        sent: Mutex<Vec<(String, String)>>,
    }

    #[async_trait]
    impl ContactTransport for RecordingTransport {
        async fn send_contact(&self, subject: &str, body: String) -> Result<(), ApiError> {
            self.sent.lock().unwrap().push((subject.to_string(), body));
            Ok(())
        }
    }

    fn input(
        name: Option<&str>,
        email: Option<&str>,
        message: Option<&str>,
    ) -> ContactInput {
        ContactInput {
            name: name.map(String::from),
            email: email.map(String::from),
            phone: None,
            subject: None,
            message: message.map(String::from),
        }
    }

    #[test]
    fn accepts_plain_addresses() {
        assert!(is_valid_email("jane@example.com"));
        assert!(is_valid_email("a.b+c@sub.example.co"));
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(!is_valid_email("janeexample.com")); // no @
        assert!(!is_valid_email("jane@example")); // no dot in domain
        assert!(!is_valid_email("jane doe@example.com")); // whitespace
        assert!(!is_valid_email("@example.com")); // empty local part
        assert!(!is_valid_email("jane@")); // empty domain
        assert!(!is_valid_email("jane@@example.com")); // second @
        assert!(!is_valid_email("jane@.com")); // empty host
    }

    #[test]
    fn valid_submission_passes() {
        let fields = validate_contact(input(
            Some("Jane"),
            Some("jane@example.com"),
            Some("Hello"),
        ))
        .unwrap();
        assert_eq!(fields.name, "Jane");
        assert_eq!(fields.email, "jane@example.com");
    }

    #[test]
    fn missing_required_fields_rejected() {
        for bad in [
            input(None, Some("jane@example.com"), Some("Hello")),
            input(Some("Jane"), None, Some("Hello")),
            input(Some("Jane"), Some("jane@example.com"), None),
            input(Some(""), Some("jane@example.com"), Some("Hello")),
        ] {
            let err = validate_contact(bad).unwrap_err();
            assert_eq!(err.to_string(), "Name, email, and message are required");
        }
    }

    #[test]
    fn bad_email_rejected_with_format_message() {
        let err =
            validate_contact(input(Some("Jane"), Some("not-an-email"), Some("Hello")))
                .unwrap_err();
        assert_eq!(err.to_string(), "Invalid email format");
    }

    #[test]
    fn valid_submission_sends_exactly_once() {
        let transport = RecordingTransport::default();
        let submission = ContactInput {
            name: Some("Jane".into()),
            email: Some("jane@example.com".into()),
            phone: Some("+212600000000".into()),
            subject: Some("Collaboration".into()),
            message: Some("I would like to discuss a project.".into()),
        };

        tokio_test::block_on(submit_contact(Some(&transport), submission)).unwrap();

        let sent = transport.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        let (subject, body) = &sent[0];
        assert_eq!(subject, "Collaboration");
        assert!(body.contains("Jane"));
        assert!(body.contains("jane@example.com"));
        assert!(body.contains("+212600000000"));
        assert!(body.contains("I would like to discuss a project."));
    }

    #[test]
    fn invalid_submission_sends_nothing() {
        let transport = RecordingTransport::default();
        let submission = input(Some("Jane"), Some("not-an-email"), Some("Hello"));

        let err =
            tokio_test::block_on(submit_contact(Some(&transport), submission)).unwrap_err();
        assert_eq!(err.to_string(), "Invalid email format");
        assert!(transport.sent.lock().unwrap().is_empty());
    }

    #[test]
    fn missing_transport_is_a_mail_error() {
        let submission = input(Some("Jane"), Some("jane@example.com"), Some("Hello"));
        let err = tokio_test::block_on(submit_contact(None, submission)).unwrap_err();
        assert!(matches!(err, ApiError::Mail(_)));
    }
}
