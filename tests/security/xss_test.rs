//! XSS tests for free-text input
//!
//! Angle brackets must never survive sanitizing, whatever the payload.

use safevault::requests::SubmissionRequest;
use safevault::security::Sanitizer;

const PAYLOADS: &[&str] = &[
    "<script>alert('XSS Attack!');</script>",
    "<img src=x onerror=alert(1)>",
    "<svg/onload=alert(1)>",
    "\"><script>alert(document.cookie)</script>",
    "<iframe src=\"javascript:alert(1)\"></iframe>",
    "<<script>script>alert(1)<</script>/script>",
];

#[test]
fn test_script_tag_is_encoded() {
    let clean = Sanitizer::sanitize("<script>alert('XSS Attack!');</script>");

    assert_eq!(clean, "&ltscript&gtalert(XSS Attack!)&lt/script&gt");
    assert!(!clean.contains("<script>"));
}

#[test]
fn test_no_payload_keeps_angle_brackets() {
    for payload in PAYLOADS {
        let clean = Sanitizer::sanitize(payload);

        assert!(!clean.contains('<'), "{:?} -> {:?}", payload, clean);
        assert!(!clean.contains('>'), "{:?} -> {:?}", payload, clean);
        assert!(!clean.contains('\''), "{:?} -> {:?}", payload, clean);
        assert!(!clean.contains('"'), "{:?} -> {:?}", payload, clean);
    }
}

#[test]
fn test_submission_username_is_encoded() {
    let submission = SubmissionRequest::new("<script>alert(1)</script>", "alice@example.com")
        .validate()
        .unwrap();

    assert_eq!(submission.username, "&ltscript&gtalert(1)&lt/script&gt");
}

#[test]
fn test_script_in_email_is_rejected() {
    let errors = SubmissionRequest::new("alice", "<script>alert(1)</script>")
        .validate()
        .unwrap_err();

    assert_eq!(errors.messages("email"), ["Invalid email format."]);
}
