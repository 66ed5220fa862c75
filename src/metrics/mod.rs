use metrics::{counter, describe_counter};
use std::sync::Once;

use crate::services::authentication::FailureReason;
use crate::services::authorization::Decision;

static DESCRIBE: Once = Once::new();

/// Counters for login attempts and access decisions
///
/// Recording goes through the `metrics` facade; without an installed
/// recorder every call is a no-op. Failure reasons are only ever exported
/// here and in logs, never to the caller.
#[derive(Clone, Copy, Debug, Default)]
pub struct AuthMetrics;

impl AuthMetrics {
    pub fn new() -> Self {
        DESCRIBE.call_once(Self::describe_metrics);
        Self
    }

    fn describe_metrics() {
        describe_counter!(
            "auth_login_attempts_total",
            "Total number of login attempts"
        );
        describe_counter!(
            "auth_login_failures_total",
            "Rejected login attempts by internal reason"
        );
        describe_counter!(
            "authz_decisions_total",
            "Authorization decisions by outcome"
        );
    }

    pub fn record_login_attempt(&self, success: bool) {
        let status = if success { "true" } else { "false" };
        counter!("auth_login_attempts_total", "success" => status).increment(1);
    }

    pub fn record_login_failure(&self, reason: FailureReason) {
        counter!("auth_login_failures_total", "reason" => reason.as_str()).increment(1);
    }

    pub fn record_decision(&self, decision: Decision) {
        counter!("authz_decisions_total", "decision" => decision.as_str()).increment(1);
    }
}
