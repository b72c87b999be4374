//! Audit trail for user-visible actions.
//!
//! Events flow through the `log` facade under the `audit` target so
//! deployments can route them to a dedicated sink.

use log::info;

/// Records one audit event: who did what, with optional detail.
pub fn log_event(actor: &str, action: &str, detail: &str) {
    if detail.is_empty() {
        info!(target: "audit", "{actor} - {action}");
    } else {
        info!(target: "audit", "{actor} - {action} - {detail}");
    }
}

/// Identity used as the audit actor. There is no login in a CLI; the
/// operating-system user stands in.
pub fn current_actor() -> String {
    std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "unknown".to_string())
}
