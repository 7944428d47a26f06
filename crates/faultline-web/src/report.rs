//! Log-backed reporter.
//!
//! Stands in for a network error tracker: every fault becomes one `error!`
//! event tagged with a fresh event id, and that id is what users see on the
//! error page.

use uuid::Uuid;

use faultline_core::error::Result;
use faultline_core::event::Fault;
use faultline_core::report::{ReportId, Reporter};

pub struct TracingReporter {
    environment: String,
}

impl TracingReporter {
    pub fn new(environment: impl Into<String>) -> Self {
        Self {
            environment: environment.into(),
        }
    }
}

impl Reporter for TracingReporter {
    fn name(&self) -> &'static str {
        "tracing"
    }

    fn report(&self, fault: &Fault) -> Result<ReportId> {
        let id = Uuid::new_v4().simple().to_string();
        tracing::error!(
            event_id = %id,
            environment = %self.environment,
            kind = %fault.kind,
            chain = ?fault.chain,
            "{}",
            fault.message
        );
        Ok(ReportId::new(id))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique_hex() {
        let r = TracingReporter::new("test");
        let a = r.report(&Fault::new("E", "a")).unwrap();
        let b = r.report(&Fault::new("E", "b")).unwrap();
        assert_ne!(a, b);
        assert_eq!(a.as_str().len(), 32);
        assert!(a.as_str().chars().all(|c| c.is_ascii_hexdigit()));
    }
}
