//! Reporting seam: hand a fault to an error tracker, get an opaque id back.

use std::fmt;
use std::sync::{Arc, Mutex};

use crate::error::{FaultlineError, Result};
use crate::event::Fault;

/// Identifier returned by a reporter. Opaque: no format is assumed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReportId(String);

impl ReportId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ReportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// External error-tracking collaborator.
pub trait Reporter: Send + Sync {
    fn name(&self) -> &'static str;
    fn report(&self, fault: &Fault) -> Result<ReportId>;
}

/// Ordered fan-out to several reporters.
///
/// Every reporter sees the fault in registration order; the id of the last one
/// is returned. The first failing reporter aborts the fan-out and its error is
/// returned unchanged.
#[derive(Default)]
pub struct ReportBus {
    reporters: Vec<Arc<dyn Reporter>>,
}

impl ReportBus {
    pub fn new() -> Self {
        Self { reporters: Vec::new() }
    }

    pub fn register(&mut self, reporter: Arc<dyn Reporter>) {
        self.reporters.push(reporter);
    }

    pub fn registered(&self) -> Vec<&'static str> {
        self.reporters.iter().map(|r| r.name()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.reporters.is_empty()
    }
}

impl Reporter for ReportBus {
    fn name(&self) -> &'static str {
        "bus"
    }

    fn report(&self, fault: &Fault) -> Result<ReportId> {
        let mut last = None;
        for r in &self.reporters {
            last = Some(r.report(fault)?);
        }
        last.ok_or_else(|| FaultlineError::Report("no reporters registered".into()))
    }
}

/// In-memory reporter for tests and wiring checks.
///
/// Keeps every fault and hands out sequential ids (`<prefix>1`, `<prefix>2`, ...).
#[derive(Default)]
pub struct RecordingReporter {
    prefix: String,
    seen: Mutex<Vec<Fault>>,
}

impl RecordingReporter {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            seen: Mutex::new(Vec::new()),
        }
    }

    /// Faults reported so far.
    pub fn faults(&self) -> Vec<Fault> {
        self.seen.lock().map(|g| g.clone()).unwrap_or_default()
    }

    pub fn count(&self) -> usize {
        self.seen.lock().map(|g| g.len()).unwrap_or(0)
    }
}

impl Reporter for RecordingReporter {
    fn name(&self) -> &'static str {
        "recording"
    }

    fn report(&self, fault: &Fault) -> Result<ReportId> {
        let mut g = self
            .seen
            .lock()
            .map_err(|_| FaultlineError::Internal("recording reporter poisoned".into()))?;
        g.push(fault.clone());
        Ok(ReportId::new(format!("{}{}", self.prefix, g.len())))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    struct Failing;

    impl Reporter for Failing {
        fn name(&self) -> &'static str {
            "failing"
        }
        fn report(&self, _fault: &Fault) -> Result<ReportId> {
            Err(FaultlineError::Report("tracker unreachable".into()))
        }
    }

    #[test]
    fn bus_returns_last_id_and_fans_out() {
        let a = Arc::new(RecordingReporter::new("a-"));
        let b = Arc::new(RecordingReporter::new("b-"));
        let mut bus = ReportBus::new();
        bus.register(a.clone());
        bus.register(b.clone());

        let id = bus.report(&Fault::new("E", "boom")).unwrap();
        assert_eq!(id.as_str(), "b-1");
        assert_eq!(a.count(), 1);
        assert_eq!(b.count(), 1);
        assert_eq!(bus.registered(), vec!["recording", "recording"]);
    }

    #[test]
    fn empty_bus_is_an_error() {
        let err = ReportBus::new().report(&Fault::new("E", "boom")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Report);
    }

    #[test]
    fn failing_reporter_stops_fan_out() {
        let after = Arc::new(RecordingReporter::new("x"));
        let mut bus = ReportBus::new();
        bus.register(Arc::new(Failing));
        bus.register(after.clone());

        assert!(bus.report(&Fault::new("E", "boom")).is_err());
        assert_eq!(after.count(), 0);
    }
}
