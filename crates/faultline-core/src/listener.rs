//! Listener registration for the host's error hooks.
//!
//! The host fires [`Hook::DispatchError`] when a handler fails and
//! [`Hook::RenderError`] when the view layer fails. Listeners run by descending
//! priority (ties in registration order); each sees the result/response left
//! by the previous one.

use std::fmt;
use std::sync::Arc;

use crate::error::Result;
use crate::event::{ErrorEvent, Outcome};
use crate::strategy::ExceptionStrategy;

/// Named hook points in the host dispatch cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hook {
    DispatchError,
    RenderError,
}

impl Hook {
    pub fn as_str(self) -> &'static str {
        match self {
            Hook::DispatchError => "dispatch.error",
            Hook::RenderError => "render.error",
        }
    }
}

impl fmt::Display for Hook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A component that reacts to error events.
pub trait ErrorListener: Send + Sync {
    fn name(&self) -> &'static str;
    fn handle(&self, event: ErrorEvent) -> Result<Outcome>;
}

/// Handle returned by [`ListenerRegistry::attach`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

struct Entry {
    id: ListenerId,
    hook: Hook,
    priority: i32,
    listener: Arc<dyn ErrorListener>,
}

/// Hook -> listener table. Populate at wiring time, then share read-only.
#[derive(Default)]
pub struct ListenerRegistry {
    entries: Vec<Entry>,
    next_id: u64,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach(&mut self, hook: Hook, priority: i32, listener: Arc<dyn ErrorListener>) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;

        let pos = self
            .entries
            .iter()
            .position(|e| e.priority < priority)
            .unwrap_or(self.entries.len());
        self.entries.insert(pos, Entry { id, hook, priority, listener });
        id
    }

    /// Remove listeners by id. Returns how many were removed.
    pub fn detach(&mut self, ids: &[ListenerId]) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| !ids.contains(&e.id));
        before - self.entries.len()
    }

    /// Listener names attached to a hook, in call order.
    pub fn listeners(&self, hook: Hook) -> Vec<&'static str> {
        self.entries
            .iter()
            .filter(|e| e.hook == hook)
            .map(|e| e.listener.name())
            .collect()
    }

    /// Run every listener attached to `hook`.
    ///
    /// The first listener error aborts the run and is returned.
    pub fn trigger(&self, hook: Hook, event: ErrorEvent) -> Result<Outcome> {
        let ErrorEvent { error, exception, result, response } = event;
        let mut outcome = Outcome { result, response };

        for e in self.entries.iter().filter(|e| e.hook == hook) {
            let ev = ErrorEvent {
                error: error.clone(),
                exception: exception.clone(),
                result: outcome.result,
                response: outcome.response,
            };
            outcome = e.listener.handle(ev).map_err(|err| {
                tracing::error!(hook = %hook, listener = e.listener.name(), error = %err, "error listener failed");
                err
            })?;
        }
        Ok(outcome)
    }
}

impl ErrorListener for ExceptionStrategy {
    fn name(&self) -> &'static str {
        "exception_strategy"
    }

    fn handle(&self, event: ErrorEvent) -> Result<Outcome> {
        ExceptionStrategy::handle(self, event)
    }
}

impl ExceptionStrategy {
    /// Attach to both the dispatch and render error hooks.
    pub fn attach(self: &Arc<Self>, registry: &mut ListenerRegistry, priority: i32) -> Vec<ListenerId> {
        [Hook::DispatchError, Hook::RenderError]
            .into_iter()
            .map(|hook| registry.attach(hook, priority, self.clone()))
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::event::{DispatchResult, ErrorCode, Fault, Response};
    use crate::report::RecordingReporter;
    use crate::strategy::StrategyConfig;

    /// Marks every event with a fixed status.
    struct SetStatus(&'static str, u16);

    impl ErrorListener for SetStatus {
        fn name(&self) -> &'static str {
            self.0
        }
        fn handle(&self, event: ErrorEvent) -> Result<Outcome> {
            Ok(Outcome {
                result: event.result,
                response: Some(Response::new(self.1)),
            })
        }
    }

    fn strategy() -> (Arc<ExceptionStrategy>, Arc<RecordingReporter>) {
        let rec = Arc::new(RecordingReporter::new("r"));
        (Arc::new(ExceptionStrategy::new(StrategyConfig::default(), rec.clone())), rec)
    }

    #[test]
    fn strategy_attaches_to_both_hooks() {
        let (s, _) = strategy();
        let mut reg = ListenerRegistry::new();
        let ids = s.attach(&mut reg, 1);
        assert_eq!(ids.len(), 2);
        assert_eq!(reg.listeners(Hook::DispatchError), vec!["exception_strategy"]);
        assert_eq!(reg.listeners(Hook::RenderError), vec!["exception_strategy"]);

        assert_eq!(reg.detach(&ids), 2);
        assert!(reg.listeners(Hook::DispatchError).is_empty());
    }

    #[test]
    fn higher_priority_runs_first_and_outcome_threads_through() {
        let (s, rec) = strategy();
        let mut reg = ListenerRegistry::new();
        s.attach(&mut reg, 1);
        reg.attach(Hook::DispatchError, 10, Arc::new(SetStatus("forbid", 403)));
        reg.attach(Hook::DispatchError, 10, Arc::new(SetStatus("forbid-again", 403)));

        assert_eq!(
            reg.listeners(Hook::DispatchError),
            vec!["forbid", "forbid-again", "exception_strategy"]
        );

        let ev = ErrorEvent::new(ErrorCode::Exception).with_exception(Fault::new("E", "boom"));
        let out = reg.trigger(Hook::DispatchError, ev).unwrap();
        assert_eq!(out.response, Some(Response::new(403)));
        assert!(matches!(out.result, Some(DispatchResult::View(_))));
        assert_eq!(rec.count(), 1);
    }

    #[test]
    fn hook_without_listeners_returns_event_unchanged() {
        let reg = ListenerRegistry::new();
        let ev = ErrorEvent::new(ErrorCode::Exception).with_response(Response::new(200));
        let out = reg.trigger(Hook::RenderError, ev).unwrap();
        assert_eq!(out.response, Some(Response::new(200)));
        assert_eq!(out.result, None);
    }
}
