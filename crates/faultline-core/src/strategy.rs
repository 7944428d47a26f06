//! Exception strategy: classify a dispatch error, report it, shape the error page.

use std::sync::Arc;

use crate::error::{FaultlineError, Result};
use crate::event::{DispatchResult, ErrorCode, ErrorEvent, Fault, Outcome, Response, ViewModel};
use crate::report::Reporter;
use crate::template::MessageTemplate;

/// Status applied to responses the strategy takes over.
pub const ERROR_STATUS: u16 = 500;

/// Default view template name.
pub const DEFAULT_TEMPLATE: &str = "error";

/// Immutable strategy settings. Build once at wiring time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrategyConfig {
    display_exceptions: bool,
    message: MessageTemplate,
    template: String,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            display_exceptions: false,
            message: MessageTemplate::default(),
            template: DEFAULT_TEMPLATE.to_string(),
        }
    }
}

impl StrategyConfig {
    pub fn with_display_exceptions(mut self, display: bool) -> Self {
        self.display_exceptions = display;
        self
    }

    /// Set the user-facing message. Rejected unless it has exactly one `%s`.
    pub fn with_message_template(mut self, raw: &str) -> Result<Self> {
        self.message = MessageTemplate::parse(raw)?;
        Ok(self)
    }

    pub fn with_template(mut self, template: impl Into<String>) -> Result<Self> {
        let template = template.into();
        if template.trim().is_empty() {
            return Err(FaultlineError::Config("exception template name must not be empty".into()));
        }
        self.template = template;
        Ok(self)
    }

    pub fn display_exceptions(&self) -> bool {
        self.display_exceptions
    }

    pub fn message(&self) -> &MessageTemplate {
        &self.message
    }

    pub fn template(&self) -> &str {
        &self.template
    }
}

/// Why the strategy left an event alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NoError,
    ResponseAlreadySet,
    RoutingError,
    NoException,
}

impl SkipReason {
    pub fn as_str(self) -> &'static str {
        match self {
            SkipReason::NoError => "no_error",
            SkipReason::ResponseAlreadySet => "response_already_set",
            SkipReason::RoutingError => "routing_error",
            SkipReason::NoException => "no_exception",
        }
    }
}

/// Classification result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Skip(SkipReason),
    Report,
}

/// Reports unhandled exceptions and swaps in a generic error view.
pub struct ExceptionStrategy {
    config: StrategyConfig,
    reporter: Arc<dyn Reporter>,
}

impl ExceptionStrategy {
    pub fn new(config: StrategyConfig, reporter: Arc<dyn Reporter>) -> Self {
        Self { config, reporter }
    }

    pub fn config(&self) -> &StrategyConfig {
        &self.config
    }

    /// Decide whether an event is ours. Pure; no reporting happens here.
    pub fn classify(event: &ErrorEvent) -> Decision {
        let code = match &event.error {
            None => return Decision::Skip(SkipReason::NoError),
            Some(ErrorCode::Other(s)) if s.trim().is_empty() => {
                return Decision::Skip(SkipReason::NoError)
            }
            Some(code) => code,
        };

        if event.result.as_ref().is_some_and(DispatchResult::is_response) {
            return Decision::Skip(SkipReason::ResponseAlreadySet);
        }

        if code.is_routing() {
            return Decision::Skip(SkipReason::RoutingError);
        }

        // Hosts also raise plain errors (e.g. unauthorized routes) on this channel.
        if event.exception.is_none() {
            return Decision::Skip(SkipReason::NoException);
        }

        Decision::Report
    }

    /// Run the strategy against one event.
    ///
    /// Returns the event's result/response after handling. The only error is a
    /// reporter failure, passed through unchanged.
    pub fn handle(&self, event: ErrorEvent) -> Result<Outcome> {
        match Self::classify(&event) {
            Decision::Skip(reason) => {
                tracing::debug!(
                    reason = reason.as_str(),
                    code = event.error.as_ref().map(ErrorCode::as_str).unwrap_or(""),
                    "exception strategy skipped event"
                );
                Ok(event.into_outcome())
            }
            Decision::Report => {
                let ErrorEvent { exception, response, .. } = event;
                let fault = exception
                    .ok_or_else(|| FaultlineError::Internal("classified without exception".into()))?;
                self.render_fault(fault, response)
            }
        }
    }

    fn render_fault(&self, fault: Fault, response: Option<Response>) -> Result<Outcome> {
        let id = self.reporter.report(&fault)?;
        if id.is_empty() {
            tracing::warn!(reporter = self.reporter.name(), kind = %fault.kind, "reporter returned an empty id");
        } else {
            tracing::info!(event_id = %id, kind = %fault.kind, "exception reported");
        }

        let model = ViewModel::new(self.config.template.clone())
            .with_variable("message", self.config.message.render(&id))?
            .with_variable("exception", &fault)?
            .with_variable("display_exceptions", self.config.display_exceptions)?;

        let response = match response {
            None => Response::new(ERROR_STATUS),
            Some(r) if r.status == 200 => Response::new(ERROR_STATUS),
            Some(r) => r,
        };

        Ok(Outcome {
            result: Some(DispatchResult::View(model)),
            response: Some(response),
        })
    }
}
