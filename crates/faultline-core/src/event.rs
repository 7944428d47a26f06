//! Error-event model shared between the host dispatch loop and listeners.
//!
//! An [`ErrorEvent`] is built once per failed dispatch, handed to listeners by
//! value, and comes back as an [`Outcome`] carrying the (possibly replaced)
//! result and response.

use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{FaultlineError, Result};

/// Error codes raised by the host dispatch cycle.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// No controller is registered for the matched route.
    ControllerNotFound,
    /// The resolved controller cannot dispatch.
    ControllerInvalid,
    /// No route matched the request.
    RouterNoMatch,
    /// A handler raised an exception.
    Exception,
    /// Any other host-defined code (e.g. `error-route-unauthorized`).
    Other(String),
}

impl ErrorCode {
    /// Parse a wire code. Empty or blank codes mean "no error".
    pub fn from_code(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.is_empty() {
            return None;
        }
        Some(match s {
            "error-controller-not-found" => ErrorCode::ControllerNotFound,
            "error-controller-invalid" => ErrorCode::ControllerInvalid,
            "error-router-no-match" => ErrorCode::RouterNoMatch,
            "error-exception" => ErrorCode::Exception,
            other => ErrorCode::Other(other.to_string()),
        })
    }

    pub fn as_str(&self) -> &str {
        match self {
            ErrorCode::ControllerNotFound => "error-controller-not-found",
            ErrorCode::ControllerInvalid => "error-controller-invalid",
            ErrorCode::RouterNoMatch => "error-router-no-match",
            ErrorCode::Exception => "error-exception",
            ErrorCode::Other(s) => s,
        }
    }

    /// Routing-layer failures that are left to other handlers.
    pub fn is_routing(&self) -> bool {
        matches!(
            self,
            ErrorCode::ControllerNotFound | ErrorCode::ControllerInvalid | ErrorCode::RouterNoMatch
        )
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of the exception that caused a dispatch failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Fault {
    /// Type name of the error.
    pub kind: String,
    pub message: String,
    /// Messages of `source()` errors, outermost first.
    pub chain: Vec<String>,
}

impl Fault {
    pub fn new(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            message: message.into(),
            chain: Vec::new(),
        }
    }

    /// Capture an error and its source chain.
    pub fn capture<E>(err: &E) -> Self
    where
        E: std::error::Error + 'static,
    {
        let mut chain = Vec::new();
        let mut cur = err.source();
        while let Some(src) = cur {
            chain.push(src.to_string());
            cur = src.source();
        }
        Self {
            kind: std::any::type_name::<E>().to_string(),
            message: err.to_string(),
            chain,
        }
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

/// Minimal view of the host's HTTP response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
}

impl Response {
    pub fn new(status: u16) -> Self {
        Self { status }
    }
}

impl Default for Response {
    fn default() -> Self {
        Self { status: 200 }
    }
}

/// Data + template pair consumed by the host's view layer.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewModel {
    pub template: String,
    pub variables: Map<String, Value>,
}

impl ViewModel {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            variables: Map::new(),
        }
    }

    pub fn with_variable<T: Serialize>(mut self, key: &str, value: T) -> Result<Self> {
        let v = serde_json::to_value(value)
            .map_err(|e| FaultlineError::Internal(format!("view variable {key}: {e}")))?;
        self.variables.insert(key.to_string(), v);
        Ok(self)
    }

    pub fn variable(&self, key: &str) -> Option<&Value> {
        self.variables.get(key)
    }
}

/// What a dispatch produced before the error was raised.
#[derive(Debug, Clone, PartialEq)]
pub enum DispatchResult {
    /// A finalized response; listeners must not replace it.
    Response(Response),
    /// A renderable model.
    View(ViewModel),
}

impl DispatchResult {
    pub fn is_response(&self) -> bool {
        matches!(self, DispatchResult::Response(_))
    }

    pub fn as_view(&self) -> Option<&ViewModel> {
        match self {
            DispatchResult::View(m) => Some(m),
            DispatchResult::Response(_) => None,
        }
    }
}

/// One dispatch/render failure notification.
#[derive(Debug, Clone, Default)]
pub struct ErrorEvent {
    pub error: Option<ErrorCode>,
    pub exception: Option<Fault>,
    pub result: Option<DispatchResult>,
    pub response: Option<Response>,
}

impl ErrorEvent {
    pub fn new(error: ErrorCode) -> Self {
        Self {
            error: Some(error),
            ..Self::default()
        }
    }

    pub fn with_exception(mut self, fault: Fault) -> Self {
        self.exception = Some(fault);
        self
    }

    pub fn with_result(mut self, result: DispatchResult) -> Self {
        self.result = Some(result);
        self
    }

    pub fn with_response(mut self, response: Response) -> Self {
        self.response = Some(response);
        self
    }

    /// Hand the event back unchanged.
    pub fn into_outcome(self) -> Outcome {
        Outcome {
            result: self.result,
            response: self.response,
        }
    }
}

/// Result/response pair after listeners ran.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Outcome {
    pub result: Option<DispatchResult>,
    pub response: Option<Response>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[derive(Debug, thiserror::Error)]
    #[error("db down")]
    struct DbDown;

    #[derive(Debug, thiserror::Error)]
    #[error("query failed")]
    struct QueryFailed(#[source] DbDown);

    #[test]
    fn parses_known_and_open_codes() {
        assert_eq!(ErrorCode::from_code("error-router-no-match"), Some(ErrorCode::RouterNoMatch));
        assert_eq!(ErrorCode::from_code("error-exception"), Some(ErrorCode::Exception));
        assert_eq!(
            ErrorCode::from_code("error-route-unauthorized"),
            Some(ErrorCode::Other("error-route-unauthorized".into()))
        );
        assert_eq!(ErrorCode::from_code("  "), None);
        assert_eq!(ErrorCode::Other("x".into()).as_str(), "x");
    }

    #[test]
    fn capture_walks_source_chain() {
        let f = Fault::capture(&QueryFailed(DbDown));
        assert!(f.kind.ends_with("QueryFailed"));
        assert_eq!(f.message, "query failed");
        assert_eq!(f.chain, vec!["db down".to_string()]);
    }

    #[test]
    fn view_model_variables() {
        let m = ViewModel::new("error")
            .with_variable("message", "hi")
            .and_then(|m| m.with_variable("n", 3))
            .unwrap();
        assert_eq!(m.variable("message"), Some(&Value::from("hi")));
        assert_eq!(m.variable("n"), Some(&Value::from(3)));
    }
}
