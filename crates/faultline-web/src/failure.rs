//! Handler-side error type.
//!
//! Handlers return `Err(DispatchFailure)`; the failure travels to the error
//! pipeline inside the response extensions, where it becomes an
//! [`ErrorEvent`].

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use faultline_core::event::{DispatchResult, ErrorCode, ErrorEvent, Fault};

#[derive(Debug, Clone)]
pub struct DispatchFailure {
    /// None: the host raised a blank code.
    pub code: Option<ErrorCode>,
    pub fault: Option<Fault>,
    /// Status the handler set before failing (None: no response yet).
    pub status: Option<StatusCode>,
    /// The handler already produced the final response body.
    pub finalized: bool,
}

impl DispatchFailure {
    pub fn new(code: ErrorCode) -> Self {
        Self {
            code: Some(code),
            fault: None,
            status: None,
            finalized: false,
        }
    }

    /// A handler raised an error.
    pub fn exception<E>(err: &E) -> Self
    where
        E: std::error::Error + 'static,
    {
        Self {
            fault: Some(Fault::capture(err)),
            ..Self::new(ErrorCode::Exception)
        }
    }

    /// Failure raised under a host wire code (e.g. `error-route-unauthorized`).
    pub fn from_code(code: &str) -> Self {
        Self {
            code: ErrorCode::from_code(code),
            ..Self::new(ErrorCode::Exception)
        }
    }

    pub fn router_no_match() -> Self {
        Self::new(ErrorCode::RouterNoMatch).with_status(StatusCode::NOT_FOUND)
    }

    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = Some(status);
        self
    }

    /// Tag an already-built response; listeners will leave it as is.
    pub fn attach_to(mut self, mut res: Response) -> Response {
        self.finalized = true;
        self.status = Some(res.status());
        res.extensions_mut().insert(self);
        res
    }

    pub fn to_event(&self) -> ErrorEvent {
        let mut ev = ErrorEvent {
            error: self.code.clone(),
            exception: self.fault.clone(),
            ..ErrorEvent::default()
        };
        if let Some(status) = self.status {
            let response = faultline_core::event::Response::new(status.as_u16());
            ev.response = Some(response);
            if self.finalized {
                ev.result = Some(DispatchResult::Response(response));
            }
        }
        ev
    }
}

impl IntoResponse for DispatchFailure {
    fn into_response(self) -> Response {
        let status = self.status.unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let mut res = status.into_response();
        res.extensions_mut().insert(self);
        res
    }
}
