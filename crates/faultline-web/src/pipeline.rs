//! Error pipeline middleware.
//!
//! Runs after the handler. Responses tagged with a [`DispatchFailure`] are fed
//! through the `dispatch.error` listeners; a returned view model is rendered
//! with the outcome's status. If rendering fails, `render.error` gets one shot
//! before falling back to a plain 500.

use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{Html, IntoResponse, Response};

use faultline_core::event::{self, DispatchResult, ErrorCode, ErrorEvent, Fault, ViewModel};
use faultline_core::listener::Hook;

use crate::app_state::AppState;
use crate::failure::DispatchFailure;

pub async fn error_pipeline(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let mut res = next.run(req).await;
    let Some(failure) = res.extensions_mut().remove::<DispatchFailure>() else {
        return res;
    };

    let outcome = match state.listeners().trigger(Hook::DispatchError, failure.to_event()) {
        Ok(o) => o,
        Err(err) => {
            tracing::error!(
                code = failure.code.as_ref().map(ErrorCode::as_str).unwrap_or(""),
                error = %err,
                "dispatch.error listeners failed"
            );
            return internal_error();
        }
    };

    match outcome.result {
        Some(DispatchResult::View(model)) => render_view(&state, &model, outcome.response),
        _ => {
            if let Some(status) = outcome.response.and_then(status_of) {
                *res.status_mut() = status;
            }
            res
        }
    }
}

fn render_view(state: &AppState, model: &ViewModel, response: Option<event::Response>) -> Response {
    let status = response.and_then(status_of).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    match state.renderer().render(model) {
        Ok(html) => (status, Html(html)).into_response(),
        Err(err) => {
            tracing::error!(template = %model.template, error = %err, "error view failed to render");
            render_error(state, Fault::capture(&err), response)
        }
    }
}

fn render_error(state: &AppState, fault: Fault, response: Option<event::Response>) -> Response {
    let ev = ErrorEvent {
        error: Some(ErrorCode::Exception),
        exception: Some(fault),
        result: None,
        response,
    };
    let outcome = match state.listeners().trigger(Hook::RenderError, ev) {
        Ok(o) => o,
        Err(err) => {
            tracing::error!(error = %err, "render.error listeners failed");
            return internal_error();
        }
    };

    let status = outcome
        .response
        .and_then(status_of)
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    match outcome.result.as_ref().and_then(DispatchResult::as_view) {
        Some(model) => match state.renderer().render(model) {
            Ok(html) => (status, Html(html)).into_response(),
            Err(err) => {
                tracing::error!(template = %model.template, error = %err, "error view failed to render twice");
                internal_error()
            }
        },
        None => (status, "internal server error").into_response(),
    }
}

fn status_of(r: event::Response) -> Option<StatusCode> {
    StatusCode::from_u16(r.status).ok()
}

fn internal_error() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, "internal server error").into_response()
}
