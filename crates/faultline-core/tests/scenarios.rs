//! End-to-end policy scenarios through the public API.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;

use faultline_core::report::RecordingReporter;
use faultline_core::{
    DispatchResult, ErrorCode, ErrorEvent, ExceptionStrategy, Fault, Hook, ListenerRegistry,
    Response, StrategyConfig,
};
use serde_json::Value;

fn wired(cfg: StrategyConfig) -> (ListenerRegistry, Arc<RecordingReporter>) {
    let rec = Arc::new(RecordingReporter::new("id-"));
    let strategy = Arc::new(ExceptionStrategy::new(cfg, rec.clone()));
    let mut reg = ListenerRegistry::new();
    strategy.attach(&mut reg, 1);
    (reg, rec)
}

#[test]
fn exception_without_response_gets_generic_page() {
    let cfg = StrategyConfig::default()
        .with_display_exceptions(false)
        .with_message_template("Oops id=%s")
        .unwrap();
    let (reg, rec) = wired(cfg);

    let ev = ErrorEvent::new(ErrorCode::Exception).with_exception(Fault::new("E", "kaput"));
    let out = reg.trigger(Hook::DispatchError, ev).unwrap();

    let Some(DispatchResult::View(model)) = out.result else {
        panic!("expected a view model");
    };
    assert_eq!(model.variable("message"), Some(&Value::from("Oops id=id-1")));
    assert!(model.variable("exception").is_some());
    assert_eq!(model.variable("display_exceptions"), Some(&Value::Bool(false)));
    assert_eq!(out.response, Some(Response::new(500)));
    assert_eq!(rec.count(), 1);
}

#[test]
fn router_no_match_leaves_everything_empty() {
    let (reg, rec) = wired(StrategyConfig::default());
    let out = reg
        .trigger(Hook::DispatchError, ErrorEvent::new(ErrorCode::RouterNoMatch))
        .unwrap();
    assert!(out.result.is_none());
    assert!(out.response.is_none());
    assert_eq!(rec.count(), 0);
}

#[test]
fn forbidden_status_survives() {
    let (reg, _) = wired(StrategyConfig::default());
    let ev = ErrorEvent::new(ErrorCode::Exception)
        .with_exception(Fault::new("E", "nope"))
        .with_response(Response::new(403));
    let out = reg.trigger(Hook::RenderError, ev).unwrap();
    assert_eq!(out.response, Some(Response::new(403)));
}

#[test]
fn default_message_carries_the_id() {
    let (reg, _) = wired(StrategyConfig::default());
    let ev = ErrorEvent::new(ErrorCode::Exception).with_exception(Fault::new("E", "x"));
    let out = reg.trigger(Hook::DispatchError, ev).unwrap();
    let model = out.result.as_ref().and_then(DispatchResult::as_view).unwrap();
    let msg = model.variable("message").and_then(Value::as_str).unwrap();
    assert!(msg.starts_with("Oh no. Something went wrong"));
    assert!(msg.ends_with("eventID: id-1"));
}
