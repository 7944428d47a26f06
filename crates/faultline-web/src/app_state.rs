//! Shared application state for the faultline web host.
//!
//! Compiles config into the exception strategy, the listener registry, and the
//! view renderer once at startup. Startup errors are returned, not panicked.

use std::sync::Arc;

use faultline_core::error::Result;
use faultline_core::listener::ListenerRegistry;
use faultline_core::report::{ReportBus, Reporter};
use faultline_core::strategy::ExceptionStrategy;

use crate::config::AppConfig;
use crate::render::ViewRenderer;
use crate::report::TracingReporter;

/// Priority the exception strategy is attached with.
const STRATEGY_PRIORITY: i32 = 1;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: AppConfig,
    listeners: ListenerRegistry,
    renderer: ViewRenderer,
}

impl AppState {
    /// Build state with the log-backed reporter.
    pub fn new(cfg: AppConfig) -> Result<Self> {
        let reporter: Arc<dyn Reporter> = Arc::new(TracingReporter::new(cfg.reporting.environment.clone()));
        Self::with_reporters(cfg, vec![reporter])
    }

    /// Build state with explicit reporters (called in order; the last id wins).
    pub fn with_reporters(cfg: AppConfig, reporters: Vec<Arc<dyn Reporter>>) -> Result<Self> {
        let strategy_cfg = cfg.strategy.to_strategy_config()?;

        let mut bus = ReportBus::new();
        for r in reporters {
            bus.register(r);
        }
        if bus.is_empty() {
            tracing::warn!("no reporters registered; exceptions will surface as plain 500s");
        }
        tracing::debug!(reporters = ?bus.registered(), "report bus ready");

        let strategy = Arc::new(ExceptionStrategy::new(strategy_cfg, Arc::new(bus)));
        let mut listeners = ListenerRegistry::new();
        strategy.attach(&mut listeners, STRATEGY_PRIORITY);

        let renderer = ViewRenderer::new();
        let template = strategy.config().template();
        if !renderer.knows(template) {
            tracing::warn!(template = %template, "exception template is not registered with the view renderer");
        }

        Ok(Self {
            inner: Arc::new(AppStateInner {
                cfg,
                listeners,
                renderer,
            }),
        })
    }

    pub fn cfg(&self) -> &AppConfig {
        &self.inner.cfg
    }

    pub fn listeners(&self) -> &ListenerRegistry {
        &self.inner.listeners
    }

    pub fn renderer(&self) -> &ViewRenderer {
        &self.inner.renderer
    }
}
