//! Minimal HTML view layer for error pages.
//!
//! Only what the error pipeline needs: named templates as plain functions over
//! a [`ViewModel`]. Unknown templates and missing variables are render errors.

use std::collections::HashMap;

use faultline_core::error::{FaultlineError, Result};
use faultline_core::event::ViewModel;
use serde_json::Value;

/// A template turns a view model into HTML.
pub type TemplateFn = fn(&ViewModel) -> Result<String>;

pub struct ViewRenderer {
    templates: HashMap<String, TemplateFn>,
}

impl Default for ViewRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewRenderer {
    /// Renderer with the built-in `error` template.
    pub fn new() -> Self {
        let mut templates: HashMap<String, TemplateFn> = HashMap::new();
        templates.insert("error".into(), error_page);
        Self { templates }
    }

    pub fn knows(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }

    pub fn render(&self, model: &ViewModel) -> Result<String> {
        let template = self
            .templates
            .get(&model.template)
            .ok_or_else(|| FaultlineError::Render(format!("unknown template: {}", model.template)))?;
        template(model)
    }
}

fn error_page(model: &ViewModel) -> Result<String> {
    let message = model
        .variable("message")
        .and_then(Value::as_str)
        .ok_or_else(|| FaultlineError::Render("error template needs a message".into()))?;
    let display = model
        .variable("display_exceptions")
        .and_then(Value::as_bool)
        .unwrap_or(false);

    let mut html = String::from("<!DOCTYPE html>\n<html><head><title>Error</title></head><body>\n");
    html.push_str("<h1>An error occurred</h1>\n");
    html.push_str(&format!("<p class=\"message\">{}</p>\n", escape(message)));

    if display {
        if let Some(exc) = model.variable("exception") {
            let field = |k: &str| exc.get(k).and_then(Value::as_str).unwrap_or("");
            html.push_str("<h2>Exception</h2>\n");
            html.push_str(&format!(
                "<dl><dt>Kind</dt><dd>{}</dd><dt>Message</dt><dd>{}</dd></dl>\n",
                escape(field("kind")),
                escape(field("message"))
            ));
            let chain: Vec<&str> = exc
                .get("chain")
                .and_then(Value::as_array)
                .map(|a| a.iter().filter_map(Value::as_str).collect())
                .unwrap_or_default();
            if !chain.is_empty() {
                html.push_str("<h3>Caused by</h3>\n<ol>\n");
                for c in chain {
                    html.push_str(&format!("<li>{}</li>\n", escape(c)));
                }
                html.push_str("</ol>\n");
            }
        }
    }

    html.push_str("</body></html>\n");
    Ok(html)
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use faultline_core::event::Fault;

    fn model(display: bool) -> ViewModel {
        let mut fault = Fault::new("app::Boom", "secret <detail>");
        fault.chain.push("disk full".into());
        ViewModel::new("error")
            .with_variable("message", "Oops id=<1>")
            .and_then(|m| m.with_variable("exception", &fault))
            .and_then(|m| m.with_variable("display_exceptions", display))
            .unwrap()
    }

    #[test]
    fn hides_exception_unless_enabled() {
        let r = ViewRenderer::new();
        let html = r.render(&model(false)).unwrap();
        assert!(html.contains("Oops id=&lt;1&gt;"));
        assert!(!html.contains("secret"));

        let html = r.render(&model(true)).unwrap();
        assert!(html.contains("secret &lt;detail&gt;"));
        assert!(html.contains("<li>disk full</li>"));
    }

    #[test]
    fn unknown_template_fails() {
        let r = ViewRenderer::new();
        assert!(!r.knows("nope"));
        assert!(r.render(&ViewModel::new("nope")).is_err());
        assert!(r.render(&ViewModel::new("error")).is_err());
    }
}
