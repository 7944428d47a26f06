//! User-facing message template with a single report-id slot.
//!
//! Templates use the legacy printf form: `%s` marks the slot, `%%` is a literal
//! percent sign. Anything else after `%` is rejected when the template is
//! parsed, so rendering itself cannot fail.

use std::fmt;

use crate::error::{FaultlineError, Result};
use crate::report::ReportId;

/// Default message shown on the error page.
pub const DEFAULT_MESSAGE: &str =
    "Oh no. Something went wrong, but we have been notified. If you are testing, tell us your eventID: %s";

/// Parsed message template (text before and after the slot).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageTemplate {
    raw: String,
    before: String,
    after: String,
}

impl MessageTemplate {
    pub fn parse(raw: &str) -> Result<Self> {
        let mut before = String::new();
        let mut after = String::new();
        let mut slots = 0usize;

        let mut chars = raw.chars();
        while let Some(c) = chars.next() {
            let out = if slots == 0 { &mut before } else { &mut after };
            if c != '%' {
                out.push(c);
                continue;
            }
            match chars.next() {
                Some('%') => out.push('%'),
                Some('s') => slots += 1,
                Some(other) => {
                    return Err(FaultlineError::Template(format!(
                        "unsupported directive %{other} in {raw:?} (only %s and %% are allowed)"
                    )))
                }
                None => {
                    return Err(FaultlineError::Template(format!(
                        "dangling % at end of {raw:?}"
                    )))
                }
            }
        }

        if slots != 1 {
            return Err(FaultlineError::Template(format!(
                "expected exactly one %s slot in {raw:?}, found {slots}"
            )));
        }

        Ok(Self {
            raw: raw.to_string(),
            before,
            after,
        })
    }

    pub fn render(&self, id: &ReportId) -> String {
        let id = id.as_str();
        let mut out = String::with_capacity(self.before.len() + id.len() + self.after.len());
        out.push_str(&self.before);
        out.push_str(id);
        out.push_str(&self.after);
        out
    }

    /// Template as configured.
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl Default for MessageTemplate {
    fn default() -> Self {
        Self {
            raw: DEFAULT_MESSAGE.to_string(),
            before: DEFAULT_MESSAGE.trim_end_matches("%s").to_string(),
            after: String::new(),
        }
    }
}

impl fmt::Display for MessageTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn renders_id_into_slot() {
        let t = MessageTemplate::parse("Oops id=%s").unwrap();
        assert_eq!(t.render(&ReportId::new("abc123")), "Oops id=abc123");

        let t = MessageTemplate::parse("100%% sure: [%s] logged").unwrap();
        assert_eq!(t.render(&ReportId::new("7")), "100% sure: [7] logged");
    }

    #[test]
    fn default_matches_parsed_default() {
        assert_eq!(MessageTemplate::default(), MessageTemplate::parse(DEFAULT_MESSAGE).unwrap());
    }

    #[test]
    fn rejects_bad_slot_counts_and_directives() {
        for bad in ["no slot", "%s and %s", "id=%d", "trailing %", "%"] {
            let err = MessageTemplate::parse(bad).expect_err(bad);
            assert_eq!(err.kind(), ErrorKind::Template, "{bad}");
        }
    }
}
