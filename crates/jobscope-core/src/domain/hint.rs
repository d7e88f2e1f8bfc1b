//! Hint model: labeled explanations of why a job failed, stopped or is waiting.

use std::fmt;

use serde::Serialize;

/// How a hint report should be rendered.
///
/// Serialized in lowercase: `error` / `warning` / `info`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        };
        f.write_str(s)
    }
}

/// Renderable content of a hint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum HintBody {
    Text(String),

    /// Several parts shown as one item each, in order.
    Lines(Vec<String>),

    Number(i64),

    /// Points the reader at the raw exit diagnostics.
    SeeDiagnostics,
}

impl fmt::Display for HintBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HintBody::Text(text) => f.write_str(text),
            HintBody::Lines(lines) if lines.len() == 1 => f.write_str(&lines[0]),
            HintBody::Lines(lines) => {
                for (i, line) in lines.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "- {line}")?;
                }
                Ok(())
            }
            HintBody::Number(n) => write!(f, "{n}"),
            HintBody::SeeDiagnostics => {
                f.write_str("Please check the exit diagnostics for more information.")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Hint {
    pub header: String,
    pub body: HintBody,
}

impl Hint {
    pub fn new(header: impl Into<String>, body: HintBody) -> Self {
        Self {
            header: header.into(),
            body,
        }
    }

    pub fn text(header: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(header, HintBody::Text(text.into()))
    }

    pub fn number(header: impl Into<String>, n: i64) -> Self {
        Self::new(header, HintBody::Number(n))
    }
}

/// Ordered hints plus the severity to render them with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HintReport {
    pub severity: Severity,
    pub hints: Vec<Hint>,
}

impl HintReport {
    /// First hint with the given header.
    pub fn get(&self, header: &str) -> Option<&Hint> {
        self.hints.iter().find(|h| h.header == header)
    }

    pub fn headers(&self) -> Vec<&str> {
        self.hints.iter().map(|h| h.header.as_str()).collect()
    }
}

impl fmt::Display for HintReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[{}]", self.severity)?;
        for hint in &self.hints {
            match &hint.body {
                HintBody::Lines(lines) if lines.len() > 1 => {
                    writeln!(f, "{}:", hint.header)?;
                    for line in lines {
                        writeln!(f, "  - {line}")?;
                    }
                }
                body => writeln!(f, "{}: {}", hint.header, body)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_serializes_lowercase() {
        let s = serde_json::to_string(&Severity::Warning).unwrap();
        assert_eq!(s, "\"warning\"");
    }

    #[test]
    fn hint_body_is_tagged_enum() {
        let v = serde_json::to_value(HintBody::Number(3)).unwrap();
        assert_eq!(v["kind"], "number");
        assert_eq!(v["value"], 3);

        let v = serde_json::to_value(HintBody::SeeDiagnostics).unwrap();
        assert_eq!(v["kind"], "see_diagnostics");
    }

    #[test]
    fn report_renders_multi_line_bodies_as_list() {
        let report = HintReport {
            severity: Severity::Error,
            hints: vec![
                Hint::number("Exit Code", 1),
                Hint::new(
                    "Exit Reason",
                    HintBody::Lines(vec!["R1".to_string(), "R2".to_string()]),
                ),
            ],
        };

        let out = report.to_string();
        assert_eq!(out, "[error]\nExit Code: 1\nExit Reason:\n  - R1\n  - R2\n");
    }
}
