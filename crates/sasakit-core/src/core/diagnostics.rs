use std::fmt;

/// Severity of a diagnostic raised while ingesting or classifying atoms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Severity {
    #[default]
    Info,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Severity::Info => "info",
                Severity::Warning => "warning",
                Severity::Error => "error",
            }
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
}

pub type DiagnosticCallback<'a> = Box<dyn Fn(Diagnostic) + Send + Sync + 'a>;

/// A caller-supplied sink for diagnostics, filtered by severity.
///
/// Ingestion and classification report policy-governed anomalies (unknown atoms,
/// guessed radii) through this reporter instead of any process-wide verbosity
/// setting. A reporter without a callback discards everything.
#[derive(Default)]
pub struct DiagnosticReporter<'a> {
    callback: Option<DiagnosticCallback<'a>>,
    min_severity: Severity,
}

impl<'a> DiagnosticReporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: DiagnosticCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
            min_severity: Severity::Info,
        }
    }

    pub fn with_min_severity(mut self, severity: Severity) -> Self {
        self.min_severity = severity;
        self
    }

    #[inline]
    pub fn report(&self, diagnostic: Diagnostic) {
        if diagnostic.severity < self.min_severity {
            return;
        }
        if let Some(cb) = &self.callback {
            cb(diagnostic);
        }
    }

    pub fn warn(&self, message: impl Into<String>) {
        self.report(Diagnostic {
            severity: Severity::Warning,
            message: message.into(),
        });
    }

    pub fn info(&self, message: impl Into<String>) {
        self.report(Diagnostic {
            severity: Severity::Info,
            message: message.into(),
        });
    }
}

impl fmt::Debug for DiagnosticReporter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiagnosticReporter")
            .field("has_callback", &self.callback.is_some())
            .field("min_severity", &self.min_severity)
            .finish()
    }
}
