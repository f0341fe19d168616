//! Diagnostic vocabulary, reporting sink, and rendering integration.

use miette::SourceSpan;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::config::Config;

/// Severity level for reported diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational message.
    Info,
    /// Warning that should be addressed.
    Warning,
    /// Error that must be fixed.
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Source code location inside a host declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceLocation {
    /// File the declaration was read from.
    pub file: PathBuf,
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed).
    pub column: usize,
    /// Byte offset in the file (for miette integration).
    pub offset: usize,
    /// Length of the span in bytes.
    pub length: usize,
}

impl SourceLocation {
    /// Creates a new location with explicit values.
    #[must_use]
    pub fn new(file: impl Into<PathBuf>, line: usize, column: usize) -> Self {
        Self {
            file: file.into(),
            line,
            column,
            offset: 0,
            length: 0,
        }
    }

    /// Sets the byte offset and length for this location.
    #[must_use]
    pub fn with_span(mut self, offset: usize, length: usize) -> Self {
        self.offset = offset;
        self.length = length;
        self
    }
}

/// The complete vocabulary of conditions the pipeline can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiagnosticKind {
    /// Logging method name uses the reserved `__` prefix.
    InvalidMethodName,
    /// Message constant is empty or all whitespace.
    InvalidMessage,
    /// Parameter name uses the reserved `__` prefix.
    InvalidParameterName,
    /// Enclosing type is nested inside another type.
    NestedType,
    /// A required well-known type could not be resolved.
    MissingRequiredType,
    /// Event id already used by another method in the same type.
    EventIdReuse,
    /// Logging method does not return void.
    InvalidReturnType,
    /// First parameter is not convertible to the logger type.
    FirstArgMustBeLogger,
    /// Logging method lacks the `static` modifier.
    NotStaticMethod,
    /// Logging method lacks the `partial` modifier.
    NotPartialMethod,
    /// Logging method declares type parameters.
    MethodIsGeneric,
}

impl DiagnosticKind {
    /// Returns the stable code for this kind (e.g. `LM001`).
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::InvalidMethodName => "LM001",
            Self::InvalidMessage => "LM002",
            Self::InvalidParameterName => "LM003",
            Self::NestedType => "LM004",
            Self::MissingRequiredType => "LM005",
            Self::EventIdReuse => "LM006",
            Self::InvalidReturnType => "LM007",
            Self::FirstArgMustBeLogger => "LM008",
            Self::NotStaticMethod => "LM009",
            Self::NotPartialMethod => "LM010",
            Self::MethodIsGeneric => "LM011",
        }
    }

    /// Returns the kebab-case name of this kind.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::InvalidMethodName => "invalid-method-name",
            Self::InvalidMessage => "invalid-message",
            Self::InvalidParameterName => "invalid-parameter-name",
            Self::NestedType => "nested-type",
            Self::MissingRequiredType => "missing-required-type",
            Self::EventIdReuse => "event-id-reuse",
            Self::InvalidReturnType => "invalid-return-type",
            Self::FirstArgMustBeLogger => "first-arg-must-be-logger",
            Self::NotStaticMethod => "not-static-method",
            Self::NotPartialMethod => "not-partial-method",
            Self::MethodIsGeneric => "method-is-generic",
        }
    }

    /// Returns the message template, with `{0}`-style positional holes.
    #[must_use]
    pub fn message_template(self) -> &'static str {
        match self {
            Self::InvalidMethodName => "Logging method names cannot start with __",
            Self::InvalidMessage => "Logging method '{0}' has an empty or whitespace-only message",
            Self::InvalidParameterName => "Logging method parameter names cannot start with __",
            Self::NestedType => "Logging methods cannot be declared in a nested type",
            Self::MissingRequiredType => "Could not find a required type definition: '{0}'",
            Self::EventIdReuse => "Multiple logging methods are using event id {0}",
            Self::InvalidReturnType => "Logging methods must return void",
            Self::FirstArgMustBeLogger => {
                "The first argument of a logging method must be the logger to write to"
            }
            Self::NotStaticMethod => "Logging methods must be static",
            Self::NotPartialMethod => "Logging methods must be partial",
            Self::MethodIsGeneric => "Logging methods cannot be generic",
        }
    }

    /// Returns the severity this kind is reported with by default.
    #[must_use]
    pub fn default_severity(self) -> Severity {
        Severity::Error
    }
}

impl std::fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A condition reported during an extraction pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Which condition was detected.
    pub kind: DiagnosticKind,
    /// Severity of this occurrence.
    pub severity: Severity,
    /// Primary location, absent only for missing-required-type.
    pub location: Option<SourceLocation>,
    /// Human-readable message with arguments interpolated.
    pub message: String,
}

impl Diagnostic {
    /// Creates a new diagnostic with the kind's default severity and
    /// its message template expanded with `args`.
    #[must_use]
    pub fn new(kind: DiagnosticKind, location: Option<SourceLocation>, args: &[&str]) -> Self {
        Self {
            kind,
            severity: kind.default_severity(),
            location,
            message: expand(kind.message_template(), args),
        }
    }

    /// Returns the stable code of the underlying kind.
    #[must_use]
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(location) = &self.location {
            write!(
                f,
                "{}:{}:{}: ",
                location.file.display(),
                location.line,
                location.column
            )?;
        }
        write!(f, "{} [{}] {}", self.severity, self.code(), self.message)
    }
}

/// Expands `{0}`-style positional holes in a message template.
fn expand(template: &str, args: &[&str]) -> String {
    let mut message = template.to_string();
    for (index, arg) in args.iter().enumerate() {
        message = message.replace(&format!("{{{index}}}"), arg);
    }
    message
}

/// Receives diagnostics as they are detected.
///
/// Reporting is fire-and-forget: implementations must not fail and the
/// pipeline never inspects previously reported diagnostics.
pub trait DiagnosticSink {
    /// Accepts one reported diagnostic.
    fn report(&mut self, diagnostic: Diagnostic);
}

/// A [`DiagnosticSink`] that accumulates everything it receives.
#[derive(Debug, Default)]
pub struct CollectedDiagnostics {
    diagnostics: Vec<Diagnostic>,
}

impl CollectedDiagnostics {
    /// Creates a new empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all collected diagnostics in reporting order.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Returns true if any collected diagnostic is an error.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    /// Returns the number of collected diagnostics.
    #[must_use]
    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    /// Returns true if nothing was reported.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Counts collected diagnostics of the given kind.
    #[must_use]
    pub fn count_of(&self, kind: DiagnosticKind) -> usize {
        self.diagnostics.iter().filter(|d| d.kind == kind).count()
    }

    /// Counts diagnostics by severity as (errors, warnings, infos).
    #[must_use]
    pub fn count_by_severity(&self) -> (usize, usize, usize) {
        let mut counts = (0, 0, 0);
        for diagnostic in &self.diagnostics {
            match diagnostic.severity {
                Severity::Error => counts.0 += 1,
                Severity::Warning => counts.1 += 1,
                Severity::Info => counts.2 += 1,
            }
        }
        counts
    }
}

impl DiagnosticSink for CollectedDiagnostics {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }
}

/// Emission helper that builds diagnostics and applies configured
/// severity overrides before forwarding them to the sink.
pub struct Reporter<'a> {
    sink: &'a mut dyn DiagnosticSink,
    config: &'a Config,
}

impl<'a> Reporter<'a> {
    /// Creates a reporter over `sink` using `config` for overrides.
    pub fn new(sink: &'a mut dyn DiagnosticSink, config: &'a Config) -> Self {
        Self { sink, config }
    }

    /// Builds and reports one diagnostic.
    pub fn report(
        &mut self,
        kind: DiagnosticKind,
        location: Option<SourceLocation>,
        args: &[&str],
    ) {
        let mut diagnostic = Diagnostic::new(kind, location, args);
        if let Some(severity) = self.config.severity_override(kind.name()) {
            diagnostic.severity = severity;
        }
        self.sink.report(diagnostic);
    }
}

/// Converts a [`Diagnostic`] to a miette diagnostic for rich display.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
#[error("{message}")]
pub struct RenderedDiagnostic {
    message: String,
    #[label("{label}")]
    span: SourceSpan,
    label: String,
}

impl From<&Diagnostic> for RenderedDiagnostic {
    fn from(diagnostic: &Diagnostic) -> Self {
        let (offset, length) = diagnostic
            .location
            .as_ref()
            .map_or((0, 0), |location| (location.offset, location.length));
        Self {
            message: format!("[{}] {}", diagnostic.code(), diagnostic.message),
            span: SourceSpan::from((offset, length)),
            label: diagnostic.kind.name().to_string(),
        }
    }
}
