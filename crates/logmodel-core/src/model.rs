//! The emitter-facing model of validated logging declarations.
//!
//! Built once per extraction pass and handed to the code emitter as a
//! read-only ordered collection. Entities are fully populated at
//! construction; the only later mutation is appending methods to
//! their owning class.

use serde::{Deserialize, Serialize};

/// One type containing at least one valid logging method.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggerClass {
    /// Enclosing scope path, absent for file-scope declarations.
    pub namespace: Option<String>,
    /// Type name, including any generic-parameter suffix as declared.
    pub name: String,
    /// Generic-constraint clause text, verbatim, or empty.
    pub constraints: String,
    /// Validated methods in declaration order; never empty.
    pub methods: Vec<LoggerMethod>,
}

/// One validated logging method.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggerMethod {
    /// Method name.
    pub name: String,
    /// Declared modifiers, verbatim.
    pub modifiers: String,
    /// Fully qualified type of the first (logger) parameter.
    pub logger_type: String,
    /// Severity level constant from the directive.
    pub level: i64,
    /// String-rendered event id; unique within the owning class.
    pub event_id: String,
    /// Optional event name; empty when the directive omits it.
    pub event_name: String,
    /// Message template constant; may be empty.
    pub message: String,
    /// True when the message contains format placeholders.
    pub message_has_templates: bool,
    /// Parameters after the logger parameter, in declaration order.
    pub parameters: Vec<LoggerParameter>,
}

/// One non-logger parameter of a logging method.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggerParameter {
    /// Parameter name.
    pub name: String,
    /// Fully qualified parameter type.
    #[serde(rename = "type")]
    pub ty: String,
    /// True when the type is assignable to the exception base type.
    pub is_exception_type: bool,
}
