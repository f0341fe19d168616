//! # logmodel-core
//!
//! Scan-validate-build pipeline that turns host-supplied declaration
//! syntax into a validated model of logging declarations, ready for a
//! downstream code emitter.
//!
//! The crate consumes three things from its host: declaration syntax
//! (the [`TypeDecl`] input model), semantic resolution (the
//! [`SemanticHost`] capability), and a diagnostic sink
//! ([`DiagnosticSink`]). It produces an ordered sequence of
//! [`LoggerClass`] entries, one per type with at least one valid
//! logging method.
//!
//! ```ignore
//! use logmodel_core::{CollectedDiagnostics, Extractor, WellKnownTypeNames};
//!
//! let names = WellKnownTypeNames::new(
//!     "Logging.LogMessage",
//!     "Core.Exception",
//!     "Logging.Logger",
//! );
//! let mut diagnostics = CollectedDiagnostics::new();
//! let classes = Extractor::new(&host, names).extract(&types, &mut diagnostics);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod diagnostics;
mod host;
mod model;
mod pipeline;
mod scanner;
mod semantic;
mod syntax;
mod template;
mod validate;

pub use config::{Config, ConfigError, DiagnosticConfig};
pub use diagnostics::{
    CollectedDiagnostics, Diagnostic, DiagnosticKind, DiagnosticSink, RenderedDiagnostic,
    Reporter, Severity, SourceLocation,
};
pub use host::MemoryHost;
pub use model::{LoggerClass, LoggerMethod, LoggerParameter};
pub use pipeline::{CancellationToken, Extractor};
pub use scanner::{extract_args, is_logging_directive, DirectiveArgs};
pub use semantic::{
    is_base_or_identity, ConstantValue, Conversion, ResolvedType, SemanticHost, TypeIdentity,
    WellKnownTypeNames, WellKnownTypes,
};
pub use syntax::{ConstExpr, DirectiveNode, Enclosing, MethodDecl, ParamDecl, TypeDecl, TypeRef};
pub use template::has_templates;
pub use validate::{check_method, Validated};
