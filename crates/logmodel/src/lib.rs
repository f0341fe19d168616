//! # logmodel
//!
//! Facade crate for validated logging-declaration model extraction.
//!
//! Re-exports everything from [`logmodel_core`] and adds a one-call
//! entry point for hosts that want collected diagnostics rather than
//! a custom sink.
//!
//! ```ignore
//! use logmodel::{extract_model, WellKnownTypeNames};
//!
//! let names = WellKnownTypeNames::new(
//!     "Logging.LogMessage",
//!     "Core.Exception",
//!     "Logging.Logger",
//! );
//! let (classes, diagnostics) = extract_model(&host, names, &types);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub use logmodel_core::*;

/// Runs one extraction pass with default configuration and no
/// cancellation, collecting every reported diagnostic.
#[must_use]
pub fn extract_model<H: SemanticHost + ?Sized>(
    host: &H,
    names: WellKnownTypeNames,
    types: &[TypeDecl],
) -> (Vec<LoggerClass>, CollectedDiagnostics) {
    let mut diagnostics = CollectedDiagnostics::new();
    let classes = Extractor::new(host, names).extract(types, &mut diagnostics);
    (classes, diagnostics)
}
