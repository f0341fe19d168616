//! Pipeline driver: scan → validate → build.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, info};

use crate::config::Config;
use crate::diagnostics::{DiagnosticKind, DiagnosticSink, Reporter};
use crate::model::LoggerClass;
use crate::scanner;
use crate::semantic::{SemanticHost, WellKnownTypeNames, WellKnownTypes};
use crate::syntax::{Enclosing, TypeDecl};
use crate::validate;

/// Cooperative cancellation signal, observed between top-level types.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Creates a token in the not-cancelled state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation; the pass returns its partial result at
    /// the next check.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// True once cancellation has been requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

/// Drives one extraction pass over a set of declared types.
///
/// The pass is strictly sequential: the per-type event-id set and the
/// diagnostic sink are owned by the running call alone, and nothing
/// escapes before the result is handed over.
pub struct Extractor<'h, H: ?Sized> {
    host: &'h H,
    names: WellKnownTypeNames,
    config: Config,
    cancellation: CancellationToken,
}

impl<'h, H: SemanticHost + ?Sized> Extractor<'h, H> {
    /// Creates an extractor over `host` with default configuration and
    /// no cancellation.
    pub fn new(host: &'h H, names: WellKnownTypeNames) -> Self {
        Self {
            host,
            names,
            config: Config::default(),
            cancellation: CancellationToken::new(),
        }
    }

    /// Replaces the configuration.
    #[must_use]
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Installs a cancellation token.
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    /// Runs one pass and returns the ordered logging classes.
    ///
    /// Every detectable condition goes through `sink` as a diagnostic;
    /// there is no error return. An unresolvable well-known type
    /// aborts before scanning with an empty result, and cancellation
    /// returns the classes completed so far — never a partial class.
    #[must_use]
    pub fn extract(&self, types: &[TypeDecl], sink: &mut dyn DiagnosticSink) -> Vec<LoggerClass> {
        let mut reporter = Reporter::new(sink, &self.config);
        let mut results = Vec::new();

        let Some(well_known) = WellKnownTypes::resolve(self.host, &self.names, &mut reporter)
        else {
            return results;
        };

        info!("scanning {} type declaration(s)", types.len());

        let mut seen_ids = HashSet::new();
        for decl in types {
            if self.cancellation.is_cancelled() {
                info!("cancellation requested, returning partial result");
                return results;
            }

            seen_ids.clear();
            let mut class: Option<LoggerClass> = None;

            for method in &decl.methods {
                for directive in &method.directives {
                    if !scanner::is_logging_directive(self.host, directive, &well_known) {
                        continue;
                    }
                    let Some(args) = scanner::extract_args(self.host, directive) else {
                        continue;
                    };

                    let validated = validate::check_method(
                        self.host,
                        &well_known,
                        method,
                        directive,
                        &args,
                        &mut seen_ids,
                        &mut reporter,
                    );
                    if !validated.keep {
                        continue;
                    }

                    if class.is_none() {
                        if let Enclosing::Type(_) = decl.enclosing {
                            // generated code has nowhere to live
                            reporter.report(
                                DiagnosticKind::NestedType,
                                Some(decl.name_location.clone()),
                                &[],
                            );
                            continue;
                        }
                        class = Some(new_class(decl));
                    }
                    if let Some(class) = class.as_mut() {
                        class.methods.push(validated.method);
                    }
                }
            }

            if let Some(class) = class {
                debug!(
                    name = %class.name,
                    methods = class.methods.len(),
                    "collected logging class"
                );
                results.push(class);
            }
        }

        info!("extraction complete: {} logging class(es)", results.len());
        results
    }
}

/// Starts the lazily created class for a type's first kept method.
fn new_class(decl: &TypeDecl) -> LoggerClass {
    let namespace = match &decl.enclosing {
        Enclosing::Scope(path) => Some(path.clone()),
        Enclosing::FileScope | Enclosing::Type(_) => None,
    };
    let mut name = decl.name.clone();
    name.push_str(&decl.type_params);
    LoggerClass {
        namespace,
        name,
        constraints: decl.constraints.clone(),
        methods: Vec::new(),
    }
}
