//! Method-level rule evaluation.
//!
//! Each candidate method is checked against the full rule set. Checks
//! are independent: every applicable diagnostic is reported, and a
//! single keep verdict is computed from the gating checks alone, so
//! one failure never hides another.

use std::collections::HashSet;

use crate::diagnostics::{DiagnosticKind, Reporter};
use crate::model::{LoggerMethod, LoggerParameter};
use crate::scanner::DirectiveArgs;
use crate::semantic::{is_base_or_identity, SemanticHost, WellKnownTypes};
use crate::syntax::{DirectiveNode, MethodDecl};
use crate::template;

/// Generated symbols start with this prefix, so declared names must
/// stay out of that namespace.
const RESERVED_PREFIX: &str = "__";

/// Outcome of validating one candidate method.
#[derive(Debug)]
pub struct Validated {
    /// The fully built method model, populated even when discarded.
    pub method: LoggerMethod,
    /// True only if every gating check passed.
    pub keep: bool,
}

/// Applies the method-level rule set to one candidate declaration.
///
/// `seen_ids` tracks event ids within the enclosing type; the caller
/// resets it when moving to the next type. Ids are recorded on first
/// sight regardless of the eventual verdict, so a discarded method
/// still claims its id.
pub fn check_method<H: SemanticHost + ?Sized>(
    host: &H,
    well_known: &WellKnownTypes,
    method: &MethodDecl,
    directive: &DirectiveNode,
    args: &DirectiveArgs,
    seen_ids: &mut HashSet<String>,
    reporter: &mut Reporter<'_>,
) -> Validated {
    let mut built = LoggerMethod {
        name: method.name.clone(),
        modifiers: method.modifiers.clone(),
        logger_type: String::new(),
        level: args.level,
        event_id: args.event_id.clone(),
        event_name: args.event_name.clone(),
        message: args.message.clone(),
        message_has_templates: template::has_templates(&args.message),
        parameters: Vec::new(),
    };

    let mut keep = true;

    if built.name.starts_with(RESERVED_PREFIX) {
        reporter.report(
            DiagnosticKind::InvalidMethodName,
            Some(method.name_location.clone()),
            &[],
        );
    }

    let returns_void = host
        .resolve_type_ref(&method.return_type)
        .is_some_and(|resolved| resolved.is_void);
    if !returns_void {
        reporter.report(
            DiagnosticKind::InvalidReturnType,
            Some(method.return_type.location.clone()),
            &[],
        );
        keep = false;
    }

    if method.type_param_count > 0 {
        reporter.report(
            DiagnosticKind::MethodIsGeneric,
            Some(method.name_location.clone()),
            &[],
        );
        keep = false;
    }

    let mut is_static = false;
    let mut is_partial = false;
    for modifier in method.modifiers.split_whitespace() {
        match modifier {
            "static" => is_static = true,
            "partial" => is_partial = true,
            _ => {}
        }
    }
    if !is_static {
        reporter.report(
            DiagnosticKind::NotStaticMethod,
            Some(method.location.clone()),
            &[],
        );
        keep = false;
    }
    if !is_partial {
        reporter.report(
            DiagnosticKind::NotPartialMethod,
            Some(method.location.clone()),
            &[],
        );
        keep = false;
    }

    if seen_ids.contains(&built.event_id) {
        reporter.report(
            DiagnosticKind::EventIdReuse,
            Some(args.id_location.clone()),
            &[&built.event_id],
        );
    } else {
        seen_ids.insert(built.event_id.clone());
    }

    if built.message.trim().is_empty() {
        reporter.report(
            DiagnosticKind::InvalidMessage,
            Some(directive.location.clone()),
            &[&method.name],
        );
    }

    for (index, param) in method.params.iter().enumerate() {
        let resolved = host.resolve_type_ref(&param.type_ref);
        let display = resolved
            .as_ref()
            .map_or_else(|| param.type_ref.name.clone(), |r| r.display.clone());

        if index == 0 {
            // the logger itself; it never becomes a model parameter
            let convertible = resolved
                .as_ref()
                .is_some_and(|r| is_base_or_identity(host, &r.identity, &well_known.logger));
            if !convertible {
                reporter.report(
                    DiagnosticKind::FirstArgMustBeLogger,
                    Some(param.location.clone()),
                    &[],
                );
                keep = false;
            }
            built.logger_type = display;
            continue;
        }

        let is_exception_type = resolved
            .as_ref()
            .is_some_and(|r| is_base_or_identity(host, &r.identity, &well_known.exception_base));
        built.parameters.push(LoggerParameter {
            name: param.name.clone(),
            ty: display,
            is_exception_type,
        });

        if param.name.starts_with(RESERVED_PREFIX) {
            reporter.report(
                DiagnosticKind::InvalidParameterName,
                Some(param.location.clone()),
                &[],
            );
        }
    }

    Validated {
        method: built,
        keep,
    }
}
