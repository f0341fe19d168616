//! End-to-end extraction tests over the in-memory host.

use std::cell::Cell;

use logmodel::{
    extract_model, CancellationToken, CollectedDiagnostics, Config, ConstExpr, ConstantValue,
    Conversion, DiagnosticKind, DirectiveNode, Enclosing, Extractor, MemoryHost, MethodDecl,
    ParamDecl, ResolvedType, SemanticHost, Severity, SourceLocation, TypeDecl, TypeIdentity,
    TypeRef, WellKnownTypeNames,
};

const DIRECTIVE_TYPE: &str = "Logging.LogMessage";
const LOGGER_TYPE: &str = "Logging.Logger";
const EXCEPTION_TYPE: &str = "Core.Exception";

fn host() -> MemoryHost {
    MemoryHost::new()
        .with_type(DIRECTIVE_TYPE)
        .with_type(LOGGER_TYPE)
        .with_type(EXCEPTION_TYPE)
        .with_void_type("void")
        .with_type("string")
        .with_type("Core.TimeoutError")
        .with_conversion("Core.TimeoutError", EXCEPTION_TYPE)
        .with_directive("log_message", DIRECTIVE_TYPE)
}

fn names() -> WellKnownTypeNames {
    WellKnownTypeNames::new(DIRECTIVE_TYPE, EXCEPTION_TYPE, LOGGER_TYPE)
}

fn loc(line: usize) -> SourceLocation {
    SourceLocation::new("app.host", line, 1)
}

fn directive(event_id: &str, message: &str) -> DirectiveNode {
    DirectiveNode::new("log_message", loc(1))
        .with_arg(ConstExpr::new(event_id, loc(1)))
        .with_arg(ConstExpr::new("2", loc(1)))
        .with_arg(ConstExpr::new(format!("\"{message}\""), loc(1)))
}

fn log_method(name: &str, event_id: &str, message: &str) -> MethodDecl {
    MethodDecl::new(name, TypeRef::new("void", loc(2)))
        .with_modifiers("public static partial")
        .with_param(ParamDecl::new(
            "logger",
            TypeRef::new(LOGGER_TYPE, loc(2)),
            loc(2),
        ))
        .with_directive(directive(event_id, message))
}

#[test]
fn extracts_a_single_logging_class() {
    let host = host();
    let types = vec![TypeDecl::new("Log").with_method(log_method(
        "connection_opened",
        "1",
        "opened {Endpoint}",
    ))];

    let (classes, diagnostics) = extract_model(&host, names(), &types);

    assert!(diagnostics.is_empty());
    assert_eq!(classes.len(), 1);

    let class = &classes[0];
    assert_eq!(class.name, "Log");
    assert_eq!(class.namespace, None);
    assert_eq!(class.constraints, "");
    assert_eq!(class.methods.len(), 1);

    let method = &class.methods[0];
    assert_eq!(method.name, "connection_opened");
    assert_eq!(method.modifiers, "public static partial");
    assert_eq!(method.logger_type, LOGGER_TYPE);
    assert_eq!(method.level, 2);
    assert_eq!(method.event_id, "1");
    assert_eq!(method.event_name, "");
    assert_eq!(method.message, "opened {Endpoint}");
    assert!(method.message_has_templates);
    assert!(method.parameters.is_empty());
}

#[test]
fn renders_namespace_generic_suffix_and_constraints() {
    let host = host();
    let types = vec![TypeDecl::new("Loggers")
        .with_type_params("<T>")
        .with_constraints("where T: Core.Entity")
        .with_enclosing(Enclosing::Scope("App.Telemetry".to_string()))
        .with_method(log_method("opened", "1", "opened"))];

    let (classes, diagnostics) = extract_model(&host, names(), &types);

    assert!(diagnostics.is_empty());
    assert_eq!(classes[0].name, "Loggers<T>");
    assert_eq!(classes[0].namespace.as_deref(), Some("App.Telemetry"));
    assert_eq!(classes[0].constraints, "where T: Core.Entity");
}

#[test]
fn event_ids_are_scoped_to_the_enclosing_type() {
    let host = host();
    let types = vec![
        TypeDecl::new("First").with_method(log_method("opened", "1", "opened")),
        TypeDecl::new("Second").with_method(log_method("closed", "1", "closed")),
    ];

    let (classes, diagnostics) = extract_model(&host, names(), &types);

    assert!(diagnostics.is_empty());
    assert_eq!(classes.len(), 2);
}

#[test]
fn event_id_reuse_in_one_type_is_diagnosed_once_and_keeps_both() {
    let host = host();
    let types = vec![TypeDecl::new("Log")
        .with_method(log_method("opened", "1", "opened"))
        .with_method(log_method("closed", "1", "closed"))];

    let (classes, diagnostics) = extract_model(&host, names(), &types);

    assert_eq!(diagnostics.count_of(DiagnosticKind::EventIdReuse), 1);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(classes[0].methods.len(), 2);
}

#[test]
fn gating_failures_accumulate_and_discard_while_advisory_keeps() {
    let host = host();
    // non-static and non-void: two diagnostics, no model entry
    let doubly_bad = MethodDecl::new("opened", TypeRef::new("string", loc(3)))
        .with_modifiers("public partial")
        .with_param(ParamDecl::new(
            "logger",
            TypeRef::new(LOGGER_TYPE, loc(3)),
            loc(3),
        ))
        .with_directive(directive("1", "opened"));
    // reserved name only: advisory, still kept
    let merely_reserved = log_method("__closed", "2", "closed");

    let types = vec![TypeDecl::new("Log")
        .with_method(doubly_bad)
        .with_method(merely_reserved)];

    let (classes, diagnostics) = extract_model(&host, names(), &types);

    assert_eq!(diagnostics.count_of(DiagnosticKind::NotStaticMethod), 1);
    assert_eq!(diagnostics.count_of(DiagnosticKind::InvalidReturnType), 1);
    assert_eq!(diagnostics.count_of(DiagnosticKind::InvalidMethodName), 1);
    assert_eq!(diagnostics.len(), 3);

    assert_eq!(classes.len(), 1);
    assert_eq!(classes[0].methods.len(), 1);
    assert_eq!(classes[0].methods[0].name, "__closed");
}

#[test]
fn types_without_kept_methods_produce_no_class() {
    let host = host();
    let discarded = MethodDecl::new("opened", TypeRef::new("string", loc(3)))
        .with_modifiers("static partial")
        .with_param(ParamDecl::new(
            "logger",
            TypeRef::new(LOGGER_TYPE, loc(3)),
            loc(3),
        ))
        .with_directive(directive("1", "opened"));

    let types = vec![
        TypeDecl::new("AllDiscarded").with_method(discarded.clone()),
        TypeDecl::new("OneKept")
            .with_method(discarded)
            .with_method(log_method("closed", "2", "closed")),
    ];

    let (classes, diagnostics) = extract_model(&host, names(), &types);

    assert_eq!(classes.len(), 1);
    assert_eq!(classes[0].name, "OneKept");
    assert_eq!(classes[0].methods.len(), 1);
    assert_eq!(diagnostics.count_of(DiagnosticKind::InvalidReturnType), 2);
}

#[test]
fn first_parameter_stays_out_of_the_parameter_list() {
    let host = host();
    let method = log_method("failed", "1", "failed: {Reason}")
        .with_param(ParamDecl::new(
            "reason",
            TypeRef::new("string", loc(4)),
            loc(4),
        ))
        .with_param(ParamDecl::new(
            "cause",
            TypeRef::new("Core.TimeoutError", loc(4)),
            loc(4),
        ));
    let types = vec![TypeDecl::new("Log").with_method(method)];

    let (classes, diagnostics) = extract_model(&host, names(), &types);

    assert!(diagnostics.is_empty());
    let method = &classes[0].methods[0];
    assert_eq!(method.logger_type, LOGGER_TYPE);
    assert_eq!(method.parameters.len(), 2);
    assert_eq!(method.parameters[0].name, "reason");
    assert!(!method.parameters[0].is_exception_type);
    assert_eq!(method.parameters[1].name, "cause");
    assert!(method.parameters[1].is_exception_type);
}

#[test]
fn missing_exception_type_aborts_before_scanning() {
    let host = MemoryHost::new()
        .with_type(DIRECTIVE_TYPE)
        .with_type(LOGGER_TYPE)
        .with_void_type("void")
        .with_directive("log_message", DIRECTIVE_TYPE);
    // would otherwise produce diagnostics of its own
    let invalid = MethodDecl::new("__opened", TypeRef::new("void", loc(2)))
        .with_directive(directive("1", ""));
    let types = vec![TypeDecl::new("Log").with_method(invalid)];

    let (classes, diagnostics) = extract_model(&host, names(), &types);

    assert!(classes.is_empty());
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics.count_of(DiagnosticKind::MissingRequiredType), 1);
    assert!(diagnostics.diagnostics()[0].message.contains(EXCEPTION_TYPE));
    assert!(diagnostics.diagnostics()[0].location.is_none());
}

#[test]
fn every_missing_required_type_is_reported() {
    let host = MemoryHost::new();
    let (classes, diagnostics) = extract_model(&host, names(), &[]);

    assert!(classes.is_empty());
    assert_eq!(diagnostics.count_of(DiagnosticKind::MissingRequiredType), 3);
}

/// Delegating host that requests cancellation after a fixed number of
/// type-reference resolutions.
struct CancelAfter<'a> {
    inner: &'a MemoryHost,
    token: CancellationToken,
    remaining: Cell<usize>,
}

impl SemanticHost for CancelAfter<'_> {
    fn resolve_type(&self, fully_qualified: &str) -> Option<TypeIdentity> {
        self.inner.resolve_type(fully_qualified)
    }

    fn resolve_type_ref(&self, type_ref: &TypeRef) -> Option<ResolvedType> {
        let left = self.remaining.get();
        if left <= 1 {
            self.token.cancel();
        } else {
            self.remaining.set(left - 1);
        }
        self.inner.resolve_type_ref(type_ref)
    }

    fn classify_conversion(&self, source: &TypeIdentity, dest: &TypeIdentity) -> Conversion {
        self.inner.classify_conversion(source, dest)
    }

    fn resolve_constant(&self, expr: &ConstExpr) -> Option<ConstantValue> {
        self.inner.resolve_constant(expr)
    }

    fn resolve_directive_owner(&self, directive: &DirectiveNode) -> Option<TypeIdentity> {
        self.inner.resolve_directive_owner(directive)
    }
}

#[test]
fn cancellation_returns_only_completed_classes() {
    let inner = host();
    let token = CancellationToken::new();
    // each kept method resolves two type references (return + logger),
    // so the signal lands while type 1 is being processed
    let cancelling = CancelAfter {
        inner: &inner,
        token: token.clone(),
        remaining: Cell::new(2),
    };

    let types = vec![
        TypeDecl::new("First").with_method(log_method("opened", "1", "opened")),
        TypeDecl::new("Second").with_method(log_method("closed", "1", "closed")),
        TypeDecl::new("Third").with_method(log_method("failed", "1", "failed")),
    ];

    let mut diagnostics = CollectedDiagnostics::new();
    let classes = Extractor::new(&cancelling, names())
        .with_cancellation(token)
        .extract(&types, &mut diagnostics);

    assert_eq!(classes.len(), 1);
    assert_eq!(classes[0].name, "First");
    assert_eq!(classes[0].methods.len(), 1);
    assert!(diagnostics.is_empty());
}

#[test]
fn multiple_directive_occurrences_each_produce_a_method() {
    let host = host();
    let method = log_method("opened", "1", "opened").with_directive(directive("2", "reopened"));
    let types = vec![TypeDecl::new("Log").with_method(method)];

    let (classes, diagnostics) = extract_model(&host, names(), &types);

    assert!(diagnostics.is_empty());
    assert_eq!(classes[0].methods.len(), 2);
    assert_eq!(classes[0].methods[0].event_id, "1");
    assert_eq!(classes[0].methods[1].event_id, "2");
}

#[test]
fn nested_types_are_skipped_with_a_diagnostic_per_kept_candidate() {
    let host = host();
    let types = vec![TypeDecl::new("Inner")
        .with_enclosing(Enclosing::Type("Outer".to_string()))
        .with_method(log_method("opened", "1", "opened"))
        .with_method(log_method("closed", "2", "closed"))];

    let (classes, diagnostics) = extract_model(&host, names(), &types);

    assert!(classes.is_empty());
    assert_eq!(diagnostics.count_of(DiagnosticKind::NestedType), 2);
}

#[test]
fn fourth_directive_argument_becomes_the_event_name() {
    let host = host();
    let named = MethodDecl::new("opened", TypeRef::new("void", loc(2)))
        .with_modifiers("static partial")
        .with_param(ParamDecl::new(
            "logger",
            TypeRef::new(LOGGER_TYPE, loc(2)),
            loc(2),
        ))
        .with_directive(directive("1", "opened").with_arg(ConstExpr::new("\"Opened\"", loc(1))));
    let types = vec![TypeDecl::new("Log")
        .with_method(named)
        .with_method(log_method("closed", "2", "closed"))];

    let (classes, diagnostics) = extract_model(&host, names(), &types);

    assert!(diagnostics.is_empty());
    assert_eq!(classes[0].methods[0].event_name, "Opened");
    assert_eq!(classes[0].methods[1].event_name, "");
}

#[test]
fn blank_message_is_reported_but_kept() {
    let host = host();
    let types = vec![TypeDecl::new("Log").with_method(log_method("opened", "1", " "))];

    let (classes, diagnostics) = extract_model(&host, names(), &types);

    assert_eq!(diagnostics.count_of(DiagnosticKind::InvalidMessage), 1);
    assert_eq!(classes[0].methods.len(), 1);
    assert!(!classes[0].methods[0].message_has_templates);
}

#[test]
fn escaped_braces_do_not_count_as_templates() {
    let host = host();
    let types = vec![TypeDecl::new("Log")
        .with_method(log_method("literal", "1", "{{literal}}"))
        .with_method(log_method("templated", "2", "text {Id} more {{escaped}}"))];

    let (classes, diagnostics) = extract_model(&host, names(), &types);

    assert!(diagnostics.is_empty());
    assert!(!classes[0].methods[0].message_has_templates);
    assert!(classes[0].methods[1].message_has_templates);
}

#[test]
fn configured_severity_override_retags_reports() {
    let host = host();
    let config = Config::parse(
        r#"
[diagnostics.event-id-reuse]
severity = "warning"
"#,
    )
    .expect("config parses");

    let types = vec![TypeDecl::new("Log")
        .with_method(log_method("opened", "1", "opened"))
        .with_method(log_method("closed", "1", "closed"))];

    let mut diagnostics = CollectedDiagnostics::new();
    let classes = Extractor::new(&host, names())
        .with_config(config)
        .extract(&types, &mut diagnostics);

    assert_eq!(classes[0].methods.len(), 2);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics.diagnostics()[0].severity, Severity::Warning);
    assert!(!diagnostics.has_errors());
}
