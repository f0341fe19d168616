//! Directive discovery and argument extraction.

use tracing::debug;

use crate::diagnostics::SourceLocation;
use crate::semantic::{ConstantValue, SemanticHost, WellKnownTypes};
use crate::syntax::{ConstExpr, DirectiveNode};

/// Constant arguments carried by one logging directive occurrence.
#[derive(Debug, Clone)]
pub struct DirectiveArgs {
    /// String-rendered event id (argument 0).
    pub event_id: String,
    /// Severity level (argument 1).
    pub level: i64,
    /// Message template (argument 2).
    pub message: String,
    /// Event name (argument 3); empty when not supplied.
    pub event_name: String,
    /// Location of the event id argument.
    pub id_location: SourceLocation,
}

/// True when `directive` is defined by the well-known logging
/// directive type.
///
/// Matching is by the defining type's identity, never by the written
/// path: an unrelated directive that happens to share the name must
/// not match.
pub fn is_logging_directive<H: SemanticHost + ?Sized>(
    host: &H,
    directive: &DirectiveNode,
    well_known: &WellKnownTypes,
) -> bool {
    host.resolve_directive_owner(directive).as_ref() == Some(&well_known.directive)
}

/// Extracts the positional constant arguments of one directive
/// occurrence.
///
/// Returns `None` when a required constant is missing or cannot be
/// evaluated; such an occurrence is skipped (the host will already
/// have reported the malformed argument itself).
pub fn extract_args<H: SemanticHost + ?Sized>(
    host: &H,
    directive: &DirectiveNode,
) -> Option<DirectiveArgs> {
    let args = try_extract(host, directive);
    if args.is_none() {
        debug!(
            directive = %directive.path,
            "skipping directive occurrence without resolvable constant arguments"
        );
    }
    args
}

fn try_extract<H: SemanticHost + ?Sized>(
    host: &H,
    directive: &DirectiveNode,
) -> Option<DirectiveArgs> {
    if directive.args.len() < 3 {
        return None;
    }

    let event_id = render_constant(host, &directive.args[0])?;
    let level = host.resolve_constant(&directive.args[1])?.as_int()?;
    let message = render_constant(host, &directive.args[2])?;
    let event_name = if directive.args.len() > 3 {
        render_constant(host, &directive.args[3])?
    } else {
        String::new()
    };

    Some(DirectiveArgs {
        event_id,
        level,
        message,
        event_name,
        id_location: directive.args[0].location.clone(),
    })
}

fn render_constant<H: SemanticHost + ?Sized>(host: &H, expr: &ConstExpr) -> Option<String> {
    host.resolve_constant(expr).map(|value| value.render())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::diagnostics::{CollectedDiagnostics, Reporter};
    use crate::host::MemoryHost;
    use crate::semantic::WellKnownTypeNames;

    fn host() -> MemoryHost {
        MemoryHost::new()
            .with_type("Logging.LogMessage")
            .with_type("Core.Exception")
            .with_type("Logging.Logger")
            .with_directive("log_message", "Logging.LogMessage")
            .with_constant("Level::Warn", ConstantValue::Int(3))
    }

    fn well_known(host: &MemoryHost) -> WellKnownTypes {
        let names =
            WellKnownTypeNames::new("Logging.LogMessage", "Core.Exception", "Logging.Logger");
        let config = Config::default();
        let mut collected = CollectedDiagnostics::new();
        let mut reporter = Reporter::new(&mut collected, &config);
        WellKnownTypes::resolve(host, &names, &mut reporter).expect("well-known types registered")
    }

    fn loc() -> SourceLocation {
        SourceLocation::default()
    }

    #[test]
    fn directive_matching_is_by_owner_identity() {
        let host = host().with_directive("unrelated", "Other.Directive");
        let well_known = well_known(&host);

        let matching = DirectiveNode::new("log_message", loc());
        let unrelated = DirectiveNode::new("unrelated", loc());
        let unknown = DirectiveNode::new("nowhere", loc());

        assert!(is_logging_directive(&host, &matching, &well_known));
        assert!(!is_logging_directive(&host, &unrelated, &well_known));
        assert!(!is_logging_directive(&host, &unknown, &well_known));
    }

    #[test]
    fn extracts_required_arguments() {
        let host = host();
        let directive = DirectiveNode::new("log_message", loc())
            .with_arg(ConstExpr::new("7", loc()))
            .with_arg(ConstExpr::new("Level::Warn", loc()))
            .with_arg(ConstExpr::new("\"disk {Name} full\"", loc()));

        let args = extract_args(&host, &directive).expect("directive extracts");
        assert_eq!(args.event_id, "7");
        assert_eq!(args.level, 3);
        assert_eq!(args.message, "disk {Name} full");
        assert_eq!(args.event_name, "");
    }

    #[test]
    fn fourth_argument_becomes_event_name() {
        let host = host();
        let directive = DirectiveNode::new("log_message", loc())
            .with_arg(ConstExpr::new("7", loc()))
            .with_arg(ConstExpr::new("2", loc()))
            .with_arg(ConstExpr::new("\"msg\"", loc()))
            .with_arg(ConstExpr::new("\"DiskFull\"", loc()));

        let args = extract_args(&host, &directive).expect("directive extracts");
        assert_eq!(args.event_name, "DiskFull");
    }

    #[test]
    fn too_few_arguments_are_skipped() {
        let host = host();
        let directive = DirectiveNode::new("log_message", loc())
            .with_arg(ConstExpr::new("7", loc()))
            .with_arg(ConstExpr::new("2", loc()));

        assert!(extract_args(&host, &directive).is_none());
    }

    #[test]
    fn non_constant_arguments_are_skipped() {
        let host = host();
        let directive = DirectiveNode::new("log_message", loc())
            .with_arg(ConstExpr::new("some_runtime_value", loc()))
            .with_arg(ConstExpr::new("2", loc()))
            .with_arg(ConstExpr::new("\"msg\"", loc()));

        assert!(extract_args(&host, &directive).is_none());
    }

    #[test]
    fn non_integer_level_is_skipped() {
        let host = host();
        let directive = DirectiveNode::new("log_message", loc())
            .with_arg(ConstExpr::new("7", loc()))
            .with_arg(ConstExpr::new("\"high\"", loc()))
            .with_arg(ConstExpr::new("\"msg\"", loc()));

        assert!(extract_args(&host, &directive).is_none());
    }

    #[test]
    fn integer_event_id_renders_as_string() {
        let host = host();
        let directive = DirectiveNode::new("log_message", loc())
            .with_arg(ConstExpr::new("1024", loc()))
            .with_arg(ConstExpr::new("2", loc()))
            .with_arg(ConstExpr::new("\"msg\"", loc()));

        let args = extract_args(&host, &directive).expect("directive extracts");
        assert_eq!(args.event_id, "1024");
    }
}
