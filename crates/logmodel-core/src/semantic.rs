//! Capability boundary to the host's type and constant resolution.
//!
//! The pipeline never inspects a type system directly. Whatever symbol
//! infrastructure the host has is adapted behind [`SemanticHost`];
//! directive matching, convertibility, and constant evaluation all go
//! through it.

use crate::diagnostics::{DiagnosticKind, Reporter};
use crate::syntax::{ConstExpr, DirectiveNode, TypeRef};

/// Opaque identity of a resolved type.
///
/// Two references denote the same type exactly when their identities
/// compare equal; name collisions across scopes must not.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeIdentity(String);

impl TypeIdentity {
    /// Creates an identity from the host's canonical key.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Returns the canonical key.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TypeIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A type reference resolved by the host.
#[derive(Debug, Clone)]
pub struct ResolvedType {
    /// Identity for convertibility and equality checks.
    pub identity: TypeIdentity,
    /// Fully qualified rendering, nullability-annotated where the
    /// host supports it.
    pub display: String,
    /// True when this is the host's absent-return-value type.
    pub is_void: bool,
}

/// Classification of a conversion between two resolved types.
#[derive(Debug, Clone, Copy, Default)]
pub struct Conversion {
    /// Source and destination are the same type.
    pub is_identity: bool,
    /// Source converts to destination by implicit reference conversion.
    pub is_implicit_reference: bool,
}

impl Conversion {
    /// True when the source is the destination or derives from it.
    #[must_use]
    pub fn is_base_or_identity(self) -> bool {
        self.is_identity || self.is_implicit_reference
    }
}

/// A compile-time constant resolved from a directive argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstantValue {
    /// Integer constant.
    Int(i64),
    /// String constant.
    Str(String),
    /// Boolean constant.
    Bool(bool),
}

impl ConstantValue {
    /// Renders the constant as the string form used in the model.
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Self::Int(value) => value.to_string(),
            Self::Str(value) => value.clone(),
            Self::Bool(value) => value.to_string(),
        }
    }

    /// Returns the integer value, if this is an integer constant.
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            Self::Str(_) | Self::Bool(_) => None,
        }
    }
}

/// Resolution and classification capabilities consumed from the host.
pub trait SemanticHost {
    /// Resolves a fully qualified name to a type identity.
    fn resolve_type(&self, fully_qualified: &str) -> Option<TypeIdentity>;

    /// Resolves a written type reference.
    fn resolve_type_ref(&self, type_ref: &TypeRef) -> Option<ResolvedType>;

    /// Classifies the conversion from `source` to `dest`.
    fn classify_conversion(&self, source: &TypeIdentity, dest: &TypeIdentity) -> Conversion;

    /// Evaluates a constant expression.
    fn resolve_constant(&self, expr: &ConstExpr) -> Option<ConstantValue>;

    /// Resolves the identity of the type that defines a directive.
    fn resolve_directive_owner(&self, directive: &DirectiveNode) -> Option<TypeIdentity>;
}

/// True when `source` is `dest` or implicitly reference-converts to it.
pub fn is_base_or_identity<H: SemanticHost + ?Sized>(
    host: &H,
    source: &TypeIdentity,
    dest: &TypeIdentity,
) -> bool {
    host.classify_conversion(source, dest).is_base_or_identity()
}

/// Names of the three type definitions the pass cannot run without.
#[derive(Debug, Clone)]
pub struct WellKnownTypeNames {
    /// The logging directive type.
    pub directive: String,
    /// The exception base type.
    pub exception_base: String,
    /// The logger capability type.
    pub logger: String,
}

impl WellKnownTypeNames {
    /// Creates the name set.
    #[must_use]
    pub fn new(
        directive: impl Into<String>,
        exception_base: impl Into<String>,
        logger: impl Into<String>,
    ) -> Self {
        Self {
            directive: directive.into(),
            exception_base: exception_base.into(),
            logger: logger.into(),
        }
    }
}

/// Resolved identities of the required well-known types.
#[derive(Debug, Clone)]
pub struct WellKnownTypes {
    /// Identity of the logging directive type.
    pub directive: TypeIdentity,
    /// Identity of the exception base type.
    pub exception_base: TypeIdentity,
    /// Identity of the logger capability type.
    pub logger: TypeIdentity,
}

impl WellKnownTypes {
    /// Resolves all three required identities.
    ///
    /// Every name that fails to resolve is reported as its own
    /// missing-required-type diagnostic; any failure makes the whole
    /// pass abort, so `None` means the caller must return an empty
    /// model without scanning.
    pub fn resolve<H: SemanticHost + ?Sized>(
        host: &H,
        names: &WellKnownTypeNames,
        reporter: &mut Reporter<'_>,
    ) -> Option<Self> {
        let directive = lookup(host, &names.directive, reporter);
        let exception_base = lookup(host, &names.exception_base, reporter);
        let logger = lookup(host, &names.logger, reporter);

        match (directive, exception_base, logger) {
            (Some(directive), Some(exception_base), Some(logger)) => Some(Self {
                directive,
                exception_base,
                logger,
            }),
            _ => None,
        }
    }
}

fn lookup<H: SemanticHost + ?Sized>(
    host: &H,
    name: &str,
    reporter: &mut Reporter<'_>,
) -> Option<TypeIdentity> {
    let resolved = host.resolve_type(name);
    if resolved.is_none() {
        reporter.report(DiagnosticKind::MissingRequiredType, None, &[name]);
    }
    resolved
}
