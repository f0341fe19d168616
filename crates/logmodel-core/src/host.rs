//! In-memory semantic host.
//!
//! A registry-backed [`SemanticHost`] for tests and for embedders
//! that have no compiler frontend to adapt. Types, conversions,
//! constants, and directive owners are registered up front; lookups
//! are by exact name.

use std::collections::{HashMap, HashSet};

use crate::semantic::{ConstantValue, Conversion, ResolvedType, SemanticHost, TypeIdentity};
use crate::syntax::{ConstExpr, DirectiveNode, TypeRef};

/// A [`SemanticHost`] over explicitly registered facts.
#[derive(Debug, Default)]
pub struct MemoryHost {
    types: HashMap<String, TypeEntry>,
    conversions: HashSet<(String, String)>,
    constants: HashMap<String, ConstantValue>,
    directive_owners: HashMap<String, String>,
}

#[derive(Debug)]
struct TypeEntry {
    display: String,
    is_void: bool,
}

impl MemoryHost {
    /// Creates an empty host.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a type; its display rendering defaults to its name.
    #[must_use]
    pub fn with_type(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.types.insert(
            name.clone(),
            TypeEntry {
                display: name,
                is_void: false,
            },
        );
        self
    }

    /// Registers a type with an explicit display rendering.
    #[must_use]
    pub fn with_display(mut self, name: impl Into<String>, display: impl Into<String>) -> Self {
        self.types.insert(
            name.into(),
            TypeEntry {
                display: display.into(),
                is_void: false,
            },
        );
        self
    }

    /// Registers the type that stands for an absent return value.
    #[must_use]
    pub fn with_void_type(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.types.insert(
            name.clone(),
            TypeEntry {
                display: name,
                is_void: true,
            },
        );
        self
    }

    /// Registers an implicit reference conversion from `source` to
    /// `dest`.
    #[must_use]
    pub fn with_conversion(mut self, source: impl Into<String>, dest: impl Into<String>) -> Self {
        self.conversions.insert((source.into(), dest.into()));
        self
    }

    /// Registers a named constant expression.
    #[must_use]
    pub fn with_constant(mut self, expr: impl Into<String>, value: ConstantValue) -> Self {
        self.constants.insert(expr.into(), value);
        self
    }

    /// Registers a directive path as defined by `owner`.
    #[must_use]
    pub fn with_directive(mut self, path: impl Into<String>, owner: impl Into<String>) -> Self {
        self.directive_owners.insert(path.into(), owner.into());
        self
    }
}

impl SemanticHost for MemoryHost {
    fn resolve_type(&self, fully_qualified: &str) -> Option<TypeIdentity> {
        self.types
            .contains_key(fully_qualified)
            .then(|| TypeIdentity::new(fully_qualified))
    }

    fn resolve_type_ref(&self, type_ref: &TypeRef) -> Option<ResolvedType> {
        let entry = self.types.get(&type_ref.name)?;
        Some(ResolvedType {
            identity: TypeIdentity::new(&type_ref.name),
            display: entry.display.clone(),
            is_void: entry.is_void,
        })
    }

    fn classify_conversion(&self, source: &TypeIdentity, dest: &TypeIdentity) -> Conversion {
        let pair = (source.as_str().to_string(), dest.as_str().to_string());
        Conversion {
            is_identity: source == dest,
            is_implicit_reference: self.conversions.contains(&pair),
        }
    }

    fn resolve_constant(&self, expr: &ConstExpr) -> Option<ConstantValue> {
        if let Some(value) = self.constants.get(&expr.text) {
            return Some(value.clone());
        }
        parse_literal(&expr.text)
    }

    fn resolve_directive_owner(&self, directive: &DirectiveNode) -> Option<TypeIdentity> {
        self.directive_owners
            .get(&directive.path)
            .map(TypeIdentity::new)
    }
}

/// Parses self-describing literals: integers, booleans, quoted strings.
fn parse_literal(text: &str) -> Option<ConstantValue> {
    if let Ok(value) = text.parse::<i64>() {
        return Some(ConstantValue::Int(value));
    }
    match text {
        "true" => return Some(ConstantValue::Bool(true)),
        "false" => return Some(ConstantValue::Bool(false)),
        _ => {}
    }
    let stripped = text.strip_prefix('"')?.strip_suffix('"')?;
    Some(ConstantValue::Str(stripped.to_string()))
}
