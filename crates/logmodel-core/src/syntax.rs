//! Declaration syntax supplied by the host.
//!
//! The pipeline never parses source text itself. The host's frontend
//! hands over one [`TypeDecl`] per declared type, carrying exactly the
//! structure the extraction pass reads: methods, their parameters, and
//! any attached directives with unevaluated constant arguments.

use crate::diagnostics::SourceLocation;

/// A type reference as written in a declaration.
#[derive(Debug, Clone)]
pub struct TypeRef {
    /// The referenced name, qualified the way the host renders it.
    pub name: String,
    /// Where the reference appears.
    pub location: SourceLocation,
}

impl TypeRef {
    /// Creates a new type reference.
    #[must_use]
    pub fn new(name: impl Into<String>, location: SourceLocation) -> Self {
        Self {
            name: name.into(),
            location,
        }
    }
}

/// A constant expression, opaque to the pipeline.
///
/// Only the semantic host can evaluate it; the pipeline treats the
/// text as a resolution key.
#[derive(Debug, Clone)]
pub struct ConstExpr {
    /// The expression text as written.
    pub text: String,
    /// Where the expression appears.
    pub location: SourceLocation,
}

impl ConstExpr {
    /// Creates a new constant expression.
    #[must_use]
    pub fn new(text: impl Into<String>, location: SourceLocation) -> Self {
        Self {
            text: text.into(),
            location,
        }
    }
}

/// One directive occurrence attached to a method.
#[derive(Debug, Clone)]
pub struct DirectiveNode {
    /// The directive path as written.
    pub path: String,
    /// Positional constant arguments.
    pub args: Vec<ConstExpr>,
    /// Where the directive appears.
    pub location: SourceLocation,
}

impl DirectiveNode {
    /// Creates a directive occurrence with no arguments.
    #[must_use]
    pub fn new(path: impl Into<String>, location: SourceLocation) -> Self {
        Self {
            path: path.into(),
            args: Vec::new(),
            location,
        }
    }

    /// Appends one positional argument.
    #[must_use]
    pub fn with_arg(mut self, arg: ConstExpr) -> Self {
        self.args.push(arg);
        self
    }
}

/// One declared method parameter.
#[derive(Debug, Clone)]
pub struct ParamDecl {
    /// Parameter name.
    pub name: String,
    /// Declared parameter type.
    pub type_ref: TypeRef,
    /// Location of the parameter identifier.
    pub location: SourceLocation,
}

impl ParamDecl {
    /// Creates a new parameter declaration.
    #[must_use]
    pub fn new(name: impl Into<String>, type_ref: TypeRef, location: SourceLocation) -> Self {
        Self {
            name: name.into(),
            type_ref,
            location,
        }
    }
}

/// One declared method.
#[derive(Debug, Clone)]
pub struct MethodDecl {
    /// Method name.
    pub name: String,
    /// Declared modifiers, verbatim (e.g. `"public static partial"`).
    pub modifiers: String,
    /// Declared return type.
    pub return_type: TypeRef,
    /// Number of declared type parameters.
    pub type_param_count: usize,
    /// Declared parameters in order.
    pub params: Vec<ParamDecl>,
    /// Directives attached to the method, in attachment order.
    pub directives: Vec<DirectiveNode>,
    /// Location of the whole method declaration.
    pub location: SourceLocation,
    /// Location of the method identifier.
    pub name_location: SourceLocation,
}

impl MethodDecl {
    /// Creates a method declaration with no modifiers, parameters, or
    /// directives.
    #[must_use]
    pub fn new(name: impl Into<String>, return_type: TypeRef) -> Self {
        Self {
            name: name.into(),
            modifiers: String::new(),
            return_type,
            type_param_count: 0,
            params: Vec::new(),
            directives: Vec::new(),
            location: SourceLocation::default(),
            name_location: SourceLocation::default(),
        }
    }

    /// Sets the verbatim modifier text.
    #[must_use]
    pub fn with_modifiers(mut self, modifiers: impl Into<String>) -> Self {
        self.modifiers = modifiers.into();
        self
    }

    /// Sets the number of declared type parameters.
    #[must_use]
    pub fn with_type_param_count(mut self, count: usize) -> Self {
        self.type_param_count = count;
        self
    }

    /// Appends one parameter.
    #[must_use]
    pub fn with_param(mut self, param: ParamDecl) -> Self {
        self.params.push(param);
        self
    }

    /// Appends one attached directive.
    #[must_use]
    pub fn with_directive(mut self, directive: DirectiveNode) -> Self {
        self.directives.push(directive);
        self
    }

    /// Sets the location of the whole declaration.
    #[must_use]
    pub fn with_location(mut self, location: SourceLocation) -> Self {
        self.location = location;
        self
    }

    /// Sets the location of the method identifier.
    #[must_use]
    pub fn with_name_location(mut self, location: SourceLocation) -> Self {
        self.name_location = location;
        self
    }
}

/// Where a type declaration lives.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Enclosing {
    /// Declared directly at file scope.
    #[default]
    FileScope,
    /// Declared inside a named scope path (module, namespace).
    Scope(String),
    /// Nested inside another type declaration.
    Type(String),
}

/// One declared type and its method members.
#[derive(Debug, Clone)]
pub struct TypeDecl {
    /// Type name, without any generic-parameter suffix.
    pub name: String,
    /// Rendered generic-parameter suffix (e.g. `"<T>"`), or empty.
    pub type_params: String,
    /// Generic-constraint clause text, verbatim, or empty.
    pub constraints: String,
    /// Where the type is declared.
    pub enclosing: Enclosing,
    /// Declared method members in order.
    pub methods: Vec<MethodDecl>,
    /// Location of the type identifier.
    pub name_location: SourceLocation,
}

impl TypeDecl {
    /// Creates a file-scope type declaration with no members.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_params: String::new(),
            constraints: String::new(),
            enclosing: Enclosing::FileScope,
            methods: Vec::new(),
            name_location: SourceLocation::default(),
        }
    }

    /// Sets the rendered generic-parameter suffix.
    #[must_use]
    pub fn with_type_params(mut self, type_params: impl Into<String>) -> Self {
        self.type_params = type_params.into();
        self
    }

    /// Sets the verbatim constraint clause text.
    #[must_use]
    pub fn with_constraints(mut self, constraints: impl Into<String>) -> Self {
        self.constraints = constraints.into();
        self
    }

    /// Sets where the type is declared.
    #[must_use]
    pub fn with_enclosing(mut self, enclosing: Enclosing) -> Self {
        self.enclosing = enclosing;
        self
    }

    /// Appends one method member.
    #[must_use]
    pub fn with_method(mut self, method: MethodDecl) -> Self {
        self.methods.push(method);
        self
    }

    /// Sets the location of the type identifier.
    #[must_use]
    pub fn with_name_location(mut self, location: SourceLocation) -> Self {
        self.name_location = location;
        self
    }
}
