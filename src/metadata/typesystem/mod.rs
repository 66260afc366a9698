//! Scope-resolved generic type model.
//!
//! This module holds the immutable type trees that consumers query once a raw
//! signature has been parsed and every type variable has been bound to its
//! declaring scope.
//!
//! # Key Components
//!
//! - [`TypeNode`]: Tagged union over every kind of type the reflective API can report
//! - [`ScopeChain`]: The ordered type-parameter scopes a type variable is looked up in
//! - [`ScopeResolver`]: Turns a signature syntax tree into resolved [`TypeNode`]s
//! - [`ClassGenerics`], [`MethodGenerics`], [`FieldGenerics`]: The resolved view of one member
//! - [`render`]: Canonical string forms, matching the reflective API's formatting
//!
//! # Examples
//!
//! ```rust
//! use sigscope::metadata::{
//!     signatures::parse_field_signature,
//!     typesystem::{GenericDeclaration, ScopeChain, ScopeResolver},
//! };
//!
//! let owner = GenericDeclaration::Class("java.util.ArrayList".to_string());
//! let scope = ScopeChain::new().with_inner(owner, ["E"]);
//!
//! let sig = parse_field_signature("[Ljava/util/List<+TE;>;")?;
//! let node = ScopeResolver::new(&scope).resolve(&sig.base)?;
//! assert_eq!(node.to_string(), "java.util.List<? extends E>[]");
//! # Ok::<(), sigscope::Error>(())
//! ```

mod primitives;
mod render;
mod resolver;

pub use primitives::PrimitiveKind;
pub use render::{render, render_class_object, render_generic, render_list};
pub use resolver::{ScopeChain, ScopeLevel, ScopeResolver};

/// The entity that declares a set of type parameters.
///
/// Type variables remember their declaration site, which is how shadowing stays
/// observable after resolution: a method-level `T` and a class-level `T` render the
/// same but compare unequal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GenericDeclaration {
    /// A class, by binary name
    Class(String),
    /// A method, by declaring class, name and erased descriptor
    Method {
        /// Binary name of the declaring class
        class: String,
        /// Method name
        name: String,
        /// Erased method descriptor
        descriptor: String,
    },
}

/// A class type, raw when `args` is empty
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClassType {
    /// Binary name, e.g. `java.util.HashMap$Node`
    pub name: String,
    /// Type arguments in declaration order
    pub args: Vec<TypeNode>,
}

impl ClassType {
    /// Create a raw (erased) class type
    ///
    /// ## Arguments
    /// * 'name' - The binary class name
    #[must_use]
    pub fn raw(name: &str) -> Self {
        ClassType {
            name: name.to_string(),
            args: Vec::new(),
        }
    }

    /// The simple name: everything after the last `.` or `$`
    #[must_use]
    pub fn simple_name(&self) -> &str {
        self.name
            .rfind(['.', '$'])
            .map_or(self.name.as_str(), |index| &self.name[index + 1..])
    }
}

/// A resolved reference to a declared type parameter
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeVariable {
    /// The declared name
    pub name: String,
    /// Which class or method declared it
    pub declared_by: GenericDeclaration,
}

/// Bound direction of a wildcard type argument
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WildcardKind {
    /// `?`
    Unbounded,
    /// `? extends X`
    Extends,
    /// `? super X`
    Super,
}

/// A wildcard type argument
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WildcardType {
    /// The bound direction
    pub kind: WildcardKind,
    /// The bound, absent for [`WildcardKind::Unbounded`]
    pub bound: Option<Box<TypeNode>>,
}

/// A scope-resolved type.
///
/// Every consumer matches exhaustively, so a new variant has to be handled by the
/// renderer and the resolver before anything compiles.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeNode {
    /// A primitive type or `void`
    Primitive(PrimitiveKind),
    /// A raw or parameterized class type
    Class(ClassType),
    /// A bound type variable
    Variable(TypeVariable),
    /// An array of the component type
    Array(Box<TypeNode>),
    /// A wildcard type argument
    Wildcard(WildcardType),
    /// A member class of a parameterized outer type, `Outer<T>.Inner<U>`
    ParameterizedOuter {
        /// The parameterized enclosing type
        outer: Box<TypeNode>,
        /// The member class and its own arguments
        inner: ClassType,
    },
}

impl TypeNode {
    /// A raw class type node
    ///
    /// ## Arguments
    /// * 'name' - The binary class name
    #[must_use]
    pub fn raw(name: &str) -> Self {
        TypeNode::Class(ClassType::raw(name))
    }

    /// `java.lang.Object`, the implicit bound of unbounded type parameters
    #[must_use]
    pub fn object() -> Self {
        TypeNode::raw("java.lang.Object")
    }

    /// The binary name of the underlying class, for class-like nodes
    #[must_use]
    pub fn raw_name(&self) -> Option<&str> {
        match self {
            TypeNode::Class(class) => Some(&class.name),
            TypeNode::ParameterizedOuter { inner, .. } => Some(&inner.name),
            TypeNode::Primitive(_)
            | TypeNode::Variable(_)
            | TypeNode::Array(_)
            | TypeNode::Wildcard(_) => None,
        }
    }

    /// Returns `true` for a class type without type arguments
    #[must_use]
    pub fn is_raw_class(&self) -> bool {
        matches!(self, TypeNode::Class(class) if class.args.is_empty())
    }

    /// Returns `true` if the node carries type arguments anywhere along its owner chain
    #[must_use]
    pub fn is_parameterized(&self) -> bool {
        match self {
            TypeNode::Class(class) => !class.args.is_empty(),
            TypeNode::ParameterizedOuter { .. } => true,
            TypeNode::Primitive(_)
            | TypeNode::Variable(_)
            | TypeNode::Array(_)
            | TypeNode::Wildcard(_) => false,
        }
    }
}

/// A formal type parameter with its resolved bounds
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeParameterDeclaration {
    /// The declared name
    pub name: String,
    /// Declaring class or method
    pub declared_by: GenericDeclaration,
    /// Bounds in declaration order; `[java.lang.Object]` when none were written
    pub bounds: Vec<TypeNode>,
}

/// The resolved generic view of a class signature
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassGenerics {
    /// Formal type parameters of the class
    pub type_parameters: Vec<TypeParameterDeclaration>,
    /// The generic superclass
    pub superclass: TypeNode,
    /// Generic super interfaces in declaration order
    pub interfaces: Vec<TypeNode>,
}

/// The resolved generic view of a method signature
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodGenerics {
    /// Formal type parameters of the method
    pub type_parameters: Vec<TypeParameterDeclaration>,
    /// Parameter types in declaration order
    pub parameters: Vec<TypeNode>,
    /// The return type
    pub return_type: TypeNode,
    /// Thrown types in declaration order
    pub exceptions: Vec<TypeNode>,
}

/// The resolved generic view of a field signature
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldGenerics {
    /// The generic field type
    pub field_type: TypeNode,
}
