use crate::metadata::typesystem::PrimitiveKind;

/// Represents a parsed type in the various generic signatures.
///
/// This is pure syntax: type variables are still bare names, class types still
/// carry their internal (`/`-separated) names. The
/// [`crate::metadata::typesystem::ScopeResolver`] turns it into a
/// [`crate::metadata::typesystem::TypeNode`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeSignature {
    /// A primitive (`B C D F I J S Z`) or `V` in return position
    Base(PrimitiveKind),
    /// A class type, possibly parameterized and possibly nested (`Outer<T>.Inner`)
    Class(ClassTypeSignature),
    /// A type variable reference, `TName;`
    TypeVariable(String),
    /// An array of the component type; nested arrays encode the depth
    Array(Box<TypeSignature>),
}

impl TypeSignature {
    /// Count array dimensions and return the innermost component.
    #[must_use]
    pub fn array_depth(&self) -> (usize, &TypeSignature) {
        let mut depth = 0;
        let mut current = self;
        while let TypeSignature::Array(component) = current {
            depth += 1;
            current = component;
        }
        (depth, current)
    }
}

/// A class type signature: `L` package/Name [args] (`.` Inner [args])* `;`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassTypeSignature {
    /// The outermost class with its internal name (`java/util/HashMap`), then each
    /// `.`-qualified inner class with its simple name (`KeySet`)
    pub segments: Vec<SimpleClassTypeSignature>,
}

impl ClassTypeSignature {
    /// Create a non-nested class type signature.
    ///
    /// ## Arguments
    /// * 'internal_name' - The `/`-separated class name
    /// * 'args'          - The type arguments, empty for a raw type
    #[must_use]
    pub fn new(internal_name: &str, args: Vec<TypeArgument>) -> Self {
        ClassTypeSignature {
            segments: vec![SimpleClassTypeSignature {
                name: internal_name.to_string(),
                args,
            }],
        }
    }

    /// The binary name of the innermost class (`java.util.HashMap$KeySet`).
    #[must_use]
    pub fn binary_name(&self) -> String {
        let mut name = String::new();
        for (index, segment) in self.segments.iter().enumerate() {
            if index == 0 {
                name.push_str(&segment.name.replace('/', "."));
            } else {
                name.push('$');
                name.push_str(&segment.name);
            }
        }
        name
    }
}

/// One segment of a [`ClassTypeSignature`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleClassTypeSignature {
    /// Internal name for the first segment, simple name for inner segments
    pub name: String,
    /// Type arguments in declaration order
    pub args: Vec<TypeArgument>,
}

/// A single type argument inside `<...>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeArgument {
    /// `*`
    Unbounded,
    /// `+X`, `? extends X`
    Extends(TypeSignature),
    /// `-X`, `? super X`
    Super(TypeSignature),
    /// A plain reference type
    Exact(TypeSignature),
}

/// A formal type parameter `Name:ClassBound:InterfaceBound...`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureTypeParameter {
    /// The declared name
    pub name: String,
    /// The class bound, absent when only interface bounds are given
    pub class_bound: Option<TypeSignature>,
    /// Interface bounds in declaration order
    pub interface_bounds: Vec<TypeSignature>,
}

impl SignatureTypeParameter {
    /// All bounds in declaration order, class bound first
    pub fn bounds(&self) -> impl Iterator<Item = &TypeSignature> {
        self.class_bound.iter().chain(self.interface_bounds.iter())
    }
}

/// A parsed class signature (JVMS 4.7.9.1 `ClassSignature`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureClass {
    /// Formal type parameters of the class
    pub type_params: Vec<SignatureTypeParameter>,
    /// The superclass
    pub superclass: ClassTypeSignature,
    /// Super interfaces in declaration order
    pub interfaces: Vec<ClassTypeSignature>,
}

/// A parsed method signature (`MethodSignature`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureMethod {
    /// Formal type parameters of the method
    pub type_params: Vec<SignatureTypeParameter>,
    /// Parameter types in declaration order
    pub params: Vec<TypeSignature>,
    /// The return type, `Base(Void)` for `V`
    pub return_type: TypeSignature,
    /// `^`-introduced thrown types
    pub throws: Vec<TypeSignature>,
}

/// A parsed field signature (`FieldSignature`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureField {
    /// The reference type of the field
    pub base: TypeSignature,
}

/// Which grammar production a raw signature is parsed with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignatureKind {
    /// Signature attribute of a class
    Class,
    /// Signature attribute of a field
    Field,
    /// Signature attribute of a method
    Method,
}

/// The syntax tree of any signature kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedSignature {
    /// A class signature
    Class(SignatureClass),
    /// A field signature
    Field(SignatureField),
    /// A method signature
    Method(SignatureMethod),
}
