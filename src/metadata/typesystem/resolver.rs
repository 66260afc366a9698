use crate::{
    metadata::{
        signatures::{
            ClassTypeSignature, SignatureClass, SignatureField, SignatureMethod,
            SignatureTypeParameter, TypeArgument, TypeSignature,
        },
        typesystem::{
            ClassGenerics, ClassType, FieldGenerics, GenericDeclaration, MethodGenerics, TypeNode,
            TypeParameterDeclaration, TypeVariable, WildcardKind, WildcardType,
        },
    },
    Error::{self, UnresolvedTypeVariable},
    Result,
};

/// One level of a scope chain: the names declared by a single class or method
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeLevel {
    /// The declaring class or method
    pub owner: GenericDeclaration,
    /// Declared type parameter names, in declaration order
    pub names: Vec<String>,
}

/// Ordered type-parameter scopes, innermost first.
///
/// For a method signature the chain is: the method's own parameters, the declaring
/// class, then (for local classes) the enclosing method, then each lexically
/// enclosing class outward. Lookup walks the chain front to back and the first
/// match wins, which is what makes inner declarations shadow outer ones.
///
/// A declaration whose own signature is malformed contributes no level; the chain
/// then remembers that syntax error, so a miss can be attributed to it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopeChain {
    levels: Vec<ScopeLevel>,
    degraded: Option<Error>,
}

impl ScopeChain {
    /// Create an empty chain
    #[must_use]
    pub fn new() -> Self {
        ScopeChain {
            levels: Vec::new(),
            degraded: None,
        }
    }

    /// Put a new innermost level in front of this chain
    ///
    /// ## Arguments
    /// * 'owner' - The declaring class or method
    /// * 'names' - Declared type parameter names
    #[must_use]
    pub fn with_inner<I, S>(mut self, owner: GenericDeclaration, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.levels.insert(
            0,
            ScopeLevel {
                owner,
                names: names.into_iter().map(Into::into).collect(),
            },
        );
        self
    }

    /// Append a new outermost level to this chain
    ///
    /// ## Arguments
    /// * 'owner' - The declaring class or method
    /// * 'names' - Declared type parameter names
    #[must_use]
    pub fn with_outer<I, S>(mut self, owner: GenericDeclaration, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.levels.push(ScopeLevel {
            owner,
            names: names.into_iter().map(Into::into).collect(),
        });
        self
    }

    /// Append all levels of `outer` behind this chain
    ///
    /// ## Arguments
    /// * 'outer' - The enclosing chain
    #[must_use]
    pub fn extended_by(mut self, outer: &ScopeChain) -> Self {
        self.levels.extend(outer.levels.iter().cloned());
        if self.degraded.is_none() {
            self.degraded.clone_from(&outer.degraded);
        }
        self
    }

    /// Record that a declaration on this chain has a malformed signature and
    /// contributed no level. The declaration is inside every level already on the
    /// chain, so its error replaces any recorded earlier.
    ///
    /// ## Arguments
    /// * 'error' - The syntax error of the skipped declaration
    #[must_use]
    pub fn with_degraded(mut self, error: Error) -> Self {
        self.degraded = Some(error);
        self
    }

    /// The syntax error of a declaration skipped on this chain, if any
    #[must_use]
    pub fn degraded(&self) -> Option<&Error> {
        self.degraded.as_ref()
    }

    /// The syntax error behind a resolution failure: a miss on a chain with a skipped
    /// declaration is that declaration's malformed signature, not a consistency fault.
    ///
    /// ## Arguments
    /// * 'error' - The error returned by resolution
    #[must_use]
    pub fn miss_cause(&self, error: &Error) -> Option<&Error> {
        match error {
            UnresolvedTypeVariable { .. } => self.degraded.as_ref(),
            _ => None,
        }
    }

    /// The levels, innermost first
    #[must_use]
    pub fn levels(&self) -> &[ScopeLevel] {
        &self.levels
    }

    /// Number of levels
    #[must_use]
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Returns `true` if the chain has no levels
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Find the innermost declaration of `name`
    ///
    /// ## Arguments
    /// * 'name' - The type variable name
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&GenericDeclaration> {
        self.levels
            .iter()
            .find(|level| level.names.iter().any(|declared| declared == name))
            .map(|level| &level.owner)
    }
}

/// Resolves signature syntax trees against a [`ScopeChain`]
pub struct ScopeResolver<'a> {
    scope: &'a ScopeChain,
}

impl<'a> ScopeResolver<'a> {
    /// Create a new resolver over the given scope chain
    ///
    /// ## Arguments
    /// * 'scope' - The chain type variables are looked up in
    #[must_use]
    pub fn new(scope: &'a ScopeChain) -> Self {
        ScopeResolver { scope }
    }

    /// Resolve a type signature to a type node
    ///
    /// ## Arguments
    /// * 'signature' - The syntax tree to resolve
    ///
    /// # Errors
    /// Returns [`crate::Error::UnresolvedTypeVariable`] if any type variable in the
    /// tree is not declared by a level of the chain.
    pub fn resolve(&self, signature: &TypeSignature) -> Result<TypeNode> {
        match signature {
            TypeSignature::Base(kind) => Ok(TypeNode::Primitive(*kind)),
            TypeSignature::Class(class) => self.resolve_class_type(class),
            TypeSignature::TypeVariable(name) => match self.scope.lookup(name) {
                Some(owner) => Ok(TypeNode::Variable(TypeVariable {
                    name: name.clone(),
                    declared_by: owner.clone(),
                })),
                None => Err(UnresolvedTypeVariable { name: name.clone() }),
            },
            TypeSignature::Array(component) => {
                Ok(TypeNode::Array(Box::new(self.resolve(component)?)))
            }
        }
    }

    /// Resolve a class type signature.
    ///
    /// Inner segments of a parameterized owner become
    /// [`TypeNode::ParameterizedOuter`]; inner segments of a raw owner collapse into a
    /// single class with a `$`-joined binary name.
    ///
    /// ## Arguments
    /// * 'signature' - The class type syntax
    ///
    /// # Errors
    /// Returns [`crate::Error::UnresolvedTypeVariable`] from any type argument.
    pub fn resolve_class_type(&self, signature: &ClassTypeSignature) -> Result<TypeNode> {
        let mut current: Option<TypeNode> = None;
        let mut binary_name = String::new();

        for segment in &signature.segments {
            if current.is_none() {
                binary_name = segment.name.replace('/', ".");
            } else {
                binary_name.push('$');
                binary_name.push_str(&segment.name);
            }

            let inner = ClassType {
                name: binary_name.clone(),
                args: self.resolve_arguments(&segment.args)?,
            };

            current = Some(match current {
                Some(outer) if outer.is_parameterized() => TypeNode::ParameterizedOuter {
                    outer: Box::new(outer),
                    inner,
                },
                _ => TypeNode::Class(inner),
            });
        }

        Ok(current.unwrap_or_else(|| TypeNode::raw(&binary_name)))
    }

    fn resolve_arguments(&self, args: &[TypeArgument]) -> Result<Vec<TypeNode>> {
        args.iter().map(|arg| self.resolve_argument(arg)).collect()
    }

    fn resolve_argument(&self, arg: &TypeArgument) -> Result<TypeNode> {
        let wildcard = |kind, bound: Option<TypeNode>| {
            TypeNode::Wildcard(WildcardType {
                kind,
                bound: bound.map(Box::new),
            })
        };

        match arg {
            TypeArgument::Unbounded => Ok(wildcard(WildcardKind::Unbounded, None)),
            TypeArgument::Extends(bound) => {
                Ok(wildcard(WildcardKind::Extends, Some(self.resolve(bound)?)))
            }
            TypeArgument::Super(bound) => {
                Ok(wildcard(WildcardKind::Super, Some(self.resolve(bound)?)))
            }
            TypeArgument::Exact(signature) => self.resolve(signature),
        }
    }

    /// Resolve formal type parameters. The chain must already contain the level
    /// that declares them, so bounds may refer to any parameter of the same list.
    ///
    /// ## Arguments
    /// * 'owner'  - The declaring class or method
    /// * 'params' - The parameter syntax
    ///
    /// # Errors
    /// Returns [`crate::Error::UnresolvedTypeVariable`] from any bound.
    pub fn resolve_type_parameters(
        &self,
        owner: &GenericDeclaration,
        params: &[SignatureTypeParameter],
    ) -> Result<Vec<TypeParameterDeclaration>> {
        params
            .iter()
            .map(|param| {
                let mut bounds = param
                    .bounds()
                    .map(|bound| self.resolve(bound))
                    .collect::<Result<Vec<_>>>()?;
                if bounds.is_empty() {
                    bounds.push(TypeNode::object());
                }

                Ok(TypeParameterDeclaration {
                    name: param.name.clone(),
                    declared_by: owner.clone(),
                    bounds,
                })
            })
            .collect()
    }

    /// Resolve a whole class signature.
    ///
    /// ## Arguments
    /// * 'signature' - The parsed class signature
    /// * 'class'     - Binary name of the class owning the signature
    /// * 'enclosing' - Scopes of enclosing methods and classes, innermost first
    ///
    /// # Errors
    /// Returns [`crate::Error::UnresolvedTypeVariable`] on any scope miss.
    pub fn class_generics(
        signature: &SignatureClass,
        class: &str,
        enclosing: &ScopeChain,
    ) -> Result<ClassGenerics> {
        let owner = GenericDeclaration::Class(class.to_string());
        let scope = ScopeChain::new()
            .with_inner(owner.clone(), signature.type_params.iter().map(|p| p.name.clone()))
            .extended_by(enclosing);
        let resolver = ScopeResolver::new(&scope);

        Ok(ClassGenerics {
            type_parameters: resolver.resolve_type_parameters(&owner, &signature.type_params)?,
            superclass: resolver.resolve_class_type(&signature.superclass)?,
            interfaces: signature
                .interfaces
                .iter()
                .map(|interface| resolver.resolve_class_type(interface))
                .collect::<Result<Vec<_>>>()?,
        })
    }

    /// Resolve a whole method signature.
    ///
    /// ## Arguments
    /// * 'signature' - The parsed method signature
    /// * 'owner'     - The method itself, as a [`GenericDeclaration::Method`]
    /// * 'enclosing' - Scope of the declaring class, innermost first
    ///
    /// # Errors
    /// Returns [`crate::Error::UnresolvedTypeVariable`] on any scope miss.
    pub fn method_generics(
        signature: &SignatureMethod,
        owner: &GenericDeclaration,
        enclosing: &ScopeChain,
    ) -> Result<MethodGenerics> {
        let scope = ScopeChain::new()
            .with_inner(owner.clone(), signature.type_params.iter().map(|p| p.name.clone()))
            .extended_by(enclosing);
        let resolver = ScopeResolver::new(&scope);

        Ok(MethodGenerics {
            type_parameters: resolver.resolve_type_parameters(owner, &signature.type_params)?,
            parameters: signature
                .params
                .iter()
                .map(|param| resolver.resolve(param))
                .collect::<Result<Vec<_>>>()?,
            return_type: resolver.resolve(&signature.return_type)?,
            exceptions: signature
                .throws
                .iter()
                .map(|thrown| resolver.resolve(thrown))
                .collect::<Result<Vec<_>>>()?,
        })
    }

    /// Resolve a field signature.
    ///
    /// ## Arguments
    /// * 'signature' - The parsed field signature
    /// * 'scope'     - Scope of the declaring class, innermost first
    ///
    /// # Errors
    /// Returns [`crate::Error::UnresolvedTypeVariable`] on a scope miss.
    pub fn field_generics(signature: &SignatureField, scope: &ScopeChain) -> Result<FieldGenerics> {
        Ok(FieldGenerics {
            field_type: ScopeResolver::new(scope).resolve(&signature.base)?,
        })
    }
}
