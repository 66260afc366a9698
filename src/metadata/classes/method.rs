use std::{
    fmt,
    sync::{Arc, OnceLock},
};

use tracing::{error, warn};

use crate::{
    metadata::{
        classes::{
            compute_or_fetch,
            flags::{modifier_prefix, METHOD_MODIFIERS},
            AccessFlags, GenericView,
        },
        signatures::{parse_method_descriptor, MethodDescriptor, SignatureParser},
        store::{ClassRegistry, MethodDefinition},
        typesystem::{
            GenericDeclaration, MethodGenerics, ScopeChain, ScopeResolver, TypeNode,
            TypeParameterDeclaration,
        },
    },
    Error, Result,
};

const CONSTRUCTOR: &str = "<init>";

/// A reference to a method
pub type MethodInfoRc = Arc<MethodInfo>;

/// A declared method with its erased shape and lazily resolved generic shape
#[derive(Debug)]
pub struct MethodInfo {
    declaring_class: String,
    declared_in_interface: bool,
    name: String,
    descriptor: String,
    flags: AccessFlags,
    signature: Option<String>,
    erased: MethodDescriptor,
    exceptions: Vec<TypeNode>,
    generics: OnceLock<GenericView<MethodGenerics>>,
}

impl MethodInfo {
    /// Create a method from its definition
    ///
    /// ## Arguments
    /// * 'declaring_class'       - Binary name of the declaring class
    /// * 'declared_in_interface' - Whether the declaring class is an interface
    /// * 'definition'            - The method as handed over by the store
    ///
    /// # Errors
    /// Returns [`crate::Error::MalformedDescriptor`] if the descriptor is invalid.
    pub fn from_definition(
        declaring_class: &str,
        declared_in_interface: bool,
        definition: MethodDefinition,
    ) -> Result<Self> {
        let erased = parse_method_descriptor(&definition.descriptor)?;
        let exceptions = definition
            .exceptions
            .iter()
            .map(|name| TypeNode::raw(name))
            .collect();

        Ok(MethodInfo {
            declaring_class: declaring_class.to_string(),
            declared_in_interface,
            name: definition.name,
            descriptor: definition.descriptor,
            flags: definition.flags,
            signature: definition.signature,
            erased,
            exceptions,
            generics: OnceLock::new(),
        })
    }

    /// The method name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Binary name of the declaring class
    #[must_use]
    pub fn declaring_class(&self) -> &str {
        &self.declaring_class
    }

    /// The erased descriptor text
    #[must_use]
    pub fn descriptor(&self) -> &str {
        &self.descriptor
    }

    /// Raw access flags
    #[must_use]
    pub fn flags(&self) -> AccessFlags {
        self.flags
    }

    /// The raw `Signature` attribute
    #[must_use]
    pub fn signature(&self) -> Option<&str> {
        self.signature.as_deref()
    }

    /// The decoded erased descriptor
    #[must_use]
    pub fn erased(&self) -> &MethodDescriptor {
        &self.erased
    }

    /// Erased thrown types from the `Exceptions` attribute
    #[must_use]
    pub fn exception_types(&self) -> &[TypeNode] {
        &self.exceptions
    }

    /// This method as the declaration site of its type parameters
    #[must_use]
    pub fn owner(&self) -> GenericDeclaration {
        GenericDeclaration::Method {
            class: self.declaring_class.clone(),
            name: self.name.clone(),
            descriptor: self.descriptor.clone(),
        }
    }

    /// Returns `true` for an instance initializer, reflected as a constructor
    #[must_use]
    pub fn is_constructor(&self) -> bool {
        self.name == CONSTRUCTOR
    }

    /// Returns `true` if the method takes a variable number of arguments
    #[must_use]
    pub fn is_varargs(&self) -> bool {
        self.flags.contains(AccessFlags::VARARGS)
    }

    /// Returns `true` for a public, non-abstract, non-static interface method
    #[must_use]
    pub fn is_default(&self) -> bool {
        let relevant = self.flags & (AccessFlags::ABSTRACT | AccessFlags::PUBLIC | AccessFlags::STATIC);
        self.declared_in_interface && relevant == AccessFlags::PUBLIC
    }

    /// The generic view of this method, computed on first use
    ///
    /// ## Arguments
    /// * 'registry' - The registry the declaring class lives in
    ///
    /// # Errors
    /// Returns an error if the declaring class or an enclosing class cannot be loaded,
    /// or if a type variable is not declared by any scope.
    pub fn generics(&self, registry: &ClassRegistry) -> Result<&GenericView<MethodGenerics>> {
        if let Some(view) = self.generics.get() {
            return Ok(view);
        }

        let class = registry.get(&self.declaring_class)?;
        let scope = registry.class_scope(&class)?;
        self.generics_in(registry, &scope)
    }

    pub(crate) fn generics_in(
        &self,
        registry: &ClassRegistry,
        scope: &ScopeChain,
    ) -> Result<&GenericView<MethodGenerics>> {
        compute_or_fetch(&self.generics, &self.name, || {
            let Some(signature) = &self.signature else {
                return Ok(GenericView::Erased);
            };

            let parsed = match SignatureParser::new(signature)
                .with_max_depth(registry.config().max_signature_depth)
                .parse_method_signature()
            {
                Ok(parsed) => parsed,
                Err(err) => {
                    warn!(
                        class = %self.declaring_class,
                        method = %self.name,
                        signature = %signature,
                        "malformed method signature, falling back to erased types: {err}"
                    );
                    return Ok(GenericView::Degraded(err));
                }
            };

            match ScopeResolver::method_generics(&parsed, &self.owner(), scope) {
                Ok(generics) => Ok(GenericView::Generic(Arc::new(generics))),
                Err(err) => {
                    if let Some(cause) = scope.miss_cause(&err) {
                        warn!(
                            class = %self.declaring_class,
                            method = %self.name,
                            "method signature uses variables of a malformed enclosing declaration: {cause}"
                        );
                        return Ok(GenericView::Degraded(cause.clone()));
                    }
                    error!(class = %self.declaring_class, method = %self.name, "{err}");
                    Err(err)
                }
            }
        })
    }

    fn usable<'a>(&'a self, registry: &ClassRegistry) -> Result<Option<&'a MethodGenerics>> {
        self.generics(registry)?.usable(registry.config())
    }

    /// Generic parameter types, or the erased ones when no usable signature exists
    ///
    /// ## Arguments
    /// * 'registry' - The registry the declaring class lives in
    ///
    /// # Errors
    /// See [`MethodInfo::generics`]; under a strict fallback policy a malformed
    /// signature is reported as its syntax error.
    pub fn generic_parameter_types(&self, registry: &ClassRegistry) -> Result<Vec<TypeNode>> {
        Ok(match self.usable(registry)? {
            Some(generics) => generics.parameters.clone(),
            None => self.erased.parameters.clone(),
        })
    }

    /// Generic return type, or the erased one when no usable signature exists
    ///
    /// # Errors
    /// See [`MethodInfo::generic_parameter_types`].
    pub fn generic_return_type(&self, registry: &ClassRegistry) -> Result<TypeNode> {
        Ok(match self.usable(registry)? {
            Some(generics) => generics.return_type.clone(),
            None => self.erased.return_type.clone(),
        })
    }

    /// Generic thrown types.
    ///
    /// A signature without `^` clauses leaves the erased `Exceptions` list in effect.
    ///
    /// # Errors
    /// See [`MethodInfo::generic_parameter_types`].
    pub fn generic_exception_types(&self, registry: &ClassRegistry) -> Result<Vec<TypeNode>> {
        Ok(match self.usable(registry)? {
            Some(generics) if !generics.exceptions.is_empty() => generics.exceptions.clone(),
            _ => self.exceptions.clone(),
        })
    }

    /// Formal type parameters declared by this method
    ///
    /// # Errors
    /// See [`MethodInfo::generic_parameter_types`].
    pub fn type_parameters(&self, registry: &ClassRegistry) -> Result<&[TypeParameterDeclaration]> {
        Ok(match self.usable(registry)? {
            Some(generics) => generics.type_parameters.as_slice(),
            None => &[],
        })
    }

    /// Render the method with its generic types, e.g.
    /// `public <T> T[] java.util.ArrayList.toArray(T[])`
    ///
    /// ## Arguments
    /// * 'registry' - The registry the declaring class lives in
    ///
    /// # Errors
    /// See [`MethodInfo::generic_parameter_types`].
    pub fn to_generic_string(&self, registry: &ClassRegistry) -> Result<String> {
        let type_parameters = self.type_parameters(registry)?;
        let parameters = self.generic_parameter_types(registry)?;
        let return_type = self.generic_return_type(registry)?;
        let exceptions = self.generic_exception_types(registry)?;

        let mut out = modifier_prefix(self.flags, METHOD_MODIFIERS, self.is_default());
        if !type_parameters.is_empty() {
            let params = type_parameters
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>();
            out.push('<');
            out.push_str(&params.join(","));
            out.push_str("> ");
        }

        let mut rendered = parameters.iter().map(ToString::to_string).collect::<Vec<_>>();
        if self.is_varargs() {
            if let Some(last) = rendered.last_mut() {
                if let Some(component) = last.strip_suffix("[]") {
                    *last = format!("{component}...");
                }
            }
        }

        out.push_str(&self.describe(&return_type, &rendered, &exceptions));
        Ok(out)
    }

    fn describe(&self, return_type: &TypeNode, parameters: &[String], exceptions: &[TypeNode]) -> String {
        // constructors print the class name and no return type
        let mut out = if self.is_constructor() {
            format!("{}({})", self.declaring_class, parameters.join(","))
        } else {
            format!(
                "{} {}.{}({})",
                return_type,
                self.declaring_class,
                self.name,
                parameters.join(",")
            )
        };
        if !exceptions.is_empty() {
            let thrown = exceptions.iter().map(ToString::to_string).collect::<Vec<_>>();
            out.push_str(" throws ");
            out.push_str(&thrown.join(","));
        }
        out
    }

    /// The syntax error of a degraded signature, if it has been computed
    #[must_use]
    pub fn cached_error(&self) -> Option<&Error> {
        self.generics.get().and_then(GenericView::error)
    }
}

impl fmt::Display for MethodInfo {
    /// Render the method with its erased types, e.g.
    /// `public java.lang.Object java.util.HashMap.put(java.lang.Object,java.lang.Object)`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parameters = self
            .erased
            .parameters
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>();
        write!(
            f,
            "{}{}",
            modifier_prefix(self.flags, METHOD_MODIFIERS, self.is_default()),
            self.describe(&self.erased.return_type, &parameters, &self.exceptions)
        )
    }
}
