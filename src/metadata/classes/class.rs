use std::{
    fmt,
    sync::{Arc, OnceLock},
};

use tracing::{error, warn};

use crate::{
    metadata::{
        classes::{
            compute_or_fetch, flags::CLASS_MODIFIERS, AccessFlags, FieldInfo, FieldInfoRc,
            GenericView, MethodInfo, MethodInfoRc,
        },
        signatures::SignatureParser,
        store::{ClassDefinition, ClassRegistry, EnclosingMethod},
        typesystem::{
            ClassGenerics, GenericDeclaration, ScopeChain, ScopeResolver, TypeNode,
            TypeParameterDeclaration,
        },
    },
    Result,
};

const STATIC_INITIALIZER: &str = "<clinit>";

/// A reference to a class
pub type ClassMetadataRc = Arc<ClassMetadata>;

/// A materialized class: identity, declared members in file order and the lazily
/// resolved generic view of its own signature.
///
/// Enclosing and nested classes are referenced by binary name and looked up through
/// the [`ClassRegistry`] on demand, so no ownership cycles exist between classes.
#[derive(Debug)]
pub struct ClassMetadata {
    name: String,
    flags: AccessFlags,
    super_class: Option<String>,
    interfaces: Vec<String>,
    signature: Option<String>,
    enclosing_class: Option<String>,
    enclosing_method: Option<EnclosingMethod>,
    fields: Vec<FieldInfoRc>,
    methods: Vec<MethodInfoRc>,
    constructors: Vec<MethodInfoRc>,
    nested_classes: Vec<String>,
    generics: OnceLock<GenericView<ClassGenerics>>,
}

impl ClassMetadata {
    /// Materialize a class from its definition
    ///
    /// ## Arguments
    /// * 'definition' - The class as handed over by the store
    ///
    /// # Errors
    /// Returns [`crate::Error::MalformedDescriptor`] if a member descriptor is invalid.
    pub fn from_definition(definition: ClassDefinition) -> Result<Self> {
        let is_interface = definition.flags.is_interface();
        let fields = definition
            .fields
            .into_iter()
            .map(|field| FieldInfo::from_definition(&definition.name, field).map(Arc::new))
            .collect::<Result<Vec<_>>>()?;
        let mut methods = Vec::new();
        let mut constructors = Vec::new();
        for method in definition.methods {
            // static initializers are not reflectable
            if method.name == STATIC_INITIALIZER {
                continue;
            }
            let method = Arc::new(MethodInfo::from_definition(&definition.name, is_interface, method)?);
            if method.is_constructor() {
                constructors.push(method);
            } else {
                methods.push(method);
            }
        }

        Ok(ClassMetadata {
            name: definition.name,
            flags: definition.flags,
            super_class: definition.super_class,
            interfaces: definition.interfaces,
            signature: definition.signature,
            enclosing_class: definition.enclosing_class,
            enclosing_method: definition.enclosing_method,
            fields,
            methods,
            constructors,
            nested_classes: definition.nested_classes,
            generics: OnceLock::new(),
        })
    }

    /// Binary name, e.g. `java.util.HashMap$Node`
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The simple name, everything after the last `.` or `$`
    #[must_use]
    pub fn simple_name(&self) -> &str {
        self.name
            .rfind(['.', '$'])
            .map_or(self.name.as_str(), |index| &self.name[index + 1..])
    }

    /// Raw access flags
    #[must_use]
    pub fn flags(&self) -> AccessFlags {
        self.flags
    }

    /// Returns `true` for interfaces
    #[must_use]
    pub fn is_interface(&self) -> bool {
        self.flags.is_interface()
    }

    /// Binary name of the direct superclass
    #[must_use]
    pub fn super_class(&self) -> Option<&str> {
        self.super_class.as_deref()
    }

    /// Binary names of the direct super interfaces
    #[must_use]
    pub fn interfaces(&self) -> &[String] {
        &self.interfaces
    }

    /// The raw `Signature` attribute
    #[must_use]
    pub fn signature(&self) -> Option<&str> {
        self.signature.as_deref()
    }

    /// Binary name of the lexically enclosing class
    #[must_use]
    pub fn enclosing_class_name(&self) -> Option<&str> {
        self.enclosing_class.as_deref()
    }

    /// The method a local class is declared in
    #[must_use]
    pub fn enclosing_method(&self) -> Option<&EnclosingMethod> {
        self.enclosing_method.as_ref()
    }

    /// The lexically enclosing class
    ///
    /// # Errors
    /// Returns [`crate::Error::ClassNotFound`] if the store does not have it.
    pub fn enclosing_class(&self, registry: &ClassRegistry) -> Result<Option<ClassMetadataRc>> {
        self.enclosing_class
            .as_deref()
            .map(|name| registry.get(name))
            .transpose()
    }

    /// This class as the declaration site of its type parameters
    #[must_use]
    pub fn owner(&self) -> GenericDeclaration {
        GenericDeclaration::Class(self.name.clone())
    }

    /// Declared fields in file order
    #[must_use]
    pub fn declared_fields(&self) -> &[FieldInfoRc] {
        &self.fields
    }

    /// Declared methods in file order, constructors and static initializers excluded
    #[must_use]
    pub fn declared_methods(&self) -> &[MethodInfoRc] {
        &self.methods
    }

    /// Declared constructors in file order
    #[must_use]
    pub fn declared_constructors(&self) -> &[MethodInfoRc] {
        &self.constructors
    }

    /// Find a declared constructor by erased descriptor
    #[must_use]
    pub fn declared_constructor(&self, descriptor: &str) -> Option<&MethodInfoRc> {
        self.constructors
            .iter()
            .find(|constructor| constructor.descriptor() == descriptor)
    }

    /// Binary names of declared member classes in file order
    #[must_use]
    pub fn declared_nested_class_names(&self) -> &[String] {
        &self.nested_classes
    }

    /// Declared member classes in file order
    ///
    /// # Errors
    /// Returns [`crate::Error::ClassNotFound`] if any of them is missing from the store.
    pub fn declared_nested_classes(&self, registry: &ClassRegistry) -> Result<Vec<ClassMetadataRc>> {
        self.nested_classes
            .iter()
            .map(|name| registry.get(name))
            .collect()
    }

    /// Find a declared field by name
    #[must_use]
    pub fn declared_field(&self, name: &str) -> Option<&FieldInfoRc> {
        self.fields.iter().find(|field| field.name() == name)
    }

    /// Find a declared method by name and erased descriptor
    #[must_use]
    pub fn declared_method(&self, name: &str, descriptor: &str) -> Option<&MethodInfoRc> {
        self.methods
            .iter()
            .find(|method| method.name() == name && method.descriptor() == descriptor)
    }

    /// All declared overloads of a method name, in file order
    pub fn declared_methods_named<'a>(
        &'a self,
        name: &'a str,
    ) -> impl Iterator<Item = &'a MethodInfoRc> + 'a {
        self.methods.iter().filter(move |method| method.name() == name)
    }

    /// The generic view of this class's own signature, computed on first use
    ///
    /// ## Arguments
    /// * 'registry' - The registry this class lives in
    ///
    /// # Errors
    /// Returns an error if an enclosing class cannot be loaded, the enclosing chain is
    /// too deep, or a type variable is not declared by any scope.
    pub fn generics(&self, registry: &ClassRegistry) -> Result<&GenericView<ClassGenerics>> {
        if let Some(view) = self.generics.get() {
            return Ok(view);
        }

        let enclosing = registry.enclosing_scope(self)?;
        self.generics_in(registry, &enclosing)
    }

    pub(crate) fn generics_in(
        &self,
        registry: &ClassRegistry,
        enclosing: &ScopeChain,
    ) -> Result<&GenericView<ClassGenerics>> {
        compute_or_fetch(&self.generics, &self.name, || {
            let Some(signature) = &self.signature else {
                return Ok(GenericView::Erased);
            };

            let parsed = match SignatureParser::new(signature)
                .with_max_depth(registry.config().max_signature_depth)
                .parse_class_signature()
            {
                Ok(parsed) => parsed,
                Err(err) => {
                    warn!(
                        class = %self.name,
                        signature = %signature,
                        "malformed class signature, falling back to erased types: {err}"
                    );
                    return Ok(GenericView::Degraded(err));
                }
            };

            match ScopeResolver::class_generics(&parsed, &self.name, enclosing) {
                Ok(generics) => Ok(GenericView::Generic(Arc::new(generics))),
                Err(err) => {
                    if let Some(cause) = enclosing.miss_cause(&err) {
                        warn!(
                            class = %self.name,
                            "class signature uses variables of a malformed enclosing declaration: {cause}"
                        );
                        return Ok(GenericView::Degraded(cause.clone()));
                    }
                    error!(class = %self.name, "{err}");
                    Err(err)
                }
            }
        })
    }

    fn usable<'a>(&'a self, registry: &ClassRegistry) -> Result<Option<&'a ClassGenerics>> {
        self.generics(registry)?.usable(registry.config())
    }

    /// Formal type parameters declared by this class
    ///
    /// # Errors
    /// See [`ClassMetadata::generics`]; under a strict fallback policy a malformed
    /// signature is reported as its syntax error.
    pub fn type_parameters(&self, registry: &ClassRegistry) -> Result<&[TypeParameterDeclaration]> {
        Ok(match self.usable(registry)? {
            Some(generics) => generics.type_parameters.as_slice(),
            None => &[],
        })
    }

    /// The generic superclass as a type node.
    ///
    /// Absent for interfaces and for classes without a superclass.
    ///
    /// # Errors
    /// See [`ClassMetadata::type_parameters`].
    pub fn generic_superclass_type(&self, registry: &ClassRegistry) -> Result<Option<TypeNode>> {
        let Some(super_class) = &self.super_class else {
            return Ok(None);
        };
        if self.is_interface() {
            return Ok(None);
        }

        Ok(Some(match self.usable(registry)? {
            Some(generics) => generics.superclass.clone(),
            None => TypeNode::raw(super_class),
        }))
    }

    /// The generic super interfaces as type nodes, in declaration order
    ///
    /// # Errors
    /// See [`ClassMetadata::type_parameters`].
    pub fn generic_interface_types(&self, registry: &ClassRegistry) -> Result<Vec<TypeNode>> {
        Ok(match self.usable(registry)? {
            Some(generics) => generics.interfaces.clone(),
            None => self.interfaces.iter().map(|name| TypeNode::raw(name)).collect(),
        })
    }

    /// The generic superclass rendered as the reflective API prints it: a raw class
    /// prints as `class X`, a parameterized one as `X<A, B>`
    ///
    /// # Errors
    /// See [`ClassMetadata::type_parameters`].
    pub fn generic_superclass(&self, registry: &ClassRegistry) -> Result<Option<String>> {
        Ok(self
            .generic_superclass_type(registry)?
            .map(|node| registry.render_type(&node)))
    }

    /// The generic super interfaces rendered as the reflective API prints them, e.g.
    /// `["java.util.Map<K, V>", "interface java.lang.Cloneable"]`
    ///
    /// # Errors
    /// See [`ClassMetadata::type_parameters`].
    pub fn generic_interfaces(&self, registry: &ClassRegistry) -> Result<Vec<String>> {
        Ok(self
            .generic_interface_types(registry)?
            .iter()
            .map(|node| registry.render_type(node))
            .collect())
    }

    /// Render the class with its generic declaration, e.g.
    /// `public class java.util.HashMap<K,V>`
    ///
    /// # Errors
    /// See [`ClassMetadata::type_parameters`].
    pub fn to_generic_string(&self, registry: &ClassRegistry) -> Result<String> {
        let mut out = String::new();
        let mut modifiers = self.flags & CLASS_MODIFIERS;
        // implicit on interfaces
        if self.is_interface() {
            modifiers.remove(AccessFlags::ABSTRACT);
        }
        if !modifiers.is_empty() {
            out.push_str(&modifiers.modifier_string());
            out.push(' ');
        }
        out.push_str(if self.is_interface() { "interface " } else { "class " });
        out.push_str(&self.name);

        let type_parameters = self.type_parameters(registry)?;
        if !type_parameters.is_empty() {
            let params = type_parameters
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>();
            out.push('<');
            out.push_str(&params.join(","));
            out.push('>');
        }
        Ok(out)
    }
}

impl fmt::Display for ClassMetadata {
    /// `class X` or `interface X`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_interface() {
            write!(f, "interface {}", self.name)
        } else {
            write!(f, "class {}", self.name)
        }
    }
}
