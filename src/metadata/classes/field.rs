use std::{
    fmt,
    sync::{Arc, OnceLock},
};

use tracing::{error, warn};

use crate::{
    metadata::{
        classes::{
            compute_or_fetch,
            flags::{modifier_prefix, FIELD_MODIFIERS},
            AccessFlags, GenericView,
        },
        signatures::{parse_field_descriptor, SignatureParser},
        store::{ClassRegistry, FieldDefinition},
        typesystem::{FieldGenerics, ScopeChain, ScopeResolver, TypeNode},
    },
    Error, Result,
};

/// A reference to a field
pub type FieldInfoRc = Arc<FieldInfo>;

/// A declared field with its erased type and lazily resolved generic type
#[derive(Debug)]
pub struct FieldInfo {
    declaring_class: String,
    name: String,
    descriptor: String,
    flags: AccessFlags,
    signature: Option<String>,
    erased_type: TypeNode,
    generics: OnceLock<GenericView<FieldGenerics>>,
}

impl FieldInfo {
    /// Create a field from its definition
    ///
    /// ## Arguments
    /// * 'declaring_class' - Binary name of the declaring class
    /// * 'definition'      - The field as handed over by the store
    ///
    /// # Errors
    /// Returns [`crate::Error::MalformedDescriptor`] if the descriptor is invalid.
    pub fn from_definition(declaring_class: &str, definition: FieldDefinition) -> Result<Self> {
        let erased_type = parse_field_descriptor(&definition.descriptor)?;
        Ok(FieldInfo {
            declaring_class: declaring_class.to_string(),
            name: definition.name,
            descriptor: definition.descriptor,
            flags: definition.flags,
            signature: definition.signature,
            erased_type,
            generics: OnceLock::new(),
        })
    }

    /// The field name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Binary name of the declaring class
    #[must_use]
    pub fn declaring_class(&self) -> &str {
        &self.declaring_class
    }

    /// The erased descriptor
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

    /// The erased field type
    #[must_use]
    pub fn erased_type(&self) -> &TypeNode {
        &self.erased_type
    }

    /// The generic view of this field, computed on first use
    ///
    /// ## Arguments
    /// * 'registry' - The registry the declaring class lives in
    ///
    /// # Errors
    /// Returns an error if the declaring class or an enclosing class cannot be loaded,
    /// or if a type variable is not declared by any scope.
    pub fn generics(&self, registry: &ClassRegistry) -> Result<&GenericView<FieldGenerics>> {
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
    ) -> Result<&GenericView<FieldGenerics>> {
        compute_or_fetch(&self.generics, &self.name, || {
            let Some(signature) = &self.signature else {
                return Ok(GenericView::Erased);
            };

            let parsed = match SignatureParser::new(signature)
                .with_max_depth(registry.config().max_signature_depth)
                .parse_field_signature()
            {
                Ok(parsed) => parsed,
                Err(err) => {
                    warn!(
                        class = %self.declaring_class,
                        field = %self.name,
                        signature = %signature,
                        "malformed field signature, falling back to erased type: {err}"
                    );
                    return Ok(GenericView::Degraded(err));
                }
            };

            match ScopeResolver::field_generics(&parsed, scope) {
                Ok(generics) => Ok(GenericView::Generic(Arc::new(generics))),
                Err(err) => {
                    if let Some(cause) = scope.miss_cause(&err) {
                        warn!(
                            class = %self.declaring_class,
                            field = %self.name,
                            "field signature uses variables of a malformed enclosing declaration: {cause}"
                        );
                        return Ok(GenericView::Degraded(cause.clone()));
                    }
                    error!(class = %self.declaring_class, field = %self.name, "{err}");
                    Err(err)
                }
            }
        })
    }

    /// The generic type, or the erased type when no usable signature exists
    ///
    /// ## Arguments
    /// * 'registry' - The registry the declaring class lives in
    ///
    /// # Errors
    /// See [`FieldInfo::generics`]; under a strict fallback policy a malformed
    /// signature is reported as its syntax error.
    pub fn generic_type(&self, registry: &ClassRegistry) -> Result<TypeNode> {
        let view = self.generics(registry)?;
        Ok(match view.usable(registry.config())? {
            Some(generics) => generics.field_type.clone(),
            None => self.erased_type.clone(),
        })
    }

    /// Render the field with its generic type, e.g.
    /// `private V java.util.AbstractMap$SimpleEntry.value`
    ///
    /// ## Arguments
    /// * 'registry' - The registry the declaring class lives in
    ///
    /// # Errors
    /// See [`FieldInfo::generic_type`].
    pub fn to_generic_string(&self, registry: &ClassRegistry) -> Result<String> {
        let field_type = self.generic_type(registry)?;
        Ok(self.describe(&field_type))
    }

    fn describe(&self, field_type: &TypeNode) -> String {
        format!(
            "{}{} {}.{}",
            modifier_prefix(self.flags, FIELD_MODIFIERS, false),
            field_type,
            self.declaring_class,
            self.name
        )
    }

    /// The syntax error of a degraded signature, if it has been computed
    #[must_use]
    pub fn cached_error(&self) -> Option<&Error> {
        self.generics.get().and_then(GenericView::error)
    }
}

impl fmt::Display for FieldInfo {
    /// Render the field with its erased type, e.g.
    /// `private final java.lang.Object java.util.AbstractMap$SimpleEntry.key`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe(&self.erased_type))
    }
}
