//! Fluent construction of [`ClassDefinition`]s.

use crate::{
    metadata::{
        classes::AccessFlags,
        signatures::{parse_field_descriptor, parse_method_descriptor},
        store::{binary_name, ClassDefinition, EnclosingMethod, FieldDefinition, MethodDefinition},
    },
    Result,
};

/// Builder for [`ClassDefinition`]s.
///
/// Names may be given in internal (`java/util/HashMap`) or binary form; they are
/// stored in binary form. Members keep the order they were added in.
///
/// # Examples
///
/// ```rust
/// use sigscope::metadata::{
///     classes::AccessFlags,
///     store::{ClassDefinitionBuilder, FieldDefinition},
/// };
///
/// let entry = ClassDefinitionBuilder::new("java/util/AbstractMap$SimpleEntry")
///     .flags(AccessFlags::PUBLIC | AccessFlags::STATIC)
///     .signature("<K:Ljava/lang/Object;V:Ljava/lang/Object;>Ljava/lang/Object;")
///     .enclosing_class("java.util.AbstractMap")
///     .field(
///         FieldDefinition::new("value", "Ljava/lang/Object;", AccessFlags::PRIVATE)
///             .with_signature("TV;"),
///     )
///     .build()?;
///
/// assert_eq!(entry.name, "java.util.AbstractMap$SimpleEntry");
/// assert_eq!(entry.super_class.as_deref(), Some("java.lang.Object"));
/// # Ok::<(), sigscope::Error>(())
/// ```
pub struct ClassDefinitionBuilder {
    name: String,
    flags: AccessFlags,
    super_class: Option<String>,
    no_super_class: bool,
    interfaces: Vec<String>,
    signature: Option<String>,
    enclosing_class: Option<String>,
    enclosing_method: Option<EnclosingMethod>,
    fields: Vec<FieldDefinition>,
    methods: Vec<MethodDefinition>,
    nested_classes: Vec<String>,
}

impl ClassDefinitionBuilder {
    /// Creates a new builder for the named class.
    ///
    /// The class defaults to a public class extending `java.lang.Object`.
    ///
    /// ## Arguments
    /// * 'name' - Internal or binary class name
    #[must_use]
    pub fn new(name: &str) -> Self {
        ClassDefinitionBuilder {
            name: binary_name(name),
            flags: AccessFlags::PUBLIC | AccessFlags::SUPER,
            super_class: None,
            no_super_class: false,
            interfaces: Vec::new(),
            signature: None,
            enclosing_class: None,
            enclosing_method: None,
            fields: Vec::new(),
            methods: Vec::new(),
            nested_classes: Vec::new(),
        }
    }

    /// Sets the access flags.
    #[must_use]
    pub fn flags(mut self, flags: AccessFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Marks the class as a public abstract interface.
    #[must_use]
    pub fn interface(mut self) -> Self {
        self.flags = AccessFlags::PUBLIC | AccessFlags::INTERFACE | AccessFlags::ABSTRACT;
        self
    }

    /// Sets the direct superclass.
    ///
    /// ## Arguments
    /// * 'name' - Internal or binary class name
    #[must_use]
    pub fn superclass(mut self, name: &str) -> Self {
        self.super_class = Some(binary_name(name));
        self.no_super_class = false;
        self
    }

    /// Declares that the class has no superclass, as `java.lang.Object` does.
    #[must_use]
    pub fn root(mut self) -> Self {
        self.super_class = None;
        self.no_super_class = true;
        self
    }

    /// Appends a direct super interface.
    ///
    /// ## Arguments
    /// * 'name' - Internal or binary interface name
    #[must_use]
    pub fn implements(mut self, name: &str) -> Self {
        self.interfaces.push(binary_name(name));
        self
    }

    /// Sets the raw class signature.
    #[must_use]
    pub fn signature(mut self, signature: impl Into<String>) -> Self {
        self.signature = Some(signature.into());
        self
    }

    /// Sets the lexically enclosing class.
    ///
    /// ## Arguments
    /// * 'name' - Internal or binary class name
    #[must_use]
    pub fn enclosing_class(mut self, name: &str) -> Self {
        self.enclosing_class = Some(binary_name(name));
        self
    }

    /// Sets the method a local class is declared in. The method belongs to the
    /// enclosing class.
    ///
    /// ## Arguments
    /// * 'name'       - The method name
    /// * 'descriptor' - The erased method descriptor
    #[must_use]
    pub fn enclosing_method(mut self, name: &str, descriptor: &str) -> Self {
        self.enclosing_method = Some(EnclosingMethod {
            name: name.to_string(),
            descriptor: descriptor.to_string(),
        });
        self
    }

    /// Appends a declared field.
    #[must_use]
    pub fn field(mut self, field: FieldDefinition) -> Self {
        self.fields.push(field);
        self
    }

    /// Appends a declared method.
    #[must_use]
    pub fn method(mut self, method: MethodDefinition) -> Self {
        self.methods.push(method);
        self
    }

    /// Appends a declared member class.
    ///
    /// ## Arguments
    /// * 'name' - Internal or binary class name
    #[must_use]
    pub fn nested(mut self, name: &str) -> Self {
        self.nested_classes.push(binary_name(name));
        self
    }

    /// Builds the definition.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The class name is empty
    /// - An enclosing method is set without an enclosing class
    /// - A field or method descriptor is malformed
    pub fn build(self) -> Result<ClassDefinition> {
        if self.name.is_empty() {
            return Err(malformed_error!("Class name is required"));
        }

        if self.enclosing_method.is_some() && self.enclosing_class.is_none() {
            return Err(malformed_error!(
                "Class {} names an enclosing method but no enclosing class",
                self.name
            ));
        }

        for field in &self.fields {
            parse_field_descriptor(&field.descriptor)?;
        }
        for method in &self.methods {
            parse_method_descriptor(&method.descriptor)?;
        }
        if let Some(method) = &self.enclosing_method {
            parse_method_descriptor(&method.descriptor)?;
        }

        // interfaces and java.lang.Object itself have Object or nothing as superclass
        let super_class = match (self.super_class, self.no_super_class) {
            (_, true) => None,
            (Some(name), false) => Some(name),
            (None, false) if self.name == "java.lang.Object" => None,
            (None, false) => Some("java.lang.Object".to_string()),
        };

        Ok(ClassDefinition {
            name: self.name,
            flags: self.flags,
            super_class,
            interfaces: self.interfaces,
            signature: self.signature,
            enclosing_class: self.enclosing_class,
            enclosing_method: self.enclosing_method,
            fields: self.fields,
            methods: self.methods,
            nested_classes: self.nested_classes,
        })
    }
}
