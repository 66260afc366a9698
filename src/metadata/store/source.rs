use dashmap::DashMap;

use crate::{metadata::classes::AccessFlags, Error::ClassNotFound, Result};

/// Normalize an internal name (`java/util/HashMap`) to a binary name (`java.util.HashMap`)
#[must_use]
pub fn binary_name(name: &str) -> String {
    name.replace('/', ".")
}

/// A declared field as the class metadata store hands it over
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDefinition {
    /// Simple field name
    pub name: String,
    /// Erased field descriptor, e.g. `Ljava/lang/Object;`
    pub descriptor: String,
    /// Raw access flags
    pub flags: AccessFlags,
    /// Raw `Signature` attribute, absent for non-generic fields
    pub signature: Option<String>,
}

impl FieldDefinition {
    /// Create a field definition without a generic signature
    ///
    /// ## Arguments
    /// * 'name'       - The field name
    /// * 'descriptor' - The erased field descriptor
    /// * 'flags'      - The access flags
    #[must_use]
    pub fn new(name: impl Into<String>, descriptor: impl Into<String>, flags: AccessFlags) -> Self {
        FieldDefinition {
            name: name.into(),
            descriptor: descriptor.into(),
            flags,
            signature: None,
        }
    }

    /// Attach a raw generic signature
    ///
    /// ## Arguments
    /// * 'signature' - The `Signature` attribute text
    #[must_use]
    pub fn with_signature(mut self, signature: impl Into<String>) -> Self {
        self.signature = Some(signature.into());
        self
    }
}

/// A declared method or constructor as the class metadata store hands it over
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDefinition {
    /// Method name, `<init>` for constructors
    pub name: String,
    /// Erased method descriptor, e.g. `(Ljava/lang/Object;)Ljava/lang/Object;`
    pub descriptor: String,
    /// Raw access flags
    pub flags: AccessFlags,
    /// Raw `Signature` attribute, absent for non-generic methods
    pub signature: Option<String>,
    /// Binary names from the `Exceptions` attribute, in declaration order
    pub exceptions: Vec<String>,
}

impl MethodDefinition {
    /// Create a method definition without a generic signature
    ///
    /// ## Arguments
    /// * 'name'       - The method name
    /// * 'descriptor' - The erased method descriptor
    /// * 'flags'      - The access flags
    #[must_use]
    pub fn new(name: impl Into<String>, descriptor: impl Into<String>, flags: AccessFlags) -> Self {
        MethodDefinition {
            name: name.into(),
            descriptor: descriptor.into(),
            flags,
            signature: None,
            exceptions: Vec::new(),
        }
    }

    /// Attach a raw generic signature
    ///
    /// ## Arguments
    /// * 'signature' - The `Signature` attribute text
    #[must_use]
    pub fn with_signature(mut self, signature: impl Into<String>) -> Self {
        self.signature = Some(signature.into());
        self
    }

    /// Declare the erased thrown types
    ///
    /// ## Arguments
    /// * 'exceptions' - Internal or binary class names
    #[must_use]
    pub fn with_exceptions<I, S>(mut self, exceptions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.exceptions = exceptions
            .into_iter()
            .map(|name| binary_name(name.as_ref()))
            .collect();
        self
    }
}

/// The method a local or anonymous class is declared in (`EnclosingMethod` attribute)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EnclosingMethod {
    /// Method name
    pub name: String,
    /// Erased method descriptor
    pub descriptor: String,
}

/// Everything the registry needs to know about one class
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDefinition {
    /// Binary name, e.g. `java.util.HashMap$Node`
    pub name: String,
    /// Raw access flags
    pub flags: AccessFlags,
    /// Binary name of the direct superclass, absent for `java.lang.Object`
    pub super_class: Option<String>,
    /// Binary names of the direct super interfaces, in declaration order
    pub interfaces: Vec<String>,
    /// Raw `Signature` attribute, absent for non-generic classes
    pub signature: Option<String>,
    /// Binary name of the lexically enclosing class
    pub enclosing_class: Option<String>,
    /// Enclosing method of a local or anonymous class
    pub enclosing_method: Option<EnclosingMethod>,
    /// Declared fields in file order
    pub fields: Vec<FieldDefinition>,
    /// Declared methods in file order
    pub methods: Vec<MethodDefinition>,
    /// Binary names of declared member classes in file order
    pub nested_classes: Vec<String>,
}

/// The seam to an external class metadata store.
///
/// Implementations hand out definitions by binary name. The registry calls `load`
/// at most once per successfully materialized class, but may call it concurrently.
pub trait ClassSource: Send + Sync {
    /// Load the definition of a class
    ///
    /// ## Arguments
    /// * 'name' - Binary name of the class
    ///
    /// # Errors
    /// Returns [`crate::Error::ClassNotFound`] if the store has no such class.
    fn load(&self, name: &str) -> Result<ClassDefinition>;
}

/// An in-memory [`ClassSource`]
#[derive(Debug, Default)]
pub struct MemoryClassSource {
    classes: DashMap<String, ClassDefinition>,
}

impl MemoryClassSource {
    /// Create an empty source
    #[must_use]
    pub fn new() -> Self {
        MemoryClassSource {
            classes: DashMap::new(),
        }
    }

    /// Add or replace a class definition
    ///
    /// ## Arguments
    /// * 'definition' - The class to store
    pub fn insert(&self, definition: ClassDefinition) {
        self.classes.insert(definition.name.clone(), definition);
    }

    /// Remove a class definition, returning it if present
    ///
    /// ## Arguments
    /// * 'name' - Binary name of the class
    pub fn remove(&self, name: &str) -> Option<ClassDefinition> {
        self.classes.remove(name).map(|(_, definition)| definition)
    }

    /// Number of stored classes
    #[must_use]
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Returns `true` if no classes are stored
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Binary names of all stored classes, sorted
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.classes.iter().map(|entry| entry.key().clone()).collect();
        names.sort();
        names
    }
}

impl FromIterator<ClassDefinition> for MemoryClassSource {
    fn from_iter<I: IntoIterator<Item = ClassDefinition>>(iter: I) -> Self {
        let source = MemoryClassSource::new();
        for definition in iter {
            source.insert(definition);
        }
        source
    }
}

impl ClassSource for MemoryClassSource {
    fn load(&self, name: &str) -> Result<ClassDefinition> {
        self.classes
            .get(name)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| ClassNotFound(name.to_string()))
    }
}
