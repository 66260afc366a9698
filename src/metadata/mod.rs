//! Generic type metadata for JVM classes.
//!
//! This module contains the signature decoding, scope resolution and reflective
//! rendering infrastructure, together with the class registry that ties them to an
//! external class metadata store.
//!
//! # Key Components
//!
//! - [`signatures`] - Generic signature and erased descriptor parsing
//! - [`typesystem`] - Scope-resolved type trees, scope chains and rendering
//! - [`classes`] - Classes, fields and methods with their cached generic views
//! - [`store`] - The class source seam and the concurrent class registry
//!
//! # Examples
//!
//! ```rust
//! use std::sync::Arc;
//! use sigscope::metadata::{
//!     classes::AccessFlags,
//!     store::{ClassDefinitionBuilder, ClassRegistry, FieldDefinition, MemoryClassSource},
//! };
//!
//! let source = MemoryClassSource::new();
//! source.insert(
//!     ClassDefinitionBuilder::new("java/util/AbstractMap$SimpleEntry")
//!         .signature("<K:Ljava/lang/Object;V:Ljava/lang/Object;>Ljava/lang/Object;")
//!         .field(
//!             FieldDefinition::new("value", "Ljava/lang/Object;", AccessFlags::PRIVATE)
//!                 .with_signature("TV;"),
//!         )
//!         .build()?,
//! );
//!
//! let registry = ClassRegistry::new(Arc::new(source));
//! let entry = registry.get("java.util.AbstractMap$SimpleEntry")?;
//! let value = entry.declared_field("value").unwrap();
//! assert_eq!(
//!     value.to_generic_string(&registry)?,
//!     "private V java.util.AbstractMap$SimpleEntry.value"
//! );
//! # Ok::<(), sigscope::Error>(())
//! ```

/// Implementation of classes, fields and methods
pub mod classes;
/// Implementation of generic signatures and erased descriptors
pub mod signatures;
/// Implementation of the class source and registry
pub mod store;
/// Implementation of the resolved type model
pub mod typesystem;
