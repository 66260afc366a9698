//! The seam to the external class metadata store.
//!
//! # Key Components
//!
//! - [`ClassSource`]: Trait an external store implements to hand out [`ClassDefinition`]s
//! - [`MemoryClassSource`]: Concurrent in-memory [`ClassSource`]
//! - [`ClassDefinitionBuilder`]: Fluent construction of class definitions
//! - [`ClassRegistry`]: Lazily materialized, name-keyed [`crate::metadata::classes::ClassMetadata`]
//!
//! # Examples
//!
//! ```rust
//! use std::sync::Arc;
//! use sigscope::metadata::{
//!     classes::AccessFlags,
//!     store::{ClassDefinitionBuilder, ClassRegistry, MemoryClassSource, MethodDefinition},
//! };
//!
//! let source = MemoryClassSource::new();
//! source.insert(
//!     ClassDefinitionBuilder::new("java/util/Map$Entry")
//!         .interface()
//!         .signature("<K:Ljava/lang/Object;V:Ljava/lang/Object;>Ljava/lang/Object;")
//!         .method(
//!             MethodDefinition::new(
//!                 "setValue",
//!                 "(Ljava/lang/Object;)Ljava/lang/Object;",
//!                 AccessFlags::PUBLIC | AccessFlags::ABSTRACT,
//!             )
//!             .with_signature("(TV;)TV;"),
//!         )
//!         .build()?,
//! );
//!
//! let registry = ClassRegistry::new(Arc::new(source));
//! let entry = registry.get("java.util.Map$Entry")?;
//! let set_value = &entry.declared_methods()[0];
//! assert_eq!(set_value.generic_return_type(&registry)?.to_string(), "V");
//! # Ok::<(), sigscope::Error>(())
//! ```

mod builder;
mod registry;
mod source;

pub use builder::ClassDefinitionBuilder;
pub use registry::ClassRegistry;
pub use source::{
    binary_name, ClassDefinition, ClassSource, EnclosingMethod, FieldDefinition,
    MemoryClassSource, MethodDefinition,
};
