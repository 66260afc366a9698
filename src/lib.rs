// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![warn(missing_docs)]

//! # sigscope
//!
//! Generic signature decoding, type-variable scope resolution and reflective type
//! rendering for JVM class metadata.
//!
//! Every class, field and method in a class file may carry a `Signature` attribute: a
//! compact string that records the generic types erasure removed. `sigscope` parses
//! those strings, binds each type variable to the class or method that declares it,
//! and renders the result exactly the way the reflective Java API prints it.
//!
//! ## Features
//!
//! - **Signature parsing** - Class, method and field signatures per JVMS 4.7.9.1,
//!   with byte offsets on every syntax error
//! - **Scope resolution** - Method scopes shadow class scopes, which shadow enclosing
//!   methods and enclosing classes
//! - **Reflective rendering** - `getGenericInterfaces`, `toGenericString` and friends,
//!   character for character
//! - **Lazy, concurrent caching** - Each member's generic view is computed once and
//!   shared across threads
//!
//! ## Quick Start
//!
//! ```rust
//! use sigscope::prelude::*;
//! use std::sync::Arc;
//!
//! let source = MemoryClassSource::new();
//! source.insert(
//!     ClassDefinitionBuilder::new("java/util/HashMap")
//!         .signature(
//!             "<K:Ljava/lang/Object;V:Ljava/lang/Object;>Ljava/util/AbstractMap<TK;TV;>;\
//!              Ljava/util/Map<TK;TV;>;Ljava/lang/Cloneable;",
//!         )
//!         .superclass("java/util/AbstractMap")
//!         .implements("java/util/Map")
//!         .implements("java/lang/Cloneable")
//!         .build()?,
//! );
//! source.insert(ClassDefinitionBuilder::new("java/lang/Cloneable").interface().build()?);
//!
//! let registry = ClassRegistry::new(Arc::new(source));
//! let hash_map = registry.get("java.util.HashMap")?;
//!
//! assert_eq!(
//!     hash_map.generic_superclass(&registry)?.as_deref(),
//!     Some("java.util.AbstractMap<K, V>")
//! );
//! assert_eq!(
//!     render_list(hash_map.generic_interfaces(&registry)?),
//!     "[java.util.Map<K, V>, interface java.lang.Cloneable]"
//! );
//! # Ok::<(), sigscope::Error>(())
//! ```
//!
//! ## Architecture
//!
//! - [`prelude`] - Convenient re-exports of commonly used types
//! - [`metadata::signatures`] - Signature and descriptor parsing
//! - [`metadata::typesystem`] - Resolved type trees, scope chains and rendering
//! - [`metadata::classes`] - Reflective view of classes and members
//! - [`metadata::store`] - Class source seam and concurrent registry
//! - [`config`] - Fallback policy for malformed signatures
//! - [`Error`] and [`Result`] - Error handling
//!
//! ## Logging
//!
//! The crate emits [`tracing`] events and installs no subscriber: `debug` when classes
//! are materialized and generic views published, `warn` when a malformed signature
//! degrades a member to its erased types, `error` when a type variable has no
//! declaring scope.

#[macro_use]
pub(crate) mod error;

/// Configuration of signature fallback and limits
pub mod config;
/// Metadata model: signatures, type system, classes and the class store
pub mod metadata;
mod parser;
/// Commonly used types
pub mod prelude;

pub use config::{ReflectionConfig, SignatureFallback};
pub use error::{Error, Expected};
pub use parser::Parser;

/// `sigscope` Result type
///
/// A type alias for `std::result::Result<T, Error>` where the error type is always [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
