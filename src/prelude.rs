//! # sigscope Prelude
//!
//! This module provides a convenient prelude for the most commonly used types from the
//! sigscope library. Import this module to get quick access to the essential types
//! for building a class registry and querying generic type information.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all sigscope operations
pub use crate::Error;

/// The result type used throughout sigscope
pub use crate::Result;

/// Configuration of the malformed signature fallback policy
pub use crate::{ReflectionConfig, SignatureFallback};

// ================================================================================================
// Class Store
// ================================================================================================

/// Class source seam, in-memory source and definitions
pub use crate::metadata::store::{
    ClassDefinition, ClassDefinitionBuilder, ClassRegistry, ClassSource, FieldDefinition,
    MemoryClassSource, MethodDefinition,
};

// ================================================================================================
// Reflective View
// ================================================================================================

/// Classes, fields and methods
pub use crate::metadata::classes::{
    AccessFlags, ClassMetadata, ClassMetadataRc, FieldInfo, FieldInfoRc, GenericView, MethodInfo,
    MethodInfoRc,
};

// ================================================================================================
// Signatures and Types
// ================================================================================================

/// Signature parsing entry points
pub use crate::metadata::signatures::{parse, ParsedSignature, SignatureKind};

/// Resolved type model and rendering
pub use crate::metadata::typesystem::{
    render, render_generic, render_list, GenericDeclaration, PrimitiveKind, ScopeChain,
    ScopeResolver, TypeNode, TypeParameterDeclaration,
};
