//! Generic signature parsing for JVM class metadata.
//!
//! This module parses the `Signature` attribute payloads attached to classes,
//! fields and methods (JVMS 4.7.9.1), plus the erased descriptors every member
//! carries (JVMS 4.3). Signatures encode parameterized type information that
//! erasure drops: type parameters, type arguments, wildcards and type variables.
//!
//! # Signature Types
//!
//! - **Class Signatures** - Type parameters, generic superclass and super interfaces
//! - **Method Signatures** - Type parameters, parameter/return types and thrown types
//! - **Field Signatures** - A single reference type
//!
//! # Text Format
//!
//! - Class types are `L` + `/`-separated name + optional `<...>` + `;`
//! - Member classes of parameterized owners are written `Outer<..>.Inner`
//! - Type variables are `T` + name + `;`
//! - Arrays are prefixed with one `[` per dimension
//! - Type arguments are `*`, `+X`, `-X` or a plain reference type
//!
//! # Examples
//!
//! ```rust
//! use sigscope::metadata::signatures::{parse, ParsedSignature, SignatureKind};
//!
//! let parsed = parse("(TV;)TV;", SignatureKind::Method)?;
//! if let ParsedSignature::Method(method) = parsed {
//!     assert_eq!(method.params.len(), 1);
//! }
//! # Ok::<(), sigscope::Error>(())
//! ```
//!
//! # References
//!
//! - The Java Virtual Machine Specification, Section 4.7.9.1 - Signatures
//! - The Java Virtual Machine Specification, Section 4.3 - Descriptors

mod descriptor;
mod parser;
mod types;

pub use descriptor::{parse_field_descriptor, parse_method_descriptor, MethodDescriptor};
pub use parser::*;
pub use types::*;

use crate::Result;

/// Parse a `ClassSignature` from a string
///
/// ## Arguments
/// * 'data' - The raw signature
///
/// # Errors
/// Returns an error if the signature is malformed
pub fn parse_class_signature(data: &str) -> Result<SignatureClass> {
    let mut parser = SignatureParser::new(data);
    parser.parse_class_signature()
}

/// Parse a `MethodSignature` from a string
///
/// ## Arguments
/// * 'data' - The raw signature
///
/// # Errors
/// Returns an error if the signature is malformed
pub fn parse_method_signature(data: &str) -> Result<SignatureMethod> {
    let mut parser = SignatureParser::new(data);
    parser.parse_method_signature()
}

/// Parse a `FieldSignature` from a string
///
/// ## Arguments
/// * 'data' - The raw signature
///
/// # Errors
/// Returns an error if the signature is malformed
pub fn parse_field_signature(data: &str) -> Result<SignatureField> {
    let mut parser = SignatureParser::new(data);
    parser.parse_field_signature()
}

/// Parse a raw signature with the grammar production selected by `kind`
///
/// ## Arguments
/// * 'data' - The raw signature
/// * 'kind' - Which member the signature belongs to
///
/// # Errors
/// Returns an error if the signature is malformed
pub fn parse(data: &str, kind: SignatureKind) -> Result<ParsedSignature> {
    parse_with_depth(data, kind, MAX_RECURSION_DEPTH)
}

/// Like [`parse`], with an explicit nesting limit
///
/// ## Arguments
/// * 'data'      - The raw signature
/// * 'kind'      - Which member the signature belongs to
/// * 'max_depth' - Maximum nesting of arrays and type arguments
///
/// # Errors
/// Returns an error if the signature is malformed or nested too deeply
pub fn parse_with_depth(data: &str, kind: SignatureKind, max_depth: usize) -> Result<ParsedSignature> {
    let mut parser = SignatureParser::new(data).with_max_depth(max_depth);
    match kind {
        SignatureKind::Class => parser.parse_class_signature().map(ParsedSignature::Class),
        SignatureKind::Field => parser.parse_field_signature().map(ParsedSignature::Field),
        SignatureKind::Method => parser.parse_method_signature().map(ParsedSignature::Method),
    }
}
