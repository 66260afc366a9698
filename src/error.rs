use std::fmt;

use thiserror::Error;

macro_rules! malformed_error {
    // Single string version
    ($msg:expr) => {
        crate::Error::Malformed {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::Malformed {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

macro_rules! syntax_error {
    ($offset:expr, $expected:expr) => {
        crate::Error::SignatureSyntax {
            offset: $offset,
            expected: $expected,
        }
    };
}

/// The token class a signature parser was looking for when it gave up.
///
/// Carried by [`Error::SignatureSyntax`] together with the byte offset, so a
/// caller can point at the exact spot in the raw attribute string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    /// A specific literal character such as `;`, `>` or `(`
    Char(char),
    /// A (possibly package-qualified) identifier
    Identifier,
    /// Any Java type signature, primitives included
    TypeSignature,
    /// A class, type-variable or array signature
    ReferenceType,
    /// A class type signature starting with `L`
    ClassType,
    /// A type argument (`*`, `+X`, `-X` or a reference type)
    TypeArgument,
    /// A return type (`V` or a type signature)
    ReturnType,
    /// A class or type-variable signature after `^`
    ThrowsType,
    /// The end of the signature, nothing should follow
    EndOfInput,
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expected::Char(c) => write!(f, "'{c}'"),
            Expected::Identifier => f.write_str("identifier"),
            Expected::TypeSignature => f.write_str("type signature"),
            Expected::ReferenceType => f.write_str("reference type signature"),
            Expected::ClassType => f.write_str("class type signature"),
            Expected::TypeArgument => f.write_str("type argument"),
            Expected::ReturnType => f.write_str("return type"),
            Expected::ThrowsType => f.write_str("throws type"),
            Expected::EndOfInput => f.write_str("end of input"),
        }
    }
}

/// The generic Error type, which covers every failure this library can report.
///
/// # Error Categories
///
/// ## Signature Errors
/// - [`Error::SignatureSyntax`] - The raw generic signature does not follow the grammar
/// - [`Error::MalformedDescriptor`] - An erased field or method descriptor is invalid
/// - [`Error::RecursionLimit`] - Type nesting or enclosing-class chains are too deep
///
/// ## Resolution Errors
/// - [`Error::UnresolvedTypeVariable`] - A type variable is not declared in any scope level
///
/// ## Store Errors
/// - [`Error::ClassNotFound`] - The external class store does not know the requested class
///
/// # Examples
///
/// ```rust
/// use sigscope::{Error, metadata::signatures::parse_field_signature};
///
/// match parse_field_signature("Ljava/util/List<TE;") {
///     Err(Error::SignatureSyntax { offset, expected }) => {
///         println!("bad signature at {offset}, wanted {expected}");
///     }
///     other => println!("{other:?}"),
/// }
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A generic signature string is malformed.
    ///
    /// Raised for truncated input, unbalanced `<`/`>`, unknown primitive codes,
    /// empty identifiers and trailing garbage. The member owning the signature
    /// falls back to its erased type.
    #[error("Malformed signature at offset {offset} - expected {expected}")]
    SignatureSyntax {
        /// Byte offset into the raw signature where parsing failed
        offset: usize,
        /// The token class the parser was looking for
        expected: Expected,
    },

    /// A type variable is not declared by any level of its scope chain.
    ///
    /// This is an internal consistency fault (bad signature or bad enclosing
    /// information from the store), never papered over with `java.lang.Object`.
    #[error("Unresolved type variable - {name}")]
    UnresolvedTypeVariable {
        /// Name of the type variable that could not be bound
        name: String,
    },

    /// The external class store has no class with this name.
    #[error("Class not found in store - {0}")]
    ClassNotFound(String),

    /// An erased field or method descriptor could not be parsed.
    #[error("Malformed descriptor '{descriptor}' at offset {offset}")]
    MalformedDescriptor {
        /// The full descriptor string
        descriptor: String,
        /// Byte offset where parsing failed
        offset: usize,
    },

    /// Recursion limit reached.
    ///
    /// Enforced while parsing deeply nested signatures and while walking
    /// enclosing-class chains, which could otherwise cycle on bad store data.
    #[error("Reach the maximum recursion level allowed - {0}")]
    RecursionLimit(usize),

    /// Structurally invalid metadata handed in by the store.
    #[error("Malformed - {file}:{line}: {message}")]
    Malformed {
        /// The message to be printed for the Malformed error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },
}

impl Error {
    /// Returns `true` for errors that stem from a malformed signature string.
    ///
    /// Only these are eligible for the erased-type fallback; everything else is
    /// surfaced to the caller.
    #[must_use]
    pub fn is_syntax(&self) -> bool {
        matches!(
            self,
            Error::SignatureSyntax { .. } | Error::RecursionLimit(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syntax_error_display() {
        let err = syntax_error!(7, Expected::Char(';'));
        assert_eq!(
            err.to_string(),
            "Malformed signature at offset 7 - expected ';'"
        );
        assert!(err.is_syntax());
    }

    #[test]
    fn test_unresolved_is_not_syntax() {
        let err = Error::UnresolvedTypeVariable {
            name: "T".to_string(),
        };
        assert!(!err.is_syntax());
        assert_eq!(err.to_string(), "Unresolved type variable - T");
    }

    #[test]
    fn test_malformed_macro() {
        let err = malformed_error!("bad class {}", "Foo");
        match err {
            Error::Malformed { message, line, .. } => {
                assert_eq!(message, "bad class Foo");
                assert!(line > 0);
            }
            _ => panic!("expected malformed error"),
        }
    }
}
