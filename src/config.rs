//! Reflection configuration
//!
//! Controls how the registry treats members whose generic signature cannot be
//! decoded, and how deeply nested a signature may be before parsing gives up.

/// What the reflective accessors do when a member's generic signature is malformed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SignatureFallback {
    /// Report the erased descriptor type in place of the generic one
    #[default]
    Erase,
    /// Surface the syntax error from every accessor that would need the generic view
    Strict,
}

/// Configuration for a [`crate::metadata::store::ClassRegistry`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReflectionConfig {
    /// Policy for members whose signature fails to parse
    pub signature_fallback: SignatureFallback,

    /// Maximum nesting of arrays and type arguments inside one signature (default: 64).
    /// Also bounds the number of enclosing classes walked when building a scope chain.
    pub max_signature_depth: usize,
}

impl Default for ReflectionConfig {
    fn default() -> Self {
        Self {
            signature_fallback: SignatureFallback::Erase,
            max_signature_depth: 64,
        }
    }
}

impl ReflectionConfig {
    /// Creates the default configuration: malformed signatures degrade to erased types
    #[must_use]
    pub fn lenient() -> Self {
        Self::default()
    }

    /// Creates a configuration that reports malformed signatures as errors
    #[must_use]
    pub fn strict() -> Self {
        Self {
            signature_fallback: SignatureFallback::Strict,
            ..Self::default()
        }
    }

    /// Returns `true` if degraded members surface their error
    #[must_use]
    pub fn is_strict(&self) -> bool {
        self.signature_fallback == SignatureFallback::Strict
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        assert_eq!(ReflectionConfig::default(), ReflectionConfig::lenient());
        assert!(!ReflectionConfig::lenient().is_strict());

        let strict = ReflectionConfig::strict();
        assert!(strict.is_strict());
        assert_eq!(strict.max_signature_depth, 64);
    }
}
