use std::sync::{Arc, OnceLock};

use tracing::debug;

use crate::{config::ReflectionConfig, Error, Result};

/// The outcome of decoding one member's generic signature.
///
/// A member without a signature attribute is [`GenericView::Erased`]; one whose
/// signature failed to parse is [`GenericView::Degraded`] and keeps the error. Both
/// fall back to the erased descriptor type when rendered leniently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenericView<T> {
    /// No signature attribute present
    Erased,
    /// The signature parsed and every type variable resolved
    Generic(Arc<T>),
    /// The signature is malformed
    Degraded(Error),
}

impl<T> GenericView<T> {
    /// The resolved generic information, if any
    #[must_use]
    pub fn generic(&self) -> Option<&Arc<T>> {
        match self {
            GenericView::Generic(generics) => Some(generics),
            GenericView::Erased | GenericView::Degraded(_) => None,
        }
    }

    /// Returns `true` if the member has no signature attribute
    #[must_use]
    pub fn is_erased(&self) -> bool {
        matches!(self, GenericView::Erased)
    }

    /// Returns `true` if the member's signature is malformed
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        matches!(self, GenericView::Degraded(_))
    }

    /// The parse error of a degraded member
    #[must_use]
    pub fn error(&self) -> Option<&Error> {
        match self {
            GenericView::Degraded(error) => Some(error),
            GenericView::Erased | GenericView::Generic(_) => None,
        }
    }

    /// The generic information a rendering accessor may use under `config`.
    ///
    /// ## Arguments
    /// * 'config' - The fallback policy in effect
    ///
    /// # Errors
    /// Returns the stored parse error of a degraded member under a strict policy.
    pub fn usable(&self, config: &ReflectionConfig) -> Result<Option<&T>> {
        match self {
            GenericView::Generic(generics) => Ok(Some(generics.as_ref())),
            GenericView::Erased => Ok(None),
            GenericView::Degraded(error) if config.is_strict() => Err(error.clone()),
            GenericView::Degraded(_) => Ok(None),
        }
    }
}

/// Return the cached value, or compute it and publish it into `cell`.
///
/// The computation runs outside the cell, so it may itself consult other cells
/// (and recurse through the registry) without holding any lock. Concurrent first
/// callers may compute redundantly; the first publication wins and every caller
/// gets that value. An error is returned without publishing anything.
pub(crate) fn compute_or_fetch<'a, T, F>(cell: &'a OnceLock<T>, what: &str, compute: F) -> Result<&'a T>
where
    F: FnOnce() -> Result<T>,
{
    if let Some(value) = cell.get() {
        return Ok(value);
    }

    let value = compute()?;
    let mut published = false;
    let winner = cell.get_or_init(|| {
        published = true;
        value
    });
    if published {
        debug!(member = what, "published generic view");
    }
    Ok(winner)
}
