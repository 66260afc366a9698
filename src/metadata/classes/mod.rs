//! Reflective view of materialized classes and their declared members.
//!
//! A [`ClassMetadata`] owns its declared fields and methods in file order. Each of
//! the three member kinds carries a lazily computed [`GenericView`] over its raw
//! signature, published once and shared for the lifetime of the class.
//!
//! # Key Components
//!
//! - [`ClassMetadata`]: Class identity, members and generic superclass/interfaces
//! - [`FieldInfo`]: Erased and generic field type, `toString`/`toGenericString` forms
//! - [`MethodInfo`]: Erased and generic parameter, return and thrown types
//! - [`GenericView`]: Erased, resolved, or degraded outcome of a signature
//! - [`AccessFlags`]: Raw JVM access flags and modifier rendering

mod class;
mod field;
pub mod flags;
mod method;
mod view;

pub use class::{ClassMetadata, ClassMetadataRc};
pub use field::{FieldInfo, FieldInfoRc};
pub use flags::AccessFlags;
pub use method::{MethodInfo, MethodInfoRc};
pub use view::GenericView;

pub(crate) use view::compute_or_fetch;
