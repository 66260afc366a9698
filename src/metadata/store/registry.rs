//! Concurrent, lazily populated class registry.
//!
//! The registry is the name-keyed home of every [`ClassMetadata`] a caller has
//! asked for. Classes are materialized from the [`ClassSource`] on first request
//! and published into a lock-free skip list; concurrent first requests for the same
//! class may both load it, but only the first insert becomes visible.
//!
//! # Scope Chains
//!
//! Type variables are looked up innermost first:
//!
//! 1. the member method's own type parameters
//! 2. the declaring class's type parameters
//! 3. the enclosing method's type parameters, for local and anonymous classes
//! 4. each lexically enclosing class, outward
//!
//! The registry assembles levels 2 to 4 on demand, walking enclosing classes by
//! name; the walk is bounded by [`ReflectionConfig::max_signature_depth`].
//!
//! # Thread Safety
//!
//! All operations take `&self`. Cached generic views are published once per member
//! and never mutated afterwards, so readers on any thread observe either no view or
//! the complete one.

use std::sync::Arc;

use crossbeam_skiplist::SkipMap;
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::{
    config::ReflectionConfig,
    metadata::{
        classes::{ClassMetadata, ClassMetadataRc},
        store::{binary_name, ClassSource},
        typesystem::{render_class_object, ScopeChain, TypeNode},
    },
    Error::RecursionLimit,
    Result,
};

/// The name-keyed store of materialized classes
pub struct ClassRegistry {
    source: Arc<dyn ClassSource>,
    classes: SkipMap<String, ClassMetadataRc>,
    config: ReflectionConfig,
}

impl ClassRegistry {
    /// Create a registry over `source` with the default configuration
    ///
    /// ## Arguments
    /// * 'source' - The class metadata store
    #[must_use]
    pub fn new(source: Arc<dyn ClassSource>) -> Self {
        Self::with_config(source, ReflectionConfig::default())
    }

    /// Create a registry over `source` with an explicit configuration
    ///
    /// ## Arguments
    /// * 'source' - The class metadata store
    /// * 'config' - Fallback policy and limits
    #[must_use]
    pub fn with_config(source: Arc<dyn ClassSource>, config: ReflectionConfig) -> Self {
        ClassRegistry {
            source,
            classes: SkipMap::new(),
            config,
        }
    }

    /// The configuration in effect
    #[must_use]
    pub fn config(&self) -> &ReflectionConfig {
        &self.config
    }

    /// Get a class, materializing it from the source on first request
    ///
    /// ## Arguments
    /// * 'name' - Internal or binary class name
    ///
    /// # Errors
    /// Returns [`crate::Error::ClassNotFound`] from the source, or
    /// [`crate::Error::MalformedDescriptor`] if a member descriptor is invalid.
    pub fn get(&self, name: &str) -> Result<ClassMetadataRc> {
        let name = binary_name(name);
        if let Some(entry) = self.classes.get(&name) {
            return Ok(entry.value().clone());
        }

        let definition = self.source.load(&name)?;
        let class = Arc::new(ClassMetadata::from_definition(definition)?);
        let entry = self.classes.get_or_insert(name, class);
        debug!(
            class = %entry.key(),
            fields = entry.value().declared_fields().len(),
            methods = entry.value().declared_methods().len(),
            constructors = entry.value().declared_constructors().len(),
            "materialized class"
        );
        Ok(entry.value().clone())
    }

    /// Get a class only if it has already been materialized
    ///
    /// ## Arguments
    /// * 'name' - Internal or binary class name
    #[must_use]
    pub fn get_loaded(&self, name: &str) -> Option<ClassMetadataRc> {
        self.classes
            .get(&binary_name(name))
            .map(|entry| entry.value().clone())
    }

    /// Returns `true` if the class has been materialized
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.classes.contains_key(&binary_name(name))
    }

    /// Drop a materialized class together with every generic view cached on it.
    ///
    /// Handles obtained earlier stay valid; the next [`ClassRegistry::get`] loads a
    /// fresh copy from the source.
    ///
    /// ## Arguments
    /// * 'name' - Internal or binary class name
    pub fn evict(&self, name: &str) -> bool {
        let evicted = self.classes.remove(&binary_name(name)).is_some();
        if evicted {
            debug!(class = %name, "evicted class");
        }
        evicted
    }

    /// Number of materialized classes
    #[must_use]
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Returns `true` if nothing has been materialized yet
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// All materialized classes, ordered by name
    #[must_use]
    pub fn loaded_classes(&self) -> Vec<ClassMetadataRc> {
        self.classes
            .iter()
            .map(|entry| entry.value().clone())
            .collect()
    }

    /// Returns `true` if `name` denotes an interface known to the source.
    /// Classes the source does not have count as non-interfaces.
    ///
    /// Classes that are not yet materialized are looked up in the source directly
    /// and are not inserted into the registry.
    ///
    /// ## Arguments
    /// * 'name' - Internal or binary class name
    #[must_use]
    pub fn is_interface(&self, name: &str) -> bool {
        if let Some(class) = self.get_loaded(name) {
            return class.is_interface();
        }
        match self.source.load(&binary_name(name)) {
            Ok(definition) => definition.flags.is_interface(),
            Err(err) => {
                debug!(class = %name, "interface lookup failed: {err}");
                false
            }
        }
    }

    /// Render a type the way a reflective `Type` prints on its own, consulting the
    /// source to tell raw interfaces from raw classes
    ///
    /// ## Arguments
    /// * 'node' - The type to render
    #[must_use]
    pub fn render_type(&self, node: &TypeNode) -> String {
        render_class_object(node, |name| self.is_interface(name))
    }

    /// The scope chain seen from inside `class`: its own type parameters followed by
    /// everything [`ClassRegistry::enclosing_scope`] returns
    ///
    /// ## Arguments
    /// * 'class' - The class whose members are being resolved
    ///
    /// # Errors
    /// Returns an error if an enclosing class cannot be loaded, the enclosing chain is
    /// deeper than the configured limit, or a type variable does not resolve.
    pub fn class_scope(&self, class: &ClassMetadata) -> Result<ScopeChain> {
        self.class_scope_at(class, 0)
    }

    /// The scope chain outside `class`: its enclosing method, if any, then each
    /// lexically enclosing class outward
    ///
    /// ## Arguments
    /// * 'class' - The class whose own signature is being resolved
    ///
    /// # Errors
    /// See [`ClassRegistry::class_scope`].
    pub fn enclosing_scope(&self, class: &ClassMetadata) -> Result<ScopeChain> {
        self.enclosing_scope_at(class, 0)
    }

    fn class_scope_at(&self, class: &ClassMetadata, depth: usize) -> Result<ScopeChain> {
        let enclosing = self.enclosing_scope_at(class, depth)?;
        let view = class.generics_in(self, &enclosing)?;

        Ok(match (view.generic(), view.error()) {
            (Some(generics), _) if !generics.type_parameters.is_empty() => ScopeChain::new()
                .with_inner(
                    class.owner(),
                    generics.type_parameters.iter().map(|param| param.name.clone()),
                )
                .extended_by(&enclosing),
            (_, Some(err)) => enclosing.with_degraded(err.clone()),
            _ => enclosing,
        })
    }

    fn enclosing_scope_at(&self, class: &ClassMetadata, depth: usize) -> Result<ScopeChain> {
        let Some(outer_name) = class.enclosing_class_name() else {
            return Ok(ScopeChain::new());
        };
        if depth >= self.config.max_signature_depth {
            return Err(RecursionLimit(depth));
        }

        let outer = self.get(outer_name)?;
        let outer_scope = self.class_scope_at(&outer, depth + 1)?;

        let Some(enclosing_method) = class.enclosing_method() else {
            return Ok(outer_scope);
        };
        let declared = if enclosing_method.name == "<init>" {
            outer.declared_constructor(&enclosing_method.descriptor)
        } else {
            outer.declared_method(&enclosing_method.name, &enclosing_method.descriptor)
        };
        let Some(method) = declared else {
            warn!(
                class = %class.name(),
                method = %enclosing_method.name,
                descriptor = %enclosing_method.descriptor,
                "enclosing method not declared by {}", outer.name()
            );
            return Ok(outer_scope);
        };

        let view = method.generics_in(self, &outer_scope)?;
        Ok(match (view.generic(), view.error()) {
            (Some(generics), _) if !generics.type_parameters.is_empty() => ScopeChain::new()
                .with_inner(
                    method.owner(),
                    generics.type_parameters.iter().map(|param| param.name.clone()),
                )
                .extended_by(&outer_scope),
            (_, Some(err)) => outer_scope.with_degraded(err.clone()),
            _ => outer_scope,
        })
    }

    /// Compute the generic views of one class and all its declared members
    fn preload(&self, class: &ClassMetadata) -> Result<()> {
        let scope = self.class_scope(class)?;
        for field in class.declared_fields() {
            field.generics_in(self, &scope)?;
        }
        for method in class.declared_methods().iter().chain(class.declared_constructors()) {
            method.generics_in(self, &scope)?;
        }
        Ok(())
    }

    /// Warm the generic views of every materialized class in parallel
    ///
    /// # Errors
    /// Returns the first error any class reports; views computed before it stay cached.
    pub fn preload_all(&self) -> Result<()> {
        let classes = self.loaded_classes();
        debug!(classes = classes.len(), "preloading generic views");
        classes.par_iter().try_for_each(|class| self.preload(class))
    }

    /// Materialize the named classes and warm their generic views in parallel
    ///
    /// ## Arguments
    /// * 'names' - Internal or binary class names
    ///
    /// # Errors
    /// Returns the first load or resolution error.
    pub fn preload_classes(&self, names: &[String]) -> Result<()> {
        names.par_iter().try_for_each(|name| {
            let class = self.get(name)?;
            self.preload(&class)
        })
    }
}
