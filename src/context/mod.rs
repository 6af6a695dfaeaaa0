//! Application context for handing the property store to consumers.

use crate::properties::PropertyStore;
use crate::Error;

/// Central application context owning the loaded property store.
///
/// Built once at startup; thereafter consumers receive a shared reference
/// and read through [`properties()`](Self::properties). There is no global
/// state; the context is passed explicitly to whatever needs configuration.
///
/// ## Example
///
/// ```no_run
/// use dragon_props::{AppContext, PropertyStore};
///
/// let ctx = AppContext::builder()
///     .with_properties(
///         PropertyStore::builder()
///             .with_root("config")
///             .build()?
///     )
///     .build()?;
///
/// let name = ctx.properties().get("app.name");
/// # Ok::<(), dragon_props::Error>(())
/// ```
#[derive(Debug)]
pub struct AppContext {
    properties: PropertyStore,
}

impl AppContext {
    /// Creates a new builder for constructing an `AppContext`.
    pub fn builder() -> AppContextBuilder {
        AppContextBuilder::default()
    }

    /// Returns the property store.
    pub fn properties(&self) -> &PropertyStore {
        &self.properties
    }
}

/// Builder for constructing an [`AppContext`].
#[derive(Debug, Default)]
#[must_use = "builders do nothing until .build() is called"]
pub struct AppContextBuilder {
    properties: Option<PropertyStore>,
}

impl AppContextBuilder {
    /// Attaches the loaded property store.
    ///
    /// The store should be the result of
    /// [`PropertyStore::builder().build()`](crate::properties::PropertyStoreBuilder::build).
    pub fn with_properties(mut self, store: PropertyStore) -> Self {
        self.properties = Some(store);
        self
    }

    /// Builds the `AppContext`.
    ///
    /// Returns an error if no property store was provided.
    pub fn build(self) -> Result<AppContext, Error> {
        Ok(AppContext {
            properties: self.properties.ok_or(Error::MissingProperties)?,
        })
    }
}
