//! Typed property requests for injection-style consumers.
//!
//! A [`PropertyRequest`] describes one injection point: the key to look up
//! (an explicit key, or identifiers derived from the call site), whether the
//! property is required, and the target type chosen at the
//! [`fetch`](PropertyRequest::fetch) call.

use thiserror::Error;

use crate::properties::PropertyStore;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RequestError {
    #[error("no value defined for required property '{key}'")]
    MissingRequired { key: String },

    #[error("property '{key}' value '{raw}' cannot be parsed as {target}")]
    Conversion {
        key: String,
        raw: String,
        target: &'static str,
    },
}

/// How the effective lookup key is chosen.
#[derive(Debug, Clone)]
enum Lookup {
    /// Only the explicit key is consulted; no fallback.
    Explicit(String),
    /// The qualified identifier first, the bare member name second.
    Derived { qualified: String, bare: String },
}

/// A single typed lookup against a [`PropertyStore`].
///
/// Requests are required by default: a required property with no value is
/// an error, while an [`optional`](Self::optional) one resolves to
/// `Ok(None)`.
///
/// ## Example
///
/// ```no_run
/// use dragon_props::{PropertyRequest, PropertyStore};
///
/// let store = PropertyStore::builder().with_root("config").build()?;
///
/// // Explicit key, required.
/// let retries: Option<i64> = PropertyRequest::key("order.retries").fetch(&store)?;
///
/// // Call-site identifiers: tries "OrderService.timeout", then "timeout".
/// let timeout: Option<f64> = PropertyRequest::for_member("OrderService", "timeout")
///     .optional()
///     .fetch(&store)?;
/// # Ok::<(), dragon_props::Error>(())
/// ```
#[derive(Debug, Clone)]
#[must_use = "requests do nothing until .fetch() is called"]
pub struct PropertyRequest {
    lookup: Lookup,
    required: bool,
}

impl PropertyRequest {
    /// Creates a request that consults exactly the given key.
    pub fn key(key: impl Into<String>) -> Self {
        Self {
            lookup: Lookup::Explicit(key.into()),
            required: true,
        }
    }

    /// Creates a request with fallback identifiers derived from the call
    /// site: `"{owner}.{member}"` is tried first, the bare member name
    /// second.
    pub fn for_member(owner: &str, member: &str) -> Self {
        Self {
            lookup: Lookup::Derived {
                qualified: format!("{owner}.{member}"),
                bare: member.to_string(),
            },
            required: true,
        }
    }

    /// Replaces the derived fallback chain with an explicit key.
    ///
    /// A key that is blank after trimming is ignored and the derived
    /// identifiers stay in effect.
    pub fn with_key(mut self, key: &str) -> Self {
        let key = key.trim();
        if !key.is_empty() {
            self.lookup = Lookup::Explicit(key.to_string());
        }
        self
    }

    /// Marks the property as optional. Requests are required by default.
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Resolves the request against `store` and parses the value into `T`.
    ///
    /// With an explicit key only that key is consulted; no fallback
    /// happens, even when the key has no value. A missing value is an error
    /// for required requests and `Ok(None)` otherwise; absence never
    /// attempts a conversion.
    pub fn fetch<T: FromProperty>(&self, store: &PropertyStore) -> Result<Option<T>, RequestError> {
        match self.resolve(store) {
            Some((key, raw)) => match T::from_property(raw) {
                Some(value) => Ok(Some(value)),
                None => Err(RequestError::Conversion {
                    key: key.to_string(),
                    raw: raw.to_string(),
                    target: T::TYPE_NAME,
                }),
            },
            None if self.required => Err(RequestError::MissingRequired {
                key: self.reported_key().to_string(),
            }),
            None => Ok(None),
        }
    }

    /// Finds the first identifier holding a value, returning it with the
    /// raw value.
    fn resolve<'a>(&'a self, store: &'a PropertyStore) -> Option<(&'a str, &'a str)> {
        match &self.lookup {
            Lookup::Explicit(key) => store.get(key).map(|raw| (key.as_str(), raw)),
            Lookup::Derived { qualified, bare } => store
                .get(qualified)
                .map(|raw| (qualified.as_str(), raw))
                .or_else(|| store.get(bare).map(|raw| (bare.as_str(), raw))),
        }
    }

    /// The identifier named by a missing-required error: the explicit key,
    /// or the qualified fallback identifier.
    fn reported_key(&self) -> &str {
        match &self.lookup {
            Lookup::Explicit(key) => key,
            Lookup::Derived { qualified, .. } => qualified,
        }
    }
}

/// Conversion from a raw property string into a typed value.
pub trait FromProperty: Sized {
    /// Type name used in conversion error messages.
    const TYPE_NAME: &'static str;

    /// Parses the raw string, or `None` when it is not a valid `Self`.
    fn from_property(raw: &str) -> Option<Self>;
}

impl FromProperty for String {
    const TYPE_NAME: &'static str = "string";

    fn from_property(raw: &str) -> Option<Self> {
        Some(raw.to_string())
    }
}

impl FromProperty for i32 {
    const TYPE_NAME: &'static str = "integer";

    fn from_property(raw: &str) -> Option<Self> {
        raw.parse().ok()
    }
}

impl FromProperty for i64 {
    const TYPE_NAME: &'static str = "integer";

    fn from_property(raw: &str) -> Option<Self> {
        raw.parse().ok()
    }
}

impl FromProperty for f64 {
    const TYPE_NAME: &'static str = "double";

    fn from_property(raw: &str) -> Option<Self> {
        raw.parse().ok()
    }
}
