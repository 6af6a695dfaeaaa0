use crate::properties::PropertiesError;
use crate::request::RequestError;
use thiserror::Error;

/// Top-level error type for the dragon-props library.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("properties error: {0}")]
    Properties(#[from] PropertiesError),

    #[error("property request error: {0}")]
    Request(#[from] RequestError),

    #[error("application context requires a property store")]
    MissingProperties,
}
