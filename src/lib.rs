pub mod context;
pub mod properties;
pub mod request;
mod error;

pub use context::AppContext;
pub use error::Error;
pub use properties::{PropertiesError, PropertyStore};
pub use request::{FromProperty, PropertyRequest, RequestError};
