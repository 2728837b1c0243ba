//! Fixture Bridge Common Library
//!
//! Fixture values, the payload encoder and the fault taxonomy shared by the
//! fixture bridge crates.

pub mod encoding;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use encoding::{decode_transport, encode, encode_transport};
pub use error::{Error, Result};
pub use types::{EncodedArgument, EncodingForm, FixtureValue};
