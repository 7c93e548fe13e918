//! This module holds typed parameters for various endpoint inputs.
//!
//! Each parameter type is a struct deserialized from the request body or query
//! string, so inputs are validated by type before any handler logic runs.

pub(crate) mod analysis;
pub(crate) mod session;
