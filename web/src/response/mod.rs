//! Response DTOs for endpoints whose payload is not a stored entity.

pub(crate) mod analysis;
pub(crate) mod session;
