//! Public Twine models.
//!
//! Models are the primary public interface of this crate.
//!
//! # Model structure
//!
//! Each model lives in its own module and contains an internal `core` submodule
//! where the actual computation and domain logic lives. The model module
//! re-exports the types callers need and adds the [`twine_core::Model`] adapter,
//! which stays a thin wrapper around the core API.

pub mod reservoir;
