//! The SPDX engine: reference-list loading, expression validation,
//! free-text canonicalization, and deprecated-identifier upgrading.
//!
//! Everything here is a pure function over immutable inputs; all I/O lives
//! with the callers.

pub mod canonical;
pub mod deprecated;
pub mod reference;
pub mod validate;
