//! Filter registry, compiler and saved filters module.
//!
//! This module provides access to the field registry, filter sets, the
//! predicate compiler, the statement builder and the collaborator traits.

pub use watchfilter_core::*;
