//! Asset loading
//!
//! Material definitions are parsed elsewhere; this module only holds them as
//! opaque records with a uid and reloads them from disk on request.

pub mod material_library;

pub use material_library::{MaterialDefinition, MaterialError, MaterialLibrary, MaterialSource};
