//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the crate:
//! - Math types shared by the mesher and the preview session
//! - Logging setup

pub mod math;
pub mod logging;
