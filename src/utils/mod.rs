//! Utility modules for the site builder.

pub mod dom;
pub mod log;
pub mod minify;
