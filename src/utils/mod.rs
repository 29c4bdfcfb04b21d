//! Utility modules for the portfolio generator.

pub mod assets;
pub mod hash;
pub mod minify;
