//! Inkscape layer splitting and svg attribute tweaking.
//!
//! Two binaries share this library:
//!
//! - `inkslice` exports one svg file per layer set, chosen per layer, cumulatively,
//!   or by a small layer script ([`layer`]).
//! - `inktweak` rewrites font sizes and colors in place ([`transform`]).

pub mod cli;
pub mod config;
pub mod error;
pub mod layer;
pub mod logger;
pub mod svg;
pub mod transform;
pub mod utils;

pub use error::SvgError;
