//! Small shared helpers.

pub mod plural;
pub mod suffix;

pub use plural::plural_count;
pub use suffix::SuffixFormat;
