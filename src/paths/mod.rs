//! Path predicates and rewriting helpers shared by the resolvers.
//!
//! Filtering decides which enumerated files belong to the analysed set; the relative helpers
//! re-express a file found inside a package so it reads relative to the project directory.

mod filters;
mod relative;

pub use filters::{PathFilter, included_in_file_set, is_real_module_path};
pub use relative::{absolute, normalize, relative_path, to_slash};
