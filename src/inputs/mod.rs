//! Run inputs: workspace rows from CSV and installer scripts from disk.

pub mod scripts;
pub mod workspaces;

pub use scripts::load_scripts;
pub use workspaces::{parse_workspaces, read_workspaces};
