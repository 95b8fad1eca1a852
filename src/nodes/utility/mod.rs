//! Utility nodes module
//!
//! Contains the joiner and folder nodes whose runtime behavior this
//! extension customizes.

pub mod open_folders;
pub mod string_list_joiner;

// Re-export for convenience
pub use open_folders::{FolderButtonInjector, FolderKey, OpenFoldersFactory};
pub use string_list_joiner::{StringListJoinerFactory, VariadicInputController};
