//! OpenFolders node - buttons that ask the backend to open common folders

pub mod buttons;

pub use buttons::{FolderButtonInjector, FolderKey};

use crate::constants::node_types::OPEN_FOLDERS;
use crate::nodes::{NodeCategory, NodeFactory, NodeMetadata};

/// Utility node with no ports; its buttons are added by [`FolderButtonInjector`]
#[derive(Default)]
pub struct OpenFoldersFactory;

impl NodeFactory for OpenFoldersFactory {
    fn metadata() -> NodeMetadata {
        NodeMetadata::new(
            OPEN_FOLDERS,
            "Open Folders",
            NodeCategory::vibe(),
            "Buttons that open common model and output folders",
        )
    }
}
