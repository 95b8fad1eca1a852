//! Folder buttons injected into OpenFolders nodes

use crate::error::ExtensionError;
use crate::nodes::hooks::NodeHooks;
use crate::nodes::widget::{ButtonAction, Widget};
use crate::nodes::Node;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Folders the backend knows how to open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FolderKey {
    Loras,
    Embeddings,
    Checkpoints,
    Workflows,
    Outputs,
    Logs,
}

impl FolderKey {
    /// Every key, in button order
    pub const ALL: [FolderKey; 6] = [
        FolderKey::Loras,
        FolderKey::Embeddings,
        FolderKey::Checkpoints,
        FolderKey::Workflows,
        FolderKey::Outputs,
        FolderKey::Logs,
    ];

    /// Wire identifier sent to the backend
    pub fn as_str(&self) -> &'static str {
        match self {
            FolderKey::Loras => "loras",
            FolderKey::Embeddings => "embeddings",
            FolderKey::Checkpoints => "checkpoints",
            FolderKey::Workflows => "workflows",
            FolderKey::Outputs => "outputs",
            FolderKey::Logs => "logs",
        }
    }

    /// Human-readable folder name
    pub fn label(&self) -> &'static str {
        match self {
            FolderKey::Loras => "LoRAs",
            FolderKey::Embeddings => "Embeddings",
            FolderKey::Checkpoints => "Checkpoints",
            FolderKey::Workflows => "Workflows",
            FolderKey::Outputs => "Outputs",
            FolderKey::Logs => "Logs",
        }
    }

    /// Text shown on the button
    pub fn button_label(&self) -> String {
        format!("Open {}", self.label())
    }
}

impl fmt::Display for FolderKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FolderKey {
    type Err = ExtensionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FolderKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| ExtensionError::UnknownFolderKey(s.to_string()))
    }
}

/// Node hooks adding one non-persistent button per folder
#[derive(Debug, Clone, Default)]
pub struct FolderButtonInjector;

impl NodeHooks for FolderButtonInjector {
    fn on_node_created(&self, node: &mut Node) {
        for key in FolderKey::ALL {
            node.add_widget(Widget::button(key.button_label(), ButtonAction::OpenFolder(key)));
        }
        debug!("Node {} received {} folder buttons", node.id, FolderKey::ALL.len());
    }
}
