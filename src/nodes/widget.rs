//! In-node widgets exposing editable values and actions

use crate::backend::{BackendClient, BackendRequest};
use crate::nodes::utility::open_folders::FolderKey;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// What a button does when pressed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ButtonAction {
    /// Ask the backend to open one of the known folders
    OpenFolder(FolderKey),
    /// Ask the backend to rescan its model lists
    Refresh,
}

impl ButtonAction {
    /// Outbound request issued by this action
    pub fn request(&self) -> BackendRequest {
        match self {
            ButtonAction::OpenFolder(key) => BackendRequest::OpenFolder { key: *key },
            ButtonAction::Refresh => BackendRequest::Refresh,
        }
    }
}

/// Kind of control a widget renders as
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WidgetKind {
    Number,
    Text,
    Toggle,
    Button { action: ButtonAction },
}

/// An in-node control with a name and a value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Widget {
    pub name: String,
    pub kind: WidgetKind,
    pub value: Value,
    /// Whether the value is part of the saved graph state
    pub serialize: bool,
}

impl Widget {
    /// Creates a persistent value widget
    pub fn new(name: impl Into<String>, kind: WidgetKind, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            kind,
            value: value.into(),
            serialize: true,
        }
    }

    /// Creates a button widget; buttons hold no value and are never saved
    pub fn button(label: impl Into<String>, action: ButtonAction) -> Self {
        Self {
            name: label.into(),
            kind: WidgetKind::Button { action },
            value: Value::Null,
            serialize: false,
        }
    }

    pub fn is_button(&self) -> bool {
        matches!(self.kind, WidgetKind::Button { .. })
    }

    /// Overwrites the displayed value
    pub fn set_value(&mut self, value: Value) {
        self.value = value;
    }

    /// Fires the button's action; returns false for non-button widgets
    pub fn press(&self, backend: &dyn BackendClient) -> bool {
        match &self.kind {
            WidgetKind::Button { action } => {
                backend.send(action.request());
                true
            }
            _ => false,
        }
    }
}
