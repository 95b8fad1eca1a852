//! String list joiner functional operations

use crate::constants::joiner::SEPARATOR;

/// Core joiner data and functionality
#[derive(Debug, Clone)]
pub struct JoinerLogic {
    /// Placed between consecutive non-empty inputs
    pub separator: String,
}

impl Default for JoinerLogic {
    fn default() -> Self {
        Self {
            separator: SEPARATOR.to_string(),
        }
    }
}

impl JoinerLogic {
    /// Join the inputs in slot order, skipping unconnected and blank ones
    pub fn process<S: AsRef<str>>(&self, inputs: &[Option<S>]) -> String {
        inputs
            .iter()
            .flatten()
            .map(AsRef::<str>::as_ref)
            .filter(|value| !value.trim().is_empty())
            .collect::<Vec<_>>()
            .join(&self.separator)
    }
}
