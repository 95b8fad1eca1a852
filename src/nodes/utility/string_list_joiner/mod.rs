//! String list joiner node implementation
//!
//! - mod.rs: Base node metadata and factory implementation
//! - controller.rs: Variadic input hooks keeping `arg1 … argN` contiguous
//! - logic.rs: Core join computation

pub mod controller;
pub mod logic;

pub use controller::{remove_shadow_widgets, renumber_inputs, VariadicInputController};
pub use logic::JoinerLogic;

use crate::constants::{joiner::INPUT_PREFIX, node_types::STRING_LIST_JOINER};
use crate::nodes::{DataType, NodeCategory, NodeFactory, NodeMetadata, PortDefinition};

/// Joins a variable number of string inputs into one string
#[derive(Default)]
pub struct StringListJoinerFactory;

impl NodeFactory for StringListJoinerFactory {
    fn metadata() -> NodeMetadata {
        NodeMetadata::new(
            STRING_LIST_JOINER,
            "String List Joiner",
            NodeCategory::vibe(),
            "Joins the non-empty string inputs with newlines",
        )
        .with_inputs(vec![
            PortDefinition::required(&format!("{}1", INPUT_PREFIX), DataType::String)
                .with_widget(),
        ])
        .with_outputs(vec![PortDefinition::required("STRING", DataType::String)])
    }
}
