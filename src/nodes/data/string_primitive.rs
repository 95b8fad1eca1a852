//! String primitive node - a single editable string feeding other nodes

use crate::constants::node_types::STRING_PRIMITIVE;
use crate::nodes::widget::WidgetKind;
use crate::nodes::{DataType, NodeCategory, NodeFactory, NodeMetadata, PortDefinition, WidgetDefinition};

/// Source node that outputs the text typed into its `value` widget
#[derive(Default)]
pub struct StringPrimitiveFactory;

impl NodeFactory for StringPrimitiveFactory {
    fn metadata() -> NodeMetadata {
        NodeMetadata::new(
            STRING_PRIMITIVE,
            "String",
            NodeCategory::data(),
            "Outputs a fixed string",
        )
        .with_outputs(vec![PortDefinition::required("STRING", DataType::String)])
        .with_widgets(vec![WidgetDefinition::new("value", WidgetKind::Text, "")])
    }
}
