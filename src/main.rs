//! vibe-nodes - scripted session against a running backend
//!
//! Registers the extension, builds a small graph and walks through the
//! joiner, feedback and folder-button behaviors, logging what happens.
//! Usage: `vibe-nodes [config.json]`

use log::{error, info, warn};
use serde_json::json;
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;
use vibe_nodes::constants::node_types::{OPEN_FOLDERS, STRING_LIST_JOINER, STRING_PRIMITIVE};
use vibe_nodes::nodes::utility::string_list_joiner::JoinerLogic;
use vibe_nodes::nodes::utility::FolderKey;
use vibe_nodes::nodes::{ConnectionOrigin, NodeGraph, NodeId, NodeRegistry};
use vibe_nodes::{EventBus, ExtensionConfig, GraphError, HttpBackend, VibeExtension};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn run() -> vibe_nodes::Result<()> {
    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = ExtensionConfig::load_or_default(config_path.as_deref())?;
    let timeout = Duration::from_millis(config.request_timeout_ms);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()?;
    let backend = Rc::new(HttpBackend::new(&config, runtime.handle().clone())?);

    let mut extension = VibeExtension::new(config, backend);
    let mut registry = NodeRegistry::new();
    extension.register(&mut registry);

    let graph = Rc::new(RefCell::new(NodeGraph::new(registry)));
    let bus = EventBus::new();
    extension.setup(&bus, Rc::clone(&graph));

    if let Err(e) = joiner_session(&mut graph.borrow_mut()) {
        error!("Joiner session failed: {}", e);
    }

    let text = graph.borrow_mut().create_node(STRING_PRIMITIVE);
    if let Some(text) = text {
        bus.emit(
            &extension.config().feedback_channel,
            &json!({ "node_id": text, "widget_name": "value", "value": "from the server" }),
        );
        if let Some(widget) = graph.borrow().node(text).and_then(|node| node.find_widget("value")) {
            info!("Feedback set node {} value to {}", text, widget.value);
        }
    }

    let folders = graph.borrow_mut().create_node(OPEN_FOLDERS);
    if let Some(folders) = folders {
        extension.press_button(&graph.borrow(), folders, &FolderKey::Outputs.button_label());
    }
    extension.refresh();

    extension.unload();
    // Give spawned requests a chance to finish before the runtime goes away
    runtime.shutdown_timeout(timeout);
    Ok(())
}

fn joiner_session(graph: &mut NodeGraph) -> Result<(), GraphError> {
    let Some(joiner) = graph.create_node(STRING_LIST_JOINER) else {
        warn!("{} is not registered", STRING_LIST_JOINER);
        return Ok(());
    };
    let sources: Vec<NodeId> = ["a cat", "", "a hat"]
        .iter()
        .filter_map(|text| {
            let id = graph.create_node(STRING_PRIMITIVE)?;
            if let Some(widget) = graph.node_mut(id).and_then(|node| node.find_widget_mut("value")) {
                widget.set_value(json!(text));
            }
            Some(id)
        })
        .collect();

    for (slot, source) in sources.iter().enumerate() {
        graph.connect(*source, 0, joiner, slot, ConnectionOrigin::UserAction)?;
        log_inputs(graph, joiner);
    }

    graph.disconnect_input(joiner, 1, ConnectionOrigin::UserAction);
    log_inputs(graph, joiner);

    let inputs: Vec<Option<String>> = graph
        .input_links(joiner)
        .iter()
        .map(|link| {
            graph
                .node(link.from_node)
                .and_then(|node| node.find_widget("value"))
                .and_then(|widget| widget.value.as_str().map(str::to_string))
        })
        .collect();
    info!("Joined output: {:?}", JoinerLogic::default().process(&inputs));

    Ok(())
}

fn log_inputs(graph: &NodeGraph, joiner: NodeId) {
    if let Some(node) = graph.node(joiner) {
        info!("Joiner inputs: {}", node.input_names().join(", "));
    }
}
