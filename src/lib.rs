//! vibe-nodes library
//!
//! Runtime behavior for a node-based graph editor extension: self-extending
//! joiner inputs, folder buttons and server-driven widget feedback.

// Public modules
pub mod backend;
pub mod config;
pub mod constants;
pub mod error;
pub mod events;
pub mod extension;
pub mod feedback;
pub mod nodes;

// Re-export commonly used types
pub use backend::{BackendClient, BackendRequest, HttpBackend};
pub use config::ExtensionConfig;
pub use error::{ExtensionError, GraphError, Result};
pub use events::{EventBus, Subscription};
pub use extension::VibeExtension;
pub use feedback::{apply_feedback, FeedbackEvent, FeedbackRelay, NodeLookup};
