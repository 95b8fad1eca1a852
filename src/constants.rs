//! Application-wide constants and default values
//!
//! Centralized location for node type names, routes and channel names

/// Node type names as registered with the host runtime
pub mod node_types {
    /// Joiner node whose inputs grow and shrink with its connections
    pub const STRING_LIST_JOINER: &str = "StringListJoiner";

    /// Utility node exposing folder buttons
    pub const OPEN_FOLDERS: &str = "OpenFolders";

    /// Single string value source
    pub const STRING_PRIMITIVE: &str = "StringPrimitive";
}

/// Joiner node constants
pub mod joiner {
    /// Name prefix of the joiner's variadic inputs (`arg1`, `arg2`, ...)
    pub const INPUT_PREFIX: &str = "arg";

    /// Separator placed between joined strings
    pub const SEPARATOR: &str = "\n";
}

/// Backend routes and defaults
pub mod backend {
    /// Default address of the backend service
    pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8188";

    /// Route prefix shared by every extension endpoint
    pub const DEFAULT_ROUTE_PREFIX: &str = "/vibe_for_comfy";

    /// Route suffix for the refresh action
    pub const REFRESH_ROUTE: &str = "/refresh";

    /// Route suffix for the open-folder action
    pub const OPEN_FOLDER_ROUTE: &str = "/open_folder";

    /// Transport timeout for outbound requests (milliseconds)
    pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 5_000;
}

/// Server event channels
pub mod events {
    /// Channel carrying widget value feedback from the backend
    pub const FEEDBACK_CHANNEL: &str = "vibe-for-comfy-feedback";
}

/// Configuration file location
pub mod config {
    /// Directory under the platform config dir
    pub const APP_DIR: &str = "vibe-nodes";

    /// Configuration file name
    pub const FILE_NAME: &str = "config.json";
}
