pub mod config;

// Re-export handler functions for convenience
pub use config::{
    handle_show_command, handle_sizes_command, handle_validate_command, resolve_config,
};
