//! User interface module - terminal output for the operator.
//!
//! shipit never prompts; every decision is made from configuration and
//! flags, so this module only formats and prints.

pub mod formatter;

// Re-export formatter functions for convenience
pub use formatter::{
    display_boundary_warning, display_error, display_found_categories, display_header,
    display_manual_cleanup, display_notes, display_status, display_success,
};
