//! User interface module - everything the tool prints.
//!
//! Separates concerns:
//! - `formatter` - Pure formatting functions
//! - This module - Re-exports used by the workflow and the binary

pub mod formatter;

// Re-export formatter functions for convenience
pub use formatter::{
    display_boundary_warning, display_error, display_precondition_failure,
    display_release_parameters, display_status, display_success, display_uploaded_asset,
    format_release_parameters,
};
