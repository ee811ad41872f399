//! Local git checkout inspection
//!
//! The release itself is created through the GitHub API; the local
//! repository is only consulted to find out which GitHub repository it
//! belongs to when none is configured explicitly.

pub mod remote;

pub use remote::{detect_slug, parse_remote_url};
