//! Glue between parsed command-line arguments and the release workflow.

pub mod orchestration;
