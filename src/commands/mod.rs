//! CLI command implementations.
//!
//! - **analyze**: classify a facts document and write the coupling report
//! - **init**: write a default `.couplingmap.toml`

pub mod analyze;
pub mod init;

pub use analyze::{handle_analyze, AnalyzeConfig};
pub use init::{init_config, init_config_at};
