//! CLI command implementations, one module per subcommand

pub mod baseline;
pub mod compare;
pub mod export;
pub mod import;
pub mod list;
pub mod report;
pub mod top;
