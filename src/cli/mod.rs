//! CLI subcommand implementations for the nvdweek binary.

pub mod doctor;
pub mod fetch_cmd;
pub mod probe_cmd;
