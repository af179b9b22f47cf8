// crates/dci-cli/src/commands/mod.rs
//
// Command module declarations for the DCI CLI.

pub mod args;
pub mod run;
