pub mod cli;
pub mod config;
pub mod error;
pub mod extract;
pub mod git;
pub mod merge;
pub mod pipeline;
pub mod process;
pub mod report;
pub mod reviewer;
pub mod schema;
