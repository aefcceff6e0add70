// CLI module - Command line interface
pub mod args;
pub mod commands;
pub mod output;

pub use args::{Args, Command, DownloadArgs};
pub use commands::{execute_command, run_download};
pub use output::{ConsoleWriter, OutputWriter};
