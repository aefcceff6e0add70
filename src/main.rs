// Schemy - Airtable schema downloader
use clap::Parser;
use schemy::cli::{execute_command, Args, ConsoleWriter, OutputWriter};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = Args::parse();

    if let Err(e) = execute_command(args).await {
        let _ = ConsoleWriter::new().write_error(&e.to_string());
        std::process::exit(1);
    }
}
