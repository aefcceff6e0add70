// Core module - Download pipeline
pub mod download;

pub use download::{check_output_path, render_schema, write_new_file, DownloadRequest};
