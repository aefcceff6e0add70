use crate::cli::args::{Args, Command, DownloadArgs};
use crate::cli::output::{ConsoleWriter, OutputWriter};
use crate::core::download::{render_schema, write_new_file, DownloadRequest};
use crate::domain::config::SchemyConfig;
use crate::domain::error::{SchemyError, SchemyResult};
use crate::infrastructure::airtable::{AirtableClient, SchemaSource};
use crate::infrastructure::config::ConfigManager;
use crate::infrastructure::logging::init_logging;
use tracing::{debug, info};

/// Execute CLI command
pub async fn execute_command(args: Args) -> SchemyResult<()> {
    let dotenv_result = dotenvy::dotenv();

    let config_manager = ConfigManager::new(args.config.as_deref())?;
    let config = config_manager.load_config(&args.overrides())?;

    init_logging(&config.log_level)?;
    match dotenv_result {
        Ok(path) => debug!(path = %path.display(), "loaded .env file"),
        Err(e) => debug!(error = %e, "no .env file loaded"),
    }
    debug!(path = %config_manager.config_path().display(), "loaded config file");

    let mut writer = ConsoleWriter::new();
    match args.command {
        Command::Download(download_args) => {
            execute_download(
                download_args,
                &config,
                |token| AirtableClient::new(token),
                &mut writer,
            )
            .await
        }
    }
}

/// Validate everything, then connect with `connect` and download. `connect`
/// is not called when validation fails.
async fn execute_download<S, F, W>(
    args: DownloadArgs,
    config: &SchemyConfig,
    connect: F,
    writer: &mut W,
) -> SchemyResult<()>
where
    S: SchemaSource,
    F: FnOnce(String) -> SchemyResult<S>,
    W: OutputWriter,
{
    let request = DownloadRequest::validate(&args.base_id, &args.output)?;

    if !config.has_token() {
        return Err(SchemyError::Config {
            message: "airtable-token is not set; pass --airtable-token, set AIRTABLE_TOKEN or edit the config file".to_string(),
        });
    }

    let source = connect(config.airtable_token.clone())?;
    run_download(&source, &request, writer).await
}

/// Fetch the schema for a validated request, print it, then write the same
/// bytes to a newly created output file.
pub async fn run_download<S, W>(
    source: &S,
    request: &DownloadRequest,
    writer: &mut W,
) -> SchemyResult<()>
where
    S: SchemaSource + ?Sized,
    W: OutputWriter,
{
    let schema = source.get_base_schema(&request.base_id).await?;
    info!(
        base_id = %request.base_id,
        tables = schema.tables.len(),
        fields = schema.field_count(),
        "got base schema"
    );

    let rendered = render_schema(&schema)?;
    writer.write_schema(&rendered)?;

    write_new_file(&request.output, rendered.as_bytes()).await?;
    debug!(path = %request.output.display(), "wrote schema");
    Ok(())
}
