//! Validation, rendering and writing for `schemy download`.

use crate::domain::{
    error::{SchemyError, SchemyResult},
    schema::{BaseId, Schema},
};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs::{self, OpenOptions};
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::{debug, warn};

/// A validated download: a well-formed base ID and an output path that is
/// free to be created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    pub base_id: BaseId,
    pub output: PathBuf,
}

impl DownloadRequest {
    /// Check the base ID, then the output path. Nothing touches the network
    /// before this succeeds.
    pub fn validate(base_id: &str, output: &Path) -> SchemyResult<Self> {
        let base_id = BaseId::parse(base_id)?;
        debug!(base_id = %base_id, "verified base ID");

        check_output_path(output)?;
        debug!(path = %output.display(), "verified output path");

        Ok(Self {
            base_id,
            output: output.to_path_buf(),
        })
    }
}

/// The output path must not exist, and its parent must be an existing
/// directory.
pub fn check_output_path(path: &Path) -> SchemyResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        match std::fs::metadata(parent) {
            Ok(meta) if meta.is_dir() => {}
            Ok(_) => {
                return Err(SchemyError::OutputDirectoryNotFound {
                    path: parent.to_path_buf(),
                })
            }
            Err(e) if is_missing_directory(&e) => {
                return Err(SchemyError::OutputDirectoryNotFound {
                    path: parent.to_path_buf(),
                })
            }
            Err(e) => return Err(e.into()),
        }
    }

    match std::fs::symlink_metadata(path) {
        Ok(meta) if meta.is_dir() => Err(SchemyError::OutputIsDirectory {
            path: path.to_path_buf(),
        }),
        Ok(_) => Err(SchemyError::OutputExists {
            path: path.to_path_buf(),
        }),
        Err(e) if is_missing_directory(&e) => Ok(()),
        Err(e) => Err(e.into()),
    }
}

/// Some component of the path is absent, or is a file where a directory
/// should be.
fn is_missing_directory(e: &std::io::Error) -> bool {
    matches!(e.kind(), ErrorKind::NotFound | ErrorKind::NotADirectory)
}

/// Pretty-print `schema` with two-space indentation and a trailing newline.
pub fn render_schema(schema: &Schema) -> SchemyResult<String> {
    let mut rendered = serde_json::to_string_pretty(schema)?;
    rendered.push('\n');
    Ok(rendered)
}

/// Create `path`, which must not exist yet, and write `contents` to it. If
/// writing fails, the new file is removed again.
pub async fn write_new_file(path: &Path, contents: &[u8]) -> SchemyResult<()> {
    let file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .await
        .map_err(|e| {
            if is_missing_directory(&e) {
                SchemyError::OutputDirectoryNotFound {
                    path: path
                        .parent()
                        .map(Path::to_path_buf)
                        .unwrap_or_else(|| path.to_path_buf()),
                }
            } else {
                SchemyError::OutputWrite {
                    path: path.to_path_buf(),
                    source: e,
                }
            }
        })?;

    fill_new_file(path, file, contents).await
}

/// Write `contents` to `out`, the freshly created file at `path`. On failure
/// the file at `path` is removed.
async fn fill_new_file<W>(path: &Path, mut out: W, contents: &[u8]) -> SchemyResult<()>
where
    W: AsyncWrite + Unpin,
{
    let written = async {
        out.write_all(contents).await?;
        out.flush().await?;
        out.shutdown().await
    }
    .await;

    if let Err(e) = written {
        drop(out);
        if let Err(remove_err) = fs::remove_file(path).await {
            warn!(path = %path.display(), error = %remove_err, "could not remove partial output file");
        }
        return Err(SchemyError::OutputWrite {
            path: path.to_path_buf(),
            source: e,
        });
    }

    Ok(())
}
