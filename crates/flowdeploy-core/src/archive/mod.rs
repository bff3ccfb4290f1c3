use std::{
    io::{Cursor, Write},
    path::{Path, PathBuf},
};

use flowdeploy_model::{FLOWS_DIR, InstanceName, MANIFEST_FILE};
use tokio::task::spawn_blocking;
use tracing::{debug, instrument};
use zip::{CompressionMethod, ZipWriter, write::SimpleFileOptions};

use crate::{
    error::{CoreError, io_err},
    workspace::Workspace,
};

/// A built package archive.
#[derive(Debug, Clone)]
pub struct Archive {
    /// Where the archive was written inside the workspace.
    pub path: PathBuf,
    /// Raw ZIP bytes, as submitted.
    pub bytes: Vec<u8>,
}

/// Packs a composed workspace into a ZIP archive.
///
/// Layout: the manifest at the archive root and every flow file under
/// `flows/`. Entries are sorted by name so equal workspaces give equal
/// entry lists.
#[derive(Debug, Clone, Copy)]
pub struct ArchiveBuilder {
    compression: CompressionMethod,
}

impl Default for ArchiveBuilder {
    fn default() -> Self {
        Self {
            compression: CompressionMethod::Deflated,
        }
    }
}

impl ArchiveBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stored(mut self) -> Self {
        self.compression = CompressionMethod::Stored;
        self
    }

    #[instrument(level = "debug", skip_all, fields(%instance))]
    pub async fn build(
        &self,
        workspace: &Workspace,
        instance: &InstanceName,
    ) -> Result<Archive, CoreError> {
        let root = workspace.root().to_path_buf();
        let manifest = workspace.manifest_path();
        let flows = workspace.flows_dir().to_path_buf();
        let path = root.join(instance.archive_name());
        let compression = self.compression;

        let archive = spawn_blocking(move || build_sync(&manifest, &flows, path, compression))
            .await
            .map_err(|e| CoreError::Archive(format!("archive task failed: {e}")))??;

        debug!(
            path = %archive.path.display(),
            size = archive.bytes.len(),
            "archive built"
        );
        Ok(archive)
    }
}

fn build_sync(
    manifest: &Path,
    flows: &Path,
    path: PathBuf,
    compression: CompressionMethod,
) -> Result<Archive, CoreError> {
    if !manifest.is_file() {
        return Err(CoreError::MissingArtifact(manifest.to_path_buf()));
    }
    let flow_files = list_files(flows)?;
    if flow_files.is_empty() {
        return Err(CoreError::MissingArtifact(flows.to_path_buf()));
    }

    let options = SimpleFileOptions::default()
        .compression_method(compression)
        .unix_permissions(0o644);
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));

    add_file(&mut zip, MANIFEST_FILE.to_string(), manifest, options)?;
    for (name, file) in &flow_files {
        add_file(&mut zip, format!("{FLOWS_DIR}/{name}"), file, options)?;
    }

    let bytes = zip
        .finish()
        .map_err(|e| CoreError::Archive(e.to_string()))?
        .into_inner();

    std::fs::write(&path, &bytes).map_err(io_err(format!("write {}", path.display())))?;
    Ok(Archive { path, bytes })
}

/// Regular files directly inside `dir`, sorted by name.
fn list_files(dir: &Path) -> Result<Vec<(String, PathBuf)>, CoreError> {
    let entries = std::fs::read_dir(dir).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => CoreError::MissingArtifact(dir.to_path_buf()),
        _ => io_err(format!("read {}", dir.display()))(e),
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(io_err(format!("read {}", dir.display())))?;
        let path = entry.path();
        if path.is_file() {
            files.push((entry.file_name().to_string_lossy().into_owned(), path));
        }
    }
    files.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(files)
}

fn add_file(
    zip: &mut ZipWriter<Cursor<Vec<u8>>>,
    name: String,
    source: &Path,
    options: SimpleFileOptions,
) -> Result<(), CoreError> {
    let content = std::fs::read(source).map_err(io_err(format!("read {}", source.display())))?;
    zip.start_file(name, options)
        .map_err(|e| CoreError::Archive(e.to_string()))?;
    zip.write_all(&content)
        .map_err(io_err(format!("compress {}", source.display())))?;
    Ok(())
}
