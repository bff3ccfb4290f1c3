use std::{
    io,
    path::{Path, PathBuf},
};

use flowdeploy_model::{FLOWS_DIR, InstanceName, MANIFEST_FILE};
use tracing::{debug, instrument, warn};

use crate::error::{CoreError, io_err};

/// Allocates per-attempt scratch directories under one root.
///
/// Every attempt gets `{root}/{instance}/`; nothing is shared between
/// attempts, so concurrent deployments never see each other's files.
#[derive(Debug, Clone)]
pub struct WorkspaceManager {
    root: PathBuf,
}

impl WorkspaceManager {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, instance: &InstanceName) -> PathBuf {
        self.root.join(instance)
    }

    /// Creates a fresh, empty workspace for `instance`.
    ///
    /// Leftovers at the same path are removed first.
    #[instrument(level = "debug", skip(self), fields(%instance))]
    pub async fn acquire(&self, instance: &InstanceName) -> Result<Workspace, CoreError> {
        let root = self.path_for(instance);

        if tokio::fs::try_exists(&root).await.unwrap_or(false) {
            warn!(path = %root.display(), "removing stale workspace");
            tokio::fs::remove_dir_all(&root)
                .await
                .map_err(io_err(format!("remove stale workspace {}", root.display())))?;
        }

        let flows = root.join(FLOWS_DIR);
        tokio::fs::create_dir_all(&flows)
            .await
            .map_err(io_err(format!("create workspace {}", flows.display())))?;

        debug!(path = %root.display(), "workspace acquired");
        Ok(Workspace {
            root,
            flows,
            released: false,
        })
    }
}

/// Scratch directory tree owned by exactly one deployment attempt.
///
/// Call [`Workspace::release`] when the attempt ends. A handle dropped
/// without release (e.g. the request future was cancelled) still removes its
/// tree: on the blocking pool when a tokio runtime is current, inline
/// otherwise.
#[derive(Debug)]
pub struct Workspace {
    root: PathBuf,
    flows: PathBuf,
    released: bool,
}

impl Workspace {
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn flows_dir(&self) -> &Path {
        &self.flows
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.root.join(MANIFEST_FILE)
    }

    /// Recursively removes the workspace tree.
    #[instrument(level = "debug", skip(self), fields(path = %self.root.display()))]
    pub async fn release(mut self) -> Result<(), CoreError> {
        self.released = true;
        match tokio::fs::remove_dir_all(&self.root).await {
            Ok(()) => {
                debug!("workspace released");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_err(format!("remove workspace {}", self.root.display()))(e)),
        }
    }
}

impl Drop for Workspace {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        warn!(path = %self.root.display(), "workspace dropped without release; removing");
        let root = std::mem::take(&mut self.root);
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn_blocking(move || remove_tree(&root));
            }
            Err(_) => remove_tree(&root),
        }
    }
}

fn remove_tree(root: &Path) {
    if let Err(e) = std::fs::remove_dir_all(root)
        && e.kind() != io::ErrorKind::NotFound
    {
        warn!(path = %root.display(), error = %e, "failed to remove workspace");
    }
}
