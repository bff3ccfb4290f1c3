mod naming;
pub use naming::InstanceNamer;

mod version;
pub use version::bump_version_number;

use std::path::PathBuf;

use flowdeploy_model::{FlowArtifact, FlowDefinition, InstanceName, PackageManifest};
use tracing::{debug, instrument};

use crate::{
    error::{CoreError, io_err},
    workspace::Workspace,
};

/// Turns a flow definition into the files of a deployable package.
#[derive(Debug, Clone)]
pub struct Composer {
    api_version: String,
    bump_version: bool,
}

/// Files written into a workspace by [`Composer::write`].
#[derive(Debug, Clone)]
pub struct ComposedPackage {
    pub manifest: PackageManifest,
    pub manifest_path: PathBuf,
    pub flow_path: PathBuf,
}

impl Composer {
    pub fn new(api_version: impl Into<String>, bump_version: bool) -> Self {
        Self {
            api_version: api_version.into(),
            bump_version,
        }
    }

    /// Builds the artifact for one attempt, bumping the version if enabled.
    pub fn artifact(&self, definition: &FlowDefinition, instance: &InstanceName) -> FlowArtifact {
        let document = if self.bump_version {
            bump_version_number(&definition.document).into_owned()
        } else {
            definition.document.clone()
        };
        FlowArtifact {
            logical_name: definition.name.clone(),
            instance_name: instance.clone(),
            document,
        }
    }

    pub fn manifest(&self, artifact: &FlowArtifact) -> PackageManifest {
        PackageManifest::for_flow(&artifact.instance_name, self.api_version.clone())
    }

    /// Writes the flow file and the manifest into `workspace`.
    #[instrument(level = "debug", skip_all, fields(instance = %artifact.instance_name))]
    pub async fn write(
        &self,
        workspace: &Workspace,
        artifact: &FlowArtifact,
    ) -> Result<ComposedPackage, CoreError> {
        let flow_path = workspace.flows_dir().join(artifact.file_name());
        tokio::fs::write(&flow_path, artifact.document.as_bytes())
            .await
            .map_err(io_err(format!("write {}", flow_path.display())))?;

        let manifest = self.manifest(artifact);
        let manifest_path = workspace.manifest_path();
        tokio::fs::write(&manifest_path, manifest.to_xml())
            .await
            .map_err(io_err(format!("write {}", manifest_path.display())))?;

        debug!(flow = %flow_path.display(), "package composed");
        Ok(ComposedPackage {
            manifest,
            manifest_path,
            flow_path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workspace::WorkspaceManager;
    use flowdeploy_model::{DeployRequest, FLOW_FILE_SUFFIX};

    fn definition(doc: &str) -> FlowDefinition {
        DeployRequest::new(doc, "MyFlow").validate().unwrap()
    }

    #[test]
    fn artifact_bumps_version_when_enabled() {
        let def = definition("<Flow><versionNumber>3</versionNumber></Flow>");
        let instance = InstanceName::new(&def.name, 1);

        let bumped = Composer::new("65.0", true).artifact(&def, &instance);
        assert_eq!(bumped.document, "<Flow><versionNumber>4</versionNumber></Flow>");

        let kept = Composer::new("65.0", false).artifact(&def, &instance);
        assert_eq!(kept.document, def.document);
    }

    #[tokio::test]
    async fn manifest_members_match_flow_files() {
        let dir = tempfile::tempdir().unwrap();
        let def = definition("<Flow/>");
        let instance = InstanceName::new(&def.name, 77);
        let ws = WorkspaceManager::new(dir.path()).acquire(&instance).await.unwrap();

        let composer = Composer::new("65.0", true);
        let artifact = composer.artifact(&def, &instance);
        let package = composer.write(&ws, &artifact).await.unwrap();

        let files: Vec<String> = std::fs::read_dir(ws.flows_dir())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(files, vec![format!("MyFlow_77{FLOW_FILE_SUFFIX}")]);

        let members = package.manifest.members();
        assert_eq!(members.len(), 1);
        assert_eq!(format!("{}{FLOW_FILE_SUFFIX}", members[0]), files[0]);

        let manifest = std::fs::read_to_string(&package.manifest_path).unwrap();
        assert!(manifest.contains("<members>MyFlow_77</members>"));
        assert_eq!(std::fs::read_to_string(&package.flow_path).unwrap(), "<Flow/>");

        ws.release().await.unwrap();
    }
}
