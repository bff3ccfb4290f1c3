use crate::{FlowName, InstanceName};

/// A flow ready to be written into a package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowArtifact {
    pub logical_name: FlowName,
    /// `logical_name` made unique for this attempt; also the manifest member name.
    pub instance_name: InstanceName,
    /// Flow definition as it will be deployed.
    pub document: String,
}

impl FlowArtifact {
    /// File name under the package's `flows/` folder.
    pub fn file_name(&self) -> String {
        self.instance_name.file_name()
    }
}
