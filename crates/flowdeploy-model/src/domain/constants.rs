/// Metadata type name of every artifact this crate packages.
pub const FLOW_TYPE: &str = "Flow";

/// Top-level folder holding flow files, both in the workspace and in the archive.
pub const FLOWS_DIR: &str = "flows";

/// Manifest file name at the package root.
pub const MANIFEST_FILE: &str = "package.xml";

/// Suffix appended to an instance name to form the flow file name.
pub const FLOW_FILE_SUFFIX: &str = ".flow-meta.xml";

/// XML namespace of the package manifest.
pub const METADATA_NAMESPACE: &str = "http://soap.sforce.com/2006/04/metadata";

pub const DEFAULT_API_VERSION: &str = "65.0";
