use std::fmt::Write;

use serde::{Deserialize, Serialize};

use crate::{ApiVersion, FLOW_TYPE, InstanceName, METADATA_NAMESPACE};

/// Package descriptor (`package.xml`) listing the artifacts being deployed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageManifest {
    /// Metadata type of every member.
    pub type_name: String,
    /// Member names; each must match a file under the package's type folder.
    pub members: Vec<String>,
    pub version: ApiVersion,
}

impl PackageManifest {
    /// Manifest for a single flow.
    pub fn for_flow(instance: &InstanceName, version: impl Into<ApiVersion>) -> Self {
        Self {
            type_name: FLOW_TYPE.to_string(),
            members: vec![instance.to_string()],
            version: version.into(),
        }
    }

    pub fn members(&self) -> &[String] {
        &self.members
    }

    pub fn to_xml(&self) -> String {
        let mut xml = String::new();
        xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        let _ = writeln!(xml, "<Package xmlns=\"{METADATA_NAMESPACE}\">");
        xml.push_str("  <types>\n");
        for member in &self.members {
            let _ = writeln!(xml, "    <members>{member}</members>");
        }
        let _ = writeln!(xml, "    <name>{}</name>", self.type_name);
        xml.push_str("  </types>\n");
        let _ = write!(xml, "  <version>{}</version>\n</Package>", self.version);
        xml
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FlowName;

    #[test]
    fn renders_single_flow_manifest() {
        let instance = InstanceName::new(&FlowName::parse("MyFlow").unwrap(), 42);
        let manifest = PackageManifest::for_flow(&instance, "65.0");

        let expected = r#"<?xml version="1.0" encoding="UTF-8"?>
<Package xmlns="http://soap.sforce.com/2006/04/metadata">
  <types>
    <members>MyFlow_42</members>
    <name>Flow</name>
  </types>
  <version>65.0</version>
</Package>"#;
        assert_eq!(manifest.to_xml(), expected);
        assert_eq!(manifest.members(), ["MyFlow_42".to_string()]);
    }
}
