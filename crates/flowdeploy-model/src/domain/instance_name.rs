use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{FLOW_FILE_SUFFIX, FlowName};

/// Logical flow name made unique for one deployment attempt.
///
/// Rendered as `{logical}_{tick}`; distinct ticks always give distinct names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstanceName(String);

impl InstanceName {
    pub fn new(logical: &FlowName, tick: u64) -> Self {
        Self(format!("{logical}_{tick}"))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File name of the flow document inside the package's `flows/` folder.
    pub fn file_name(&self) -> String {
        format!("{}{}", self.0, FLOW_FILE_SUFFIX)
    }

    /// File name of the archive built for this attempt.
    pub fn archive_name(&self) -> String {
        format!("{}.zip", self.0)
    }
}

impl fmt::Display for InstanceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for InstanceName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl AsRef<std::path::Path> for InstanceName {
    fn as_ref(&self) -> &std::path::Path {
        std::path::Path::new(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_names() {
        let logical = FlowName::parse("MyFlow").unwrap();
        let name = InstanceName::new(&logical, 1_700_000_000_123);

        assert_eq!(name.as_str(), "MyFlow_1700000000123");
        assert_eq!(name.file_name(), "MyFlow_1700000000123.flow-meta.xml");
        assert_eq!(name.archive_name(), "MyFlow_1700000000123.zip");
    }

    #[test]
    fn distinct_ticks_give_distinct_names() {
        let logical = FlowName::parse("MyFlow").unwrap();
        assert_ne!(InstanceName::new(&logical, 1), InstanceName::new(&logical, 2));
    }
}
