use std::{fmt, ops::Deref};

use serde::{Deserialize, Serialize};

use crate::ModelError;

/// Validated logical name of a flow.
///
/// The name ends up inside a file name in the scratch workspace and as a
/// metadata API name on the remote platform, so it must start with an ASCII
/// letter and contain only ASCII letters, digits and `_`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FlowName(String);

impl FlowName {
    pub fn parse(raw: &str) -> Result<Self, ModelError> {
        let name = raw.trim();
        if name.is_empty() {
            return Err(ModelError::Missing("flowName"));
        }

        let invalid = |reason| ModelError::InvalidFlowName {
            name: name.to_string(),
            reason,
        };

        if !name.starts_with(|c: char| c.is_ascii_alphabetic()) {
            return Err(invalid("must start with a letter"));
        }
        if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(invalid("only letters, digits and '_' are allowed"));
        }
        Ok(Self(name.to_string()))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Deref for FlowName {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Display for FlowName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for FlowName {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<FlowName> for String {
    fn from(name: FlowName) -> Self {
        name.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_and_accepts_api_names() {
        let name = FlowName::parse("  Account_Onboarding2 ").unwrap();
        assert_eq!(name.as_str(), "Account_Onboarding2");
    }

    #[test]
    fn empty_name_is_missing() {
        assert_eq!(FlowName::parse("   "), Err(ModelError::Missing("flowName")));
    }

    #[test]
    fn rejects_path_like_names() {
        for raw in ["../escape", "a/b", "a.b", "_lead", "9lives", "name with space"] {
            assert!(
                matches!(FlowName::parse(raw), Err(ModelError::InvalidFlowName { .. })),
                "{raw} should be rejected"
            );
        }
    }
}
