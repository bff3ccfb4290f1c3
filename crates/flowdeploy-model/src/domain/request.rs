use serde::{Deserialize, Serialize};

use crate::{FlowName, ModelError};

/// Raw deployment request as received from a caller.
///
/// Both fields are optional on the wire so that a missing field can be
/// reported by name instead of failing deserialisation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeployRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flow_xml: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flow_name: Option<String>,
}

/// A request that passed validation: a non-empty document and a usable name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowDefinition {
    pub name: FlowName,
    pub document: String,
}

impl DeployRequest {
    pub fn new(flow_xml: impl Into<String>, flow_name: impl Into<String>) -> Self {
        Self {
            flow_xml: Some(flow_xml.into()),
            flow_name: Some(flow_name.into()),
        }
    }

    /// Names of required fields that are absent or empty.
    ///
    /// The document is opaque, so only an empty `flowXml` is missing; a
    /// whitespace-only `flowName` is missing too.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.flow_xml.as_deref().is_none_or(str::is_empty) {
            missing.push("flowXml");
        }
        if self.flow_name.as_deref().is_none_or(|s| s.trim().is_empty()) {
            missing.push("flowName");
        }
        missing
    }

    pub fn validate(self) -> Result<FlowDefinition, ModelError> {
        match self.missing_fields().as_slice() {
            [] => {}
            [one] => return Err(ModelError::Missing(*one)),
            many => {
                return Err(ModelError::MissingFields {
                    fields: many.join(" and "),
                });
            }
        }

        let name = FlowName::parse(self.flow_name.as_deref().unwrap_or_default())?;
        Ok(FlowDefinition {
            name,
            document: self.flow_xml.unwrap_or_default(),
        })
    }
}

impl From<FlowDefinition> for DeployRequest {
    fn from(def: FlowDefinition) -> Self {
        Self {
            flow_xml: Some(def.document),
            flow_name: Some(def.name.into()),
        }
    }
}
