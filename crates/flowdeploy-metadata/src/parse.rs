use flowdeploy_core::{RemoteError, Session};
use flowdeploy_model::{ComponentFailure, DeploySnapshot, DeployStatus, Flag, JobId};

use crate::xml::{element, elements, text, without};

/// SOAP fault returned instead of a result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Fault {
    pub code: String,
    pub message: String,
}

impl Fault {
    fn is_auth(&self) -> bool {
        ["INVALID_LOGIN", "INVALID_SESSION_ID", "LOGIN_MUST_USE_SECURITY_TOKEN"]
            .iter()
            .any(|code| self.code.contains(code))
    }

    /// Auth faults become `Unauthorized`, everything else `otherwise`.
    pub fn into_error(self, otherwise: fn(String) -> RemoteError) -> RemoteError {
        let text = if self.message.is_empty() {
            self.code.clone()
        } else {
            format!("{}: {}", self.code, self.message)
        };
        if self.is_auth() {
            RemoteError::Unauthorized(text)
        } else {
            otherwise(text)
        }
    }
}

pub(crate) fn fault(body: &str) -> Option<Fault> {
    let fault = element(body, "Fault")?;
    Some(Fault {
        code: text(fault, "faultcode").unwrap_or_default(),
        message: text(fault, "faultstring").unwrap_or_default(),
    })
}

fn result(body: &str) -> Result<&str, RemoteError> {
    element(body, "result").ok_or_else(|| RemoteError::InvalidResponse("missing <result>".into()))
}

fn required(xml: &str, tag: &str) -> Result<String, RemoteError> {
    text(xml, tag)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| RemoteError::InvalidResponse(format!("missing <{tag}>")))
}

fn number(xml: &str, tag: &str) -> u32 {
    text(xml, tag).and_then(|v| v.parse().ok()).unwrap_or(0)
}

fn flag(xml: &str, tag: &str) -> Result<Flag, RemoteError> {
    match text(xml, tag) {
        None => Ok(Flag(false)),
        Some(v) => v.parse().map_err(RemoteError::InvalidResponse),
    }
}

fn optional(xml: &str, tag: &str) -> Option<String> {
    text(xml, tag).filter(|v| !v.is_empty())
}

pub(crate) fn login(body: &str) -> Result<Session, RemoteError> {
    if let Some(fault) = fault(body) {
        return Err(fault.into_error(RemoteError::Unauthorized));
    }
    let result = result(body)?;
    Ok(Session {
        session_id: required(result, "sessionId")?.into(),
        metadata_url: required(result, "metadataServerUrl")?,
        user_id: optional(result, "userId"),
    })
}

pub(crate) fn deploy(body: &str) -> Result<JobId, RemoteError> {
    if let Some(fault) = fault(body) {
        return Err(fault.into_error(RemoteError::Rejected));
    }
    required(result(body)?, "id").map(JobId::from)
}

pub(crate) fn deploy_status(body: &str) -> Result<DeploySnapshot, RemoteError> {
    if let Some(fault) = fault(body) {
        return Err(fault.into_error(RemoteError::Rejected));
    }
    let result = result(body)?;
    // Component messages carry their own <id>, <success>, ...
    let top = without(result, "details");

    let status = required(&top, "status")?
        .parse::<DeployStatus>()
        .unwrap_or_else(|never| match never {});
    let failures = element(result, "details")
        .map(|details| {
            elements(details, "componentFailures")
                .into_iter()
                .map(component_failure)
                .collect()
        })
        .unwrap_or_default();

    Ok(DeploySnapshot {
        id: JobId::from(required(&top, "id")?),
        done: flag(&top, "done")?,
        success: flag(&top, "success")?,
        status,
        state_detail: optional(&top, "stateDetail"),
        error_message: optional(&top, "errorMessage"),
        error_status_code: optional(&top, "errorStatusCode"),
        number_components_total: number(&top, "numberComponentsTotal"),
        number_components_deployed: number(&top, "numberComponentsDeployed"),
        number_component_errors: number(&top, "numberComponentErrors"),
        component_failures: failures,
    })
}

fn component_failure(xml: &str) -> ComponentFailure {
    ComponentFailure {
        component_type: text(xml, "componentType").unwrap_or_default(),
        full_name: text(xml, "fullName").unwrap_or_default(),
        file_name: text(xml, "fileName").unwrap_or_default(),
        problem_type: text(xml, "problemType").unwrap_or_default(),
        problem: text(xml, "problem").unwrap_or_default(),
        line_number: text(xml, "lineNumber").and_then(|v| v.parse().ok()),
    }
}
