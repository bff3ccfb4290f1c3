use flowdeploy_core::DeployOptions;
use flowdeploy_model::JobId;

use crate::xml::escape;

const ENV_OPEN: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<soapenv:Envelope xmlns:soapenv="http://schemas.xmlsoap.org/soap/envelope/" xmlns:met="http://soap.sforce.com/2006/04/metadata">"#;
const ENV_CLOSE: &str = "</soapenv:Envelope>";

pub(crate) fn login(username: &str, password: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<soapenv:Envelope xmlns:soapenv="http://schemas.xmlsoap.org/soap/envelope/" xmlns:urn="urn:partner.soap.sforce.com">
<soapenv:Body><urn:login><urn:username>{}</urn:username><urn:password>{}</urn:password></urn:login></soapenv:Body>
</soapenv:Envelope>"#,
        escape(username),
        escape(password)
    )
}

fn session_header(session_id: &str) -> String {
    format!(
        "<soapenv:Header><met:SessionHeader><met:sessionId>{}</met:sessionId></met:SessionHeader></soapenv:Header>",
        escape(session_id)
    )
}

pub(crate) fn deploy(session_id: &str, zip_base64: &str, options: &DeployOptions) -> String {
    format!(
        "{ENV_OPEN}\n{}\n<soapenv:Body><met:deploy><met:ZipFile>{zip_base64}</met:ZipFile><met:DeployOptions>\
<met:checkOnly>{}</met:checkOnly><met:rollbackOnError>{}</met:rollbackOnError><met:singlePackage>{}</met:singlePackage>\
</met:DeployOptions></met:deploy></soapenv:Body>\n{ENV_CLOSE}",
        session_header(session_id),
        options.check_only,
        options.rollback_on_error,
        options.single_package,
    )
}

pub(crate) fn check_deploy_status(session_id: &str, job: &JobId, include_details: bool) -> String {
    format!(
        "{ENV_OPEN}\n{}\n<soapenv:Body><met:checkDeployStatus><met:asyncProcessId>{}</met:asyncProcessId>\
<met:includeDetails>{include_details}</met:includeDetails></met:checkDeployStatus></soapenv:Body>\n{ENV_CLOSE}",
        session_header(session_id),
        escape(job.as_str()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::text;

    #[test]
    fn login_escapes_credentials() {
        let body = login("ops@example.com", "p<a>ss&TOKEN");
        assert!(body.contains("<urn:password>p&lt;a&gt;ss&amp;TOKEN</urn:password>"));
        assert_eq!(text(&body, "password").as_deref(), Some("p<a>ss&TOKEN"));
    }

    #[test]
    fn deploy_carries_options_and_payload() {
        let body = deploy("SID", "UEsDBA==", &DeployOptions::default());
        assert_eq!(text(&body, "sessionId").as_deref(), Some("SID"));
        assert_eq!(text(&body, "ZipFile").as_deref(), Some("UEsDBA=="));
        assert_eq!(text(&body, "singlePackage").as_deref(), Some("true"));
        assert_eq!(text(&body, "rollbackOnError").as_deref(), Some("true"));
        assert_eq!(text(&body, "checkOnly").as_deref(), Some("false"));
    }

    #[test]
    fn status_request_names_job() {
        let body = check_deploy_status("SID", &JobId::new("0Af1"), true);
        assert_eq!(text(&body, "asyncProcessId").as_deref(), Some("0Af1"));
        assert_eq!(text(&body, "includeDetails").as_deref(), Some("true"));
    }
}
