use serde::Serialize;

const BASH_PAY_FEATURE_FLAG: &str = "is_bash_pay";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum DevicePlatform {
    Mobi,
    Web,
}

impl DevicePlatform {
    pub fn from_is_mobile(is_mobile: bool) -> Self {
        if is_mobile {
            DevicePlatform::Mobi
        } else {
            DevicePlatform::Web
        }
    }
}

/// Identity attached to every collector batch. Only lives in process memory.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct IdentityContext {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<DevicePlatform>,
    #[serde(rename = "clientId", skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    #[serde(rename = "sessionId", skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feature_flag_parameters: Option<Vec<String>>,

    // carried by the app cookie payload, which is forwarded separately
    #[serde(skip)]
    pub app_instance_id: Option<String>,
    #[serde(skip)]
    pub is_app: bool,
    #[serde(skip)]
    pub is_mobile: bool,
}

impl IdentityContext {
    pub fn for_app() -> Self {
        Self {
            is_app: true,
            ..Self::default()
        }
    }

    pub fn for_web(
        client_id: Option<String>,
        session_id: Option<String>,
        is_mobile: bool,
        is_bash_pay: bool,
    ) -> Self {
        let flag = if is_bash_pay { BASH_PAY_FEATURE_FLAG } else { "" };

        Self {
            platform: Some(DevicePlatform::from_is_mobile(is_mobile)),
            client_id,
            session_id,
            feature_flag_parameters: Some(vec![flag.to_string()]),
            app_instance_id: None,
            is_app: false,
            is_mobile,
        }
    }

    pub fn has_client_id(&self) -> bool {
        self.client_id.as_deref().is_some_and(|id| !id.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_web_context_serialization() {
        let context = IdentityContext::for_web(
            Some("abc".to_string()),
            Some("xyz".to_string()),
            true,
            true,
        );

        assert_eq!(
            serde_json::to_value(&context).unwrap(),
            json!({
                "platform": "Mobi",
                "clientId": "abc",
                "sessionId": "xyz",
                "feature_flag_parameters": ["is_bash_pay"]
            })
        );
    }

    #[test]
    fn test_app_context_is_empty_object() {
        let context = IdentityContext::for_app();
        assert_eq!(serde_json::to_value(&context).unwrap(), json!({}));
        assert!(!context.has_client_id());
    }

    #[test]
    fn test_without_bash_pay_flag() {
        let context = IdentityContext::for_web(Some("abc".to_string()), None, false, false);
        let value = serde_json::to_value(&context).unwrap();

        assert_eq!(value["platform"], "Web");
        assert_eq!(value["feature_flag_parameters"], json!([""]));
        assert!(value.get("sessionId").is_none());
    }
}
