use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Method token for requests without side effects.
pub const READ_METHOD: &str = "GET";

/// Describes an outbound call. An absent method means [`READ_METHOD`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
}

impl RequestConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_json_body<B: Serialize>(self, body: &B) -> Result<Self, serde_json::Error> {
        Ok(self.with_body(serde_json::to_value(body)?))
    }

    pub fn method_or_default(&self) -> &str {
        self.method.as_deref().unwrap_or(READ_METHOD)
    }

    pub fn is_read(&self) -> bool {
        self.method_or_default() == READ_METHOD
    }
}

pub fn should_auto_invoke(config: Option<&RequestConfig>) -> bool {
    config.map_or(true, RequestConfig::is_read)
}

#[derive(Debug, Clone, PartialEq)]
pub struct RequestState<T> {
    pub data: T,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl<T> RequestState<T> {
    pub fn new(initial: T) -> Self {
        Self {
            data: initial,
            is_loading: false,
            error: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestEvent {
    Started { invocation: u64 },
    Succeeded { invocation: u64 },
    Failed { invocation: u64, message: String },
    Cleared,
}

impl RequestEvent {
    pub fn invocation(&self) -> Option<u64> {
        match self {
            RequestEvent::Started { invocation }
            | RequestEvent::Succeeded { invocation }
            | RequestEvent::Failed { invocation, .. } => Some(*invocation),
            RequestEvent::Cleared => None,
        }
    }

    pub fn is_settled(&self) -> bool {
        matches!(
            self,
            RequestEvent::Succeeded { .. } | RequestEvent::Failed { .. }
        )
    }
}
