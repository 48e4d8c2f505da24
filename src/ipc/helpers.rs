use crate::error::ConfigurationError;
use crate::ipc::error::err;
use serde::de::DeserializeOwned;
use serde_json::json;

pub struct HandlerErr {
    pub code: &'static str,
    pub message: String,
    pub details: Option<serde_json::Value>,
}

impl HandlerErr {
    pub fn bad_params(message: impl Into<String>) -> Self {
        Self {
            code: "bad_params",
            message: message.into(),
            details: None,
        }
    }

    pub fn response(self, id: &str) -> serde_json::Value {
        err(id, self.code, self.message, self.details)
    }
}

impl From<ConfigurationError> for HandlerErr {
    fn from(e: ConfigurationError) -> Self {
        Self {
            code: "configuration_error",
            message: e.to_string(),
            details: Some(json!({ "kind": e.code() })),
        }
    }
}

pub fn required_u32(params: &serde_json::Value, key: &str) -> Result<u32, HandlerErr> {
    let Some(v) = params.get(key) else {
        return Err(HandlerErr::bad_params(format!("missing params.{key}")));
    };
    v.as_u64()
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(|| HandlerErr::bad_params(format!("params.{key} must be a non-negative integer")))
}

pub fn required_f64(params: &serde_json::Value, key: &str) -> Result<f64, HandlerErr> {
    let Some(v) = params.get(key) else {
        return Err(HandlerErr::bad_params(format!("missing params.{key}")));
    };
    v.as_f64()
        .ok_or_else(|| HandlerErr::bad_params(format!("params.{key} must be a number")))
}

/// Deserializes `params.<key>` (absent reads as null).
pub fn field<T: DeserializeOwned>(params: &serde_json::Value, key: &str) -> Result<T, HandlerErr> {
    let raw = params.get(key).cloned().unwrap_or(serde_json::Value::Null);
    serde_json::from_value(raw).map_err(|e| HandlerErr {
        code: "bad_params",
        message: format!("invalid params.{key}"),
        details: Some(json!({ "reason": e.to_string() })),
    })
}

pub fn check_course_limit(count: usize, limit: usize) -> Result<(), HandlerErr> {
    if count > limit {
        return Err(HandlerErr {
            code: "bad_params",
            message: format!("too many courses (max {limit})"),
            details: Some(json!({ "count": count, "max": limit })),
        });
    }
    Ok(())
}
