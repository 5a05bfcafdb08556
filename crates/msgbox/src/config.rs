use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::MessageBoxError;

/// Defaults the dialog starts from and returns to on every reset.
///
/// Every field is optional when deserializing; missing ones keep their
/// built-in value.
///
/// ```rust
/// use msgbox::MessageBoxDefaults;
///
/// let d = MessageBoxDefaults::from_json(r#"{ "width": 420, "confirmButtonText": "OK" }"#).unwrap();
/// assert_eq!(d.width, 420.0);
/// assert_eq!(d.confirm_button_text, "OK");
/// assert_eq!(d.cancel_button_text, "取消");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MessageBoxDefaults {
    pub width: f32,
    /// Vertical offset, as a CSS length.
    pub top: String,
    pub confirm_button_text: String,
    pub cancel_button_text: String,
    /// How long the closing transition gets before the state is reset.
    pub close_delay_ms: u64,
}

impl Default for MessageBoxDefaults {
    fn default() -> Self {
        Self {
            width: 380.0,
            top: "30vh".into(),
            confirm_button_text: "确定".into(),
            cancel_button_text: "取消".into(),
            close_delay_ms: 200,
        }
    }
}

impl MessageBoxDefaults {
    pub fn from_json(json: &str) -> Result<Self, MessageBoxError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, MessageBoxError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn close_delay(&self) -> Duration {
        Duration::from_millis(self.close_delay_ms)
    }
}
