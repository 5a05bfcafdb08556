use serde::Serialize;

use crate::MessageBoxState;

/// Dialog body, tagged with how it must be rendered.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Body {
    Text(String),
    Html(String),
}

/// Everything a renderer needs for one frame.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageBoxView {
    pub visible: bool,
    pub loading: bool,
    pub title: String,
    pub body: Body,
    pub width: f32,
    pub top: String,
    pub confirm_label: String,
    pub cancel_label: String,
    /// The confirm control accepts input.
    pub confirm_enabled: bool,
}

impl MessageBoxState {
    pub fn view(&self) -> MessageBoxView {
        let content = self.content.get();
        let body = if self.is_html.get() {
            Body::Html(content)
        } else {
            Body::Text(content)
        };
        let loading = self.loading.get();
        MessageBoxView {
            visible: self.visible.get(),
            loading,
            title: self.title.get(),
            body,
            width: self.width.get(),
            top: self.top.get(),
            confirm_label: self.confirm_button_text.get(),
            cancel_label: self.cancel_button_text.get(),
            confirm_enabled: !loading,
        }
    }
}
