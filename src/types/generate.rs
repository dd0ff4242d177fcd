use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct GenerateRequest {
    #[serde(default)]
    #[schema(example = "https://www.google.com")]
    pub text: Option<String>,
}

impl GenerateRequest {
    /// The text to encode, or `None` when it is absent or empty.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref().filter(|t| !t.is_empty())
    }
}
