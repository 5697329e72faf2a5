use serde::{Deserialize, Serialize};

/// Display name used when a stored user has no `userName` attribute.
pub const DEFAULT_USER_NAME: &str = "Unknown";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub user_id: String,
    #[serde(default)]
    pub user_name: Option<String>,
}

impl UserRecord {
    pub fn new(user_id: impl Into<String>, user_name: Option<&str>) -> Self {
        Self {
            user_id: user_id.into(),
            user_name: user_name.map(str::to_string),
        }
    }

    pub fn display_name(&self) -> &str {
        self.user_name.as_deref().unwrap_or(DEFAULT_USER_NAME)
    }
}
