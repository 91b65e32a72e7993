use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Connector-agnostic node in the tree of items an integration exposes
///
/// Items reference their parent by `parent_id`; clients rebuild the tree from
/// that link. Directories additionally list their `children` ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntegrationItem {
    pub id: String,
    #[serde(rename = "type")]
    pub item_type: String,
    pub directory: bool,
    pub parent_path_or_name: Option<String>,
    pub parent_id: Option<String>,
    pub name: String,
    pub creation_time: Option<DateTime<Utc>>,
    pub last_modified_time: Option<DateTime<Utc>>,
    pub url: Option<String>,
    pub children: Option<Vec<String>>,
    pub mime_type: Option<String>,
    pub delta: Option<String>,
    pub drive_id: Option<String>,
    #[serde(default = "default_visibility")]
    pub visibility: bool,
}

fn default_visibility() -> bool {
    true
}

impl IntegrationItem {
    pub fn new(id: impl Into<String>, item_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            item_type: item_type.into(),
            directory: false,
            parent_path_or_name: None,
            parent_id: None,
            name: name.into(),
            creation_time: None,
            last_modified_time: None,
            url: None,
            children: None,
            mime_type: None,
            delta: None,
            drive_id: None,
            visibility: true,
        }
    }

    pub fn with_parent(mut self, parent_id: impl Into<String>, parent_name: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self.parent_path_or_name = Some(parent_name.into());
        self
    }

    pub fn as_directory(mut self) -> Self {
        self.directory = true;
        self
    }

    pub fn with_times(
        mut self,
        creation_time: Option<DateTime<Utc>>,
        last_modified_time: Option<DateTime<Utc>>,
    ) -> Self {
        self.creation_time = creation_time;
        self.last_modified_time = last_modified_time;
        self
    }
}
