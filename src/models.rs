use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

pub const DEFAULT_OUTLINE_BASE_URL: &str = "https://app.getoutline.com";

/// Inbound body for `POST /api/pages`. The credentials travel alongside a
/// tagged operation; the tag is the `operation` field of the JSON body.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct PageRequest {
    pub api_key: String,
    pub email: String,
    #[serde(flatten)]
    pub operation: OperationRequest,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(tag = "operation", rename_all = "snake_case")]
pub enum OperationRequest {
    Create {
        collection_id: String,
        title: String,
        content: String,
    },
    Read {
        document_id: String,
    },
    Update {
        document_id: String,
        content: String,
        #[serde(flatten)]
        kind: UpdateKind,
    },
    UpdateTable {
        document_id: String,
        table_data: IndexMap<String, String>,
        #[serde(default)]
        sort_by: Option<String>,
        #[serde(default)]
        sort_order: SortOrder,
    },
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(tag = "update_type", rename_all = "snake_case")]
pub enum UpdateKind {
    Append,
    Prepend,
    Replace,
    FindReplace { find: String },
}

impl UpdateKind {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Append => "append",
            Self::Prepend => "prepend",
            Self::Replace => "replace",
            Self::FindReplace { .. } => "find_replace",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl PageRequest {
    /// Field-level checks that serde cannot express: empty strings count as
    /// missing (matching how callers tend to template these bodies), and the
    /// sort column must be one of the row's own keys.
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut missing: Vec<&str> = Vec::new();

        if self.api_key.trim().is_empty() {
            missing.push("api_key");
        }
        if self.email.trim().is_empty() {
            missing.push("email");
        }

        match &self.operation {
            OperationRequest::Create {
                collection_id,
                title,
                content,
            } => {
                if collection_id.trim().is_empty() {
                    missing.push("collection_id");
                }
                if title.trim().is_empty() {
                    missing.push("title");
                }
                if content.is_empty() {
                    missing.push("content");
                }
            }
            OperationRequest::Read { document_id } => {
                if document_id.trim().is_empty() {
                    missing.push("document_id");
                }
            }
            OperationRequest::Update {
                document_id,
                content,
                kind,
            } => {
                if document_id.trim().is_empty() {
                    missing.push("document_id");
                }
                if content.is_empty() {
                    missing.push("content");
                }
                if let UpdateKind::FindReplace { find } = kind {
                    if find.is_empty() {
                        missing.push("find");
                    }
                }
            }
            OperationRequest::UpdateTable {
                document_id,
                table_data,
                sort_by,
                sort_order: _,
            } => {
                if document_id.trim().is_empty() {
                    missing.push("document_id");
                }
                if table_data.is_empty() {
                    missing.push("table_data");
                }
                if let Some(column) = sort_by {
                    if !table_data.contains_key(column) {
                        return Err(ApiError::Validation(format!(
                            "sort_by column {column:?} is not one of the table_data keys"
                        )));
                    }
                }
            }
        }

        if !missing.is_empty() {
            return Err(ApiError::Validation(format!(
                "missing or empty required fields: {}",
                missing.join(", ")
            )));
        }

        if !self.email.contains('@') {
            return Err(ApiError::Validation(
                "email is not a valid address".to_string(),
            ));
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreatePageResponse {
    pub success: bool,
    pub operation: String,
    pub document_id: String,
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReadPageResponse {
    pub success: bool,
    pub operation: String,
    pub document: DocumentPayload,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DocumentPayload {
    pub id: String,
    pub title: String,
    pub content: String,
    pub url: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdatePageResponse {
    pub success: bool,
    pub operation: String,
    pub update_type: String,
    pub document_id: String,
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateTablePageResponse {
    pub success: bool,
    pub operation: String,
    pub document_id: String,
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub success: bool,
    pub code: String,
    pub error: String,
}
