//! GitHub API request and response bodies.

use serde::{Deserialize, Serialize};

/// Authenticated user returned by `GET /user`
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubUser {
    pub login: String,
}

/// Repository handle returned by the repository endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    pub name: String,
    pub full_name: String,
    /// Browsable URL
    pub html_url: String,
    pub clone_url: String,
    #[serde(default)]
    pub private: bool,
}

#[derive(Debug, Serialize)]
pub struct CreateRepositoryBody<'a> {
    pub name: &'a str,
    pub private: bool,
    pub description: &'a str,
}

#[derive(Debug, Serialize)]
pub struct CollaboratorBody<'a> {
    pub permission: &'a str,
}

/// `GET /repos/{owner}/{repo}/contents/{path}` answers with an object for a
/// file and an array for a directory
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ContentsResponse {
    File(ContentFile),
    Directory(Vec<serde_json::Value>),
}

#[derive(Debug, Deserialize)]
pub struct ContentFile {
    #[serde(rename = "type")]
    pub kind: String,
    pub sha: String,
}

#[derive(Debug, Serialize)]
pub struct PutContentsBody<'a> {
    pub message: &'a str,
    /// Base64 encoded file content
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha: Option<&'a str>,
}

/// Error document GitHub returns alongside non-2xx statuses
#[derive(Debug, Default, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub errors: Vec<ApiErrorDetail>,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorDetail {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub field: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
}

impl ApiErrorBody {
    /// Flatten the top-level message and the per-field details into one line
    pub fn describe(&self) -> String {
        let details: Vec<String> = self
            .errors
            .iter()
            .filter_map(|detail| match (&detail.message, &detail.field, &detail.code) {
                (Some(message), _, _) => Some(message.clone()),
                (None, Some(field), Some(code)) => Some(format!("{field} {code}")),
                (None, None, Some(code)) => Some(code.clone()),
                _ => None,
            })
            .collect();

        match (self.message.is_empty(), details.is_empty()) {
            (false, true) => self.message.clone(),
            (false, false) => format!("{} ({})", self.message, details.join("; ")),
            (true, false) => details.join("; "),
            (true, true) => String::new(),
        }
    }
}
