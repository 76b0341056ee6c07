//! Boundary contracts for the Git-hosting provider.
//!
//! The actual Git hosting API (GitLab or otherwise) is an external
//! collaborator; this crate only fixes the seam: a file-level repository
//! interface, the commit wire payload, and the per-request `before` hook
//! the host can install. None of these types perform I/O themselves.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::AppError;

/// One entry in a repository file listing.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct FileEntry {
    pub path: String,
    pub name: String,
}

/// Contents of a single repository file.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct FileContent {
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoding: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CommitActionKind {
    Create,
    Delete,
    Move,
    Update,
}

/// A single file operation inside a commit. Field names follow the Git
/// hosting API's commit endpoint and must not be renamed.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CommitAction {
    pub action: CommitActionKind,
    pub file_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoding: Option<String>,
}

/// Commit payload sent to the Git hosting API.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CommitBody {
    pub actions: Vec<CommitAction>,
    pub branch: String,
    pub commit_message: String,
}

/// File-level view of a remote repository.
#[async_trait]
pub trait RepositoryBackend: Send + Sync {
    async fn list_files(&self, path: &str, r#ref: Option<&str>)
        -> Result<Vec<FileEntry>, AppError>;

    async fn read_file(&self, path: &str, r#ref: Option<&str>) -> Result<FileContent, AppError>;

    async fn commit(&self, body: &CommitBody) -> Result<(), AppError>;
}

/// Context handed to the host's `before` hook.
#[derive(Debug, Clone, Default)]
pub struct BeforeData {
    pub path: Option<String>,
    pub r#ref: Option<String>,
}

/// Host-supplied hook run before each repository request.
#[async_trait]
pub trait BeforeHook: Send + Sync {
    async fn before(&self, data: &BeforeData) -> Result<(), AppError>;
}

/// Server-level options shared across the HTTP surface.
#[derive(Clone, Default)]
pub struct ServerOptions {
    pub project_id: String,
    /// Route prefix the endpoints are mounted under, e.g. "/admin"
    pub prefix: Option<String>,
    pub before: Option<Arc<dyn BeforeHook>>,
}

impl ServerOptions {
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            prefix: None,
            before: None,
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn with_before(mut self, before: Arc<dyn BeforeHook>) -> Self {
        self.before = Some(before);
        self
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn commit_body_matches_the_wire_format() {
        let body = CommitBody {
            actions: vec![
                CommitAction {
                    action: CommitActionKind::Create,
                    file_path: "posts/hello.json".to_string(),
                    content: Some("{}".to_string()),
                    encoding: None,
                },
                CommitAction {
                    action: CommitActionKind::Delete,
                    file_path: "posts/old.json".to_string(),
                    content: None,
                    encoding: None,
                },
            ],
            branch: "master".to_string(),
            commit_message: "Update posts".to_string(),
        };

        let wire = serde_json::to_value(&body).unwrap();
        assert_eq!(
            wire,
            json!({
                "actions": [
                    {"action": "create", "file_path": "posts/hello.json", "content": "{}"},
                    {"action": "delete", "file_path": "posts/old.json"}
                ],
                "branch": "master",
                "commit_message": "Update posts"
            })
        );
    }

    #[test]
    fn action_kind_round_trips_lowercase() {
        let kind: CommitActionKind = serde_json::from_value(json!("move")).unwrap();
        assert_eq!(kind, CommitActionKind::Move);
        assert_eq!(serde_json::to_value(kind).unwrap(), json!("move"));
    }

    /// Minimal in-memory backend, enough to drive the seam as a trait object.
    struct MemoryRepo {
        files: std::sync::Mutex<std::collections::BTreeMap<String, String>>,
    }

    #[async_trait]
    impl RepositoryBackend for MemoryRepo {
        async fn list_files(
            &self,
            path: &str,
            _ref: Option<&str>,
        ) -> Result<Vec<FileEntry>, AppError> {
            let files = self.files.lock().unwrap();
            Ok(files
                .keys()
                .filter(|p| p.starts_with(path))
                .map(|p| FileEntry {
                    path: p.clone(),
                    name: p.rsplit('/').next().unwrap_or(p).to_string(),
                })
                .collect())
        }

        async fn read_file(&self, path: &str, _ref: Option<&str>) -> Result<FileContent, AppError> {
            let files = self.files.lock().unwrap();
            let content = files
                .get(path)
                .cloned()
                .ok_or_else(|| AppError::internal(format!("no such file: {path}")))?;
            Ok(FileContent {
                content,
                encoding: None,
            })
        }

        async fn commit(&self, body: &CommitBody) -> Result<(), AppError> {
            let mut files = self.files.lock().unwrap();
            for action in &body.actions {
                match action.action {
                    CommitActionKind::Create | CommitActionKind::Update => {
                        files.insert(
                            action.file_path.clone(),
                            action.content.clone().unwrap_or_default(),
                        );
                    }
                    CommitActionKind::Delete => {
                        files.remove(&action.file_path);
                    }
                    CommitActionKind::Move => {}
                }
            }
            Ok(())
        }
    }

    #[tokio::test]
    async fn repository_backend_is_usable_as_a_trait_object() {
        let repo: Arc<dyn RepositoryBackend> = Arc::new(MemoryRepo {
            files: std::sync::Mutex::new(std::collections::BTreeMap::new()),
        });

        repo.commit(&CommitBody {
            actions: vec![CommitAction {
                action: CommitActionKind::Create,
                file_path: "posts/hello.json".to_string(),
                content: Some("{\"title\":\"hi\"}".to_string()),
                encoding: None,
            }],
            branch: "master".to_string(),
            commit_message: "Add post".to_string(),
        })
        .await
        .unwrap();

        let listed = repo.list_files("posts/", None).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "hello.json");

        let content = repo.read_file("posts/hello.json", None).await.unwrap();
        assert_eq!(content.content, "{\"title\":\"hi\"}");
    }

    #[tokio::test]
    async fn before_hook_runs_through_server_options() {
        struct Recording {
            seen: std::sync::Mutex<Vec<Option<String>>>,
        }

        #[async_trait]
        impl BeforeHook for Recording {
            async fn before(&self, data: &BeforeData) -> Result<(), AppError> {
                self.seen.lock().unwrap().push(data.path.clone());
                Ok(())
            }
        }

        let hook = Arc::new(Recording {
            seen: std::sync::Mutex::new(Vec::new()),
        });
        let options = ServerOptions::new("proj-1")
            .with_prefix("/admin")
            .with_before(hook.clone());

        if let Some(before) = &options.before {
            before
                .before(&BeforeData {
                    path: Some("posts".to_string()),
                    r#ref: None,
                })
                .await
                .unwrap();
        }

        assert_eq!(*hook.seen.lock().unwrap(), vec![Some("posts".to_string())]);
    }
}
