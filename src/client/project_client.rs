use crate::{
    client::{decode_trpc, Backend},
    error::{Result, WhiskError},
};
use reqwest::Method;
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

/// Operations on workflows (named containers for generated media).
#[derive(Clone)]
pub struct ProjectClient {
    backend: Arc<Backend>,
}

impl ProjectClient {
    pub(crate) fn new(backend: Arc<Backend>) -> Self {
        Self { backend }
    }

    /// Create a workflow and return its identifier. An empty name gets a
    /// generated one, matching what the web client does for untitled
    /// projects.
    pub async fn create(&self, name: &str) -> Result<String> {
        let name = if name.trim().is_empty() {
            format!("project-{}", Uuid::new_v4())
        } else {
            name.to_string()
        };

        log::info!("Creating project: {}", name);

        let body = json!({
            "json": {
                "workflowName": name,
                "tool": "BACKBONE"
            }
        });

        let raw = self
            .backend
            .transport
            .execute(
                Method::POST,
                &self.backend.trpc_url("media.createWorkflow"),
                &self.backend.cookie_headers(),
                Some(body.to_string()),
            )
            .await?;

        let value = decode_trpc("media.createWorkflow", &raw)?;

        value
            .pointer("/result/workflowId")
            .and_then(|v| v.as_str())
            .map(String::from)
            .ok_or_else(|| {
                WhiskError::Decode(format!(
                    "media.createWorkflow: response has no workflowId: {}",
                    raw
                ))
            })
    }

    pub async fn rename(&self, project_id: &str, name: &str) -> Result<()> {
        if project_id.trim().is_empty() {
            return Err(WhiskError::Precondition("project id is empty".into()));
        }
        if name.trim().is_empty() {
            return Err(WhiskError::Precondition("project name is empty".into()));
        }

        log::info!("Renaming project {} to: {}", project_id, name);

        let body = json!({
            "json": {
                "workflowId": project_id,
                "workflowName": name
            }
        });

        let raw = self
            .backend
            .transport
            .execute(
                Method::POST,
                &self.backend.trpc_url("media.renameWorkflow"),
                &self.backend.cookie_headers(),
                Some(body.to_string()),
            )
            .await?;

        decode_trpc("media.renameWorkflow", &raw)?;
        Ok(())
    }
}
