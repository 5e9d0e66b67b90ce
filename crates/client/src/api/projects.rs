//! Project operations.

use opbridge_domain::{NewProject, Result};
use reqwest::Method;
use serde_json::{json, Value};

use super::OpenProjectClient;

impl OpenProjectClient {
    /// List visible projects (first page only).
    pub async fn list_projects(&self) -> Result<Vec<Value>> {
        self.fetch_elements("/projects", None).await
    }

    /// List every visible project, walking all pages.
    pub async fn list_all_projects(&self) -> Result<Vec<Value>> {
        self.collect_paginated("/projects", &[]).await
    }

    /// Create a project.
    ///
    /// The status is only sent when it differs from the remote default.
    pub async fn create_project(&self, project: &NewProject) -> Result<Value> {
        project.validate()?;

        let mut payload = json!({
            "name": project.name,
            "description": {"raw": project.description},
        });
        if let Some(status) = project.status.as_deref() {
            if status != "active" {
                payload["status"] = json!(status);
            }
        }

        self.execute(Method::POST, "/projects", Some(&payload), None).await
    }
}
