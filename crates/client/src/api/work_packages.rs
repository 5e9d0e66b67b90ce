//! Work package operations.

use opbridge_domain::types::validate_id;
use opbridge_domain::{Error, NewWorkPackage, Result, WorkPackageUpdate};
use reqwest::Method;
use serde_json::{json, Map, Value};

use super::OpenProjectClient;
use crate::filters::{Filter, FilterSet};
use crate::hal;

impl OpenProjectClient {
    /// List a project's work packages (first page only).
    pub async fn list_work_packages(&self, project_id: u64) -> Result<Vec<Value>> {
        validate_id(project_id, "Project ID")?;
        self.fetch_elements(&format!("/projects/{project_id}/work_packages"), None).await
    }

    /// List every work package of a project, walking all pages.
    pub async fn list_all_work_packages(&self, project_id: u64) -> Result<Vec<Value>> {
        validate_id(project_id, "Project ID")?;
        self.collect_paginated(&format!("/projects/{project_id}/work_packages"), &[]).await
    }

    /// Fetch a single work package.
    pub async fn get_work_package(&self, id: u64) -> Result<Value> {
        validate_id(id, "Work package ID")?;
        self.execute(Method::GET, &format!("/work_packages/{id}"), None, None).await
    }

    /// Server-side subject search, optionally scoped to one project.
    ///
    /// Queries shorter than two characters are rejected locally; no request
    /// is issued.
    pub async fn search_work_packages(
        &self,
        query: &str,
        project_id: Option<u64>,
    ) -> Result<Vec<Value>> {
        let query = query.trim();
        if query.chars().count() < 2 {
            return Err(Error::InvalidInput(
                "Search query must be at least 2 characters".into(),
            ));
        }
        if let Some(id) = project_id {
            validate_id(id, "Project ID")?;
        }

        let mut filters = FilterSet::new().with(Filter::contains("subject", query));
        if let Some(id) = project_id {
            filters.push(Filter::equals("project", id.to_string()));
        }

        let params = [("filters".to_owned(), filters.to_query_value())];
        self.fetch_elements("/work_packages", Some(&params)).await
    }

    /// Create a work package from a validated input model.
    pub async fn create_work_package(&self, input: &NewWorkPackage) -> Result<Value> {
        input.validate()?;

        let mut links = json!({
            "project": {"href": hal::project_href(input.project_id)},
            "type": {"href": hal::type_href(input.type_id)},
            "status": {"href": hal::status_href(input.status_id)},
            "priority": {"href": hal::priority_href(input.priority_id)},
        });
        if let Some(assignee) = input.assignee_id {
            links["assignee"] = json!({"href": hal::user_href(assignee)});
        }
        if let Some(parent) = input.parent_id {
            links["parent"] = json!({"href": hal::work_package_href(parent)});
        }

        let mut payload = json!({
            "subject": input.subject,
            "_links": links,
        });
        if let Some(description) = input.description.as_deref() {
            payload["description"] = json!({"raw": description});
        }
        if let Some(start) = input.start_date.as_deref() {
            payload["startDate"] = json!(start);
        }
        if let Some(due) = input.due_date.as_deref() {
            payload["dueDate"] = json!(due);
        }
        if let Some(hours) = input.estimated_hours {
            payload["estimatedTime"] = json!(hal::hours_duration(hours));
        }

        self.execute(Method::POST, "/work_packages", Some(&payload), None).await
    }

    /// Optimistic-concurrency update.
    ///
    /// Re-fetches the entity to pick up its current version token and
    /// attaches it to the patch; a concurrent modification makes the remote
    /// service reject the stale token, which surfaces as an [`ApiError`]
    /// with the response status.
    ///
    /// [`ApiError`]: opbridge_domain::ApiError
    pub async fn update_work_package(
        &self,
        id: u64,
        update: &WorkPackageUpdate,
    ) -> Result<Value> {
        validate_id(id, "Work package ID")?;
        update.validate()?;

        let current = self.get_work_package(id).await?;
        let lock_version = current.get("lockVersion").and_then(Value::as_u64).unwrap_or(0);

        let mut payload = json!({"lockVersion": lock_version});
        if let Some(subject) = update.subject.as_deref() {
            payload["subject"] = json!(subject.trim());
        }
        if let Some(description) = update.description.as_deref() {
            payload["description"] = json!({"raw": description.trim()});
        }
        if let Some(start) = update.start_date.as_deref() {
            payload["startDate"] = json!(start);
        }
        if let Some(due) = update.due_date.as_deref() {
            payload["dueDate"] = json!(due);
        }
        if let Some(hours) = update.estimated_hours {
            payload["estimatedTime"] = json!(hal::hours_duration(hours));
        }

        let mut links = Map::new();
        if let Some(assignee) = update.assignee_id {
            links.insert("assignee".to_owned(), json!({"href": hal::user_href(assignee)}));
        }
        if let Some(status) = update.status_id {
            links.insert("status".to_owned(), json!({"href": hal::status_href(status)}));
        }
        if !links.is_empty() {
            payload["_links"] = Value::Object(links);
        }

        self.execute(Method::PATCH, &format!("/work_packages/{id}"), Some(&payload), None).await
    }
}
