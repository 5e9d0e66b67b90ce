//! User and membership operations.

use opbridge_domain::types::validate_id;
use opbridge_domain::{Error, Result};
use reqwest::Method;
use serde_json::Value;

use super::OpenProjectClient;
use crate::filters::{Filter, FilterSet};

impl OpenProjectClient {
    /// List users, optionally narrowed by filter criteria.
    pub async fn list_users(&self, filters: Option<&FilterSet>) -> Result<Vec<Value>> {
        match filters {
            Some(filters) if !filters.is_empty() => {
                let params = [("filters".to_owned(), filters.to_query_value())];
                self.fetch_elements("/users", Some(&params)).await
            }
            _ => self.fetch_elements("/users", None).await,
        }
    }

    /// Fetch a single user.
    pub async fn get_user(&self, id: u64) -> Result<Value> {
        validate_id(id, "User ID")?;
        self.execute(Method::GET, &format!("/users/{id}"), None, None).await
    }

    /// Single-match lookup by email address.
    ///
    /// Returns the first matching user; `Ok(None)` when nobody matches.
    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<Value>> {
        let email = email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(Error::InvalidInput("A valid email address is required".into()));
        }

        let filters = FilterSet::new().with(Filter::equals("email", email));
        let mut users = self.list_users(Some(&filters)).await?;
        if users.is_empty() {
            return Ok(None);
        }
        Ok(Some(users.remove(0)))
    }

    /// Members of a project.
    pub async fn list_memberships(&self, project_id: u64) -> Result<Vec<Value>> {
        validate_id(project_id, "Project ID")?;
        self.fetch_elements(&format!("/projects/{project_id}/memberships"), None).await
    }
}
