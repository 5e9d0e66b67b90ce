//! Work package relation operations.

use opbridge_domain::types::validate_id;
use opbridge_domain::{NewRelation, Result};
use reqwest::Method;
use serde_json::{json, Value};

use super::OpenProjectClient;
use crate::hal;

impl OpenProjectClient {
    /// Relate two work packages. The relation hangs off the source side.
    pub async fn create_relation(&self, relation: &NewRelation) -> Result<Value> {
        relation.validate()?;

        let mut payload = json!({
            "type": relation.relation_type,
            "_links": {
                "to": {"href": hal::work_package_href(relation.to_id)},
            },
        });
        if let Some(description) = relation.description.as_deref() {
            if !description.is_empty() {
                payload["description"] = json!(description);
            }
        }
        if relation.lag != 0 {
            payload["lag"] = json!(relation.lag);
        }

        self.execute(
            Method::POST,
            &format!("/work_packages/{}/relations", relation.from_id),
            Some(&payload),
            None,
        )
        .await
    }

    /// All relations hanging off a work package.
    pub async fn list_relations(&self, work_package_id: u64) -> Result<Vec<Value>> {
        validate_id(work_package_id, "Work package ID")?;
        self.fetch_elements(&format!("/work_packages/{work_package_id}/relations"), None).await
    }

    /// Delete a relation by its own identifier.
    pub async fn delete_relation(&self, relation_id: u64) -> Result<Value> {
        validate_id(relation_id, "Relation ID")?;
        self.execute(Method::DELETE, &format!("/relations/{relation_id}"), None, None).await
    }
}
