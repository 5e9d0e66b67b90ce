//! Time entry operations.

use opbridge_domain::types::validate_id;
use opbridge_domain::{NewTimeEntry, Result, TimeEntryQuery, TimeEntryUpdate};
use reqwest::Method;
use serde_json::{json, Value};

use super::OpenProjectClient;
use crate::filters::{Filter, FilterSet};
use crate::hal;

/// Cache key for the time-entry activity collection.
pub const ACTIVITIES_CACHE_KEY: &str = "time_entry_activities";

impl OpenProjectClient {
    /// List time entries matching the (conjunctive) query criteria.
    pub async fn list_time_entries(&self, query: &TimeEntryQuery) -> Result<Vec<Value>> {
        query.validate()?;

        let mut filters = FilterSet::new();
        if let Some(id) = query.work_package_id {
            filters.push(Filter::equals("work_package", id.to_string()));
        }
        if let Some(id) = query.project_id {
            filters.push(Filter::equals("project", id.to_string()));
        }
        if let Some(id) = query.user_id {
            filters.push(Filter::equals("user", id.to_string()));
        }
        if let Some(from) = query.from_date.as_deref() {
            filters.push(Filter::on_or_after("spent_on", from));
        }
        if let Some(to) = query.to_date.as_deref() {
            filters.push(Filter::on_or_before("spent_on", to));
        }

        if filters.is_empty() {
            return self.fetch_elements("/time_entries", None).await;
        }
        let params = [("filters".to_owned(), filters.to_query_value())];
        self.fetch_elements("/time_entries", Some(&params)).await
    }

    /// Fetch a single time entry.
    pub async fn get_time_entry(&self, id: u64) -> Result<Value> {
        validate_id(id, "Time entry ID")?;
        self.execute(Method::GET, &format!("/time_entries/{id}"), None, None).await
    }

    /// Log time against a work package.
    ///
    /// Hours travel as an ISO-8601 duration (`PT2.5H`), the date as a plain
    /// `YYYY-MM-DD` string.
    pub async fn create_time_entry(&self, entry: &NewTimeEntry) -> Result<Value> {
        entry.validate()?;

        let mut payload = json!({
            "hours": hal::hours_duration(entry.hours),
            "spentOn": entry.spent_on,
            "_links": {
                "workPackage": {"href": hal::work_package_href(entry.work_package_id)},
                "activity": {"href": hal::activity_href(entry.activity_id)},
            },
        });
        if let Some(comment) = entry.comment.as_deref() {
            if !comment.is_empty() {
                payload["comment"] = json!({"raw": comment});
            }
        }

        self.execute(Method::POST, "/time_entries", Some(&payload), None).await
    }

    /// Patch a time entry; only set fields are sent.
    pub async fn update_time_entry(&self, id: u64, update: &TimeEntryUpdate) -> Result<Value> {
        validate_id(id, "Time entry ID")?;
        update.validate()?;

        let mut payload = json!({});
        if let Some(hours) = update.hours {
            payload["hours"] = json!(hal::hours_duration(hours));
        }
        if let Some(date) = update.spent_on.as_deref() {
            payload["spentOn"] = json!(date);
        }
        if let Some(comment) = update.comment.as_deref() {
            payload["comment"] = json!({"raw": comment});
        }
        if let Some(activity) = update.activity_id {
            payload["_links"] = json!({"activity": {"href": hal::activity_href(activity)}});
        }

        self.execute(Method::PATCH, &format!("/time_entries/{id}"), Some(&payload), None).await
    }

    /// Delete a time entry.
    pub async fn delete_time_entry(&self, id: u64) -> Result<Value> {
        validate_id(id, "Time entry ID")?;
        self.execute(Method::DELETE, &format!("/time_entries/{id}"), None, None).await
    }

    /// Available booking activities (Development, Testing, ...). Served
    /// from the reference cache.
    pub async fn list_activities(&self) -> Result<Vec<Value>> {
        self.cache
            .get_or_fetch(ACTIVITIES_CACHE_KEY, || {
                self.fetch_elements("/time_entries/activities", None)
            })
            .await
    }
}
