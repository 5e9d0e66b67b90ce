//! Helpers for the HAL+JSON conventions of the remote API.
//!
//! Linked resources appear as `{"href": path, "title": label}` objects under
//! `_links`, collections nest their items under `_embedded.elements`, and
//! rich text travels as `{"raw": string}`.

use opbridge_domain::constants::API_PREFIX;
use serde_json::Value;

/// Elements of an `_embedded` collection response, in server order.
pub fn elements(body: &Value) -> Vec<Value> {
    body.get("_embedded")
        .and_then(|embedded| embedded.get("elements"))
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default()
}

/// The `href` of a named link, when present.
pub fn link_href<'a>(body: &'a Value, rel: &str) -> Option<&'a str> {
    body.get("_links")?.get(rel)?.get("href")?.as_str()
}

/// The display title of a named link, when present.
pub fn link_title<'a>(body: &'a Value, rel: &str) -> Option<&'a str> {
    body.get("_links")?.get(rel)?.get("title")?.as_str()
}

/// Numeric identifier at the tail of a named link's href.
pub fn link_id(body: &Value, rel: &str) -> Option<u64> {
    link_href(body, rel)?.rsplit('/').next()?.parse().ok()
}

/// Raw text of a rich-text field (`{"raw": ...}`).
pub fn raw_text<'a>(body: &'a Value, field: &str) -> Option<&'a str> {
    body.get(field)?.get("raw")?.as_str()
}

/// ISO-8601 duration for a decimal hour count, e.g. `PT2.5H`.
pub fn hours_duration(hours: f64) -> String {
    format!("PT{hours}H")
}

// Link targets for request payloads. Hrefs are API-prefixed resource paths,
// not absolute URLs.

pub fn project_href(id: u64) -> String {
    format!("{API_PREFIX}/projects/{id}")
}

pub fn work_package_href(id: u64) -> String {
    format!("{API_PREFIX}/work_packages/{id}")
}

pub fn type_href(id: u64) -> String {
    format!("{API_PREFIX}/types/{id}")
}

pub fn status_href(id: u64) -> String {
    format!("{API_PREFIX}/statuses/{id}")
}

pub fn priority_href(id: u64) -> String {
    format!("{API_PREFIX}/priorities/{id}")
}

pub fn user_href(id: u64) -> String {
    format!("{API_PREFIX}/users/{id}")
}

pub fn activity_href(id: u64) -> String {
    format!("{API_PREFIX}/time_entries/activities/{id}")
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn extracts_embedded_elements_in_order() {
        let body = json!({
            "_embedded": {"elements": [{"id": 1}, {"id": 2}, {"id": 3}]},
            "total": 3
        });

        let items = elements(&body);
        assert_eq!(items.len(), 3);
        assert_eq!(items[0]["id"], 1);
    }

    #[test]
    fn missing_embedded_section_yields_empty_list() {
        assert!(elements(&json!({"total": 0})).is_empty());
    }

    #[test]
    fn reads_link_href_title_and_id() {
        let body = json!({
            "_links": {
                "status": {"href": "/api/v3/statuses/7", "title": "In progress"}
            }
        });

        assert_eq!(link_href(&body, "status"), Some("/api/v3/statuses/7"));
        assert_eq!(link_title(&body, "status"), Some("In progress"));
        assert_eq!(link_id(&body, "status"), Some(7));
        assert_eq!(link_id(&body, "assignee"), None);
    }

    #[test]
    fn reads_rich_text_raw_value() {
        let body = json!({"description": {"raw": "Release notes", "html": "<p>Release notes</p>"}});
        assert_eq!(raw_text(&body, "description"), Some("Release notes"));
        assert_eq!(raw_text(&body, "comment"), None);
    }

    #[test]
    fn encodes_decimal_hours_as_iso_duration() {
        assert_eq!(hours_duration(2.5), "PT2.5H");
        assert_eq!(hours_duration(0.25), "PT0.25H");
    }

    #[test]
    fn builds_api_prefixed_hrefs() {
        assert_eq!(work_package_href(42), "/api/v3/work_packages/42");
        assert_eq!(activity_href(2), "/api/v3/time_entries/activities/2");
    }
}
