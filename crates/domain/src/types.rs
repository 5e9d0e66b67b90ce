//! Typed request models for the operation catalogue
//!
//! Each model carries the input-shape checks the remote service would
//! otherwise reject server-side: positive identifiers, `YYYY-MM-DD` dates,
//! bounded hour values, subject length. Validation is a precondition: it
//! runs before any request is built and is never retried.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_ACTIVITY_ID, DEFAULT_PRIORITY_ID, DEFAULT_STATUS_ID, DEFAULT_TYPE_ID,
    MAX_HOURS_PER_ENTRY, MAX_SUBJECT_LENGTH, VALID_RELATION_TYPES,
};
use crate::errors::{Error, Result};

/// Validate a `YYYY-MM-DD` date string, naming the offending field on failure.
pub fn validate_date(value: &str, field: &str) -> Result<()> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(|_| ())
        .map_err(|_| Error::InvalidInput(format!("{field} must be in YYYY-MM-DD format")))
}

/// Validate a remote identifier, naming the offending field on failure.
pub fn validate_id(value: u64, field: &str) -> Result<()> {
    if value == 0 {
        return Err(Error::InvalidInput(format!("{field} must be a positive integer")));
    }
    Ok(())
}

fn validate_subject(value: &str, field: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::InvalidInput(format!("{field} must not be empty")));
    }
    if value.chars().count() > MAX_SUBJECT_LENGTH {
        return Err(Error::InvalidInput(format!(
            "{field} must be at most {MAX_SUBJECT_LENGTH} characters"
        )));
    }
    Ok(())
}

fn validate_hours(value: f64, field: &str) -> Result<()> {
    if value <= 0.0 {
        return Err(Error::InvalidInput(format!("{field} must be positive")));
    }
    if value > MAX_HOURS_PER_ENTRY {
        return Err(Error::InvalidInput(format!(
            "{field} cannot exceed {MAX_HOURS_PER_ENTRY} per time entry"
        )));
    }
    Ok(())
}

/// Input for creating a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProject {
    pub name: String,
    pub description: String,
    /// Only sent when it differs from the remote default (`active`).
    pub status: Option<String>,
}

impl NewProject {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), description: String::new(), status: None }
    }

    pub fn validate(&self) -> Result<()> {
        validate_subject(&self.name, "Project name")
    }
}

/// Input for creating a work package.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewWorkPackage {
    pub subject: String,
    pub description: Option<String>,
    pub project_id: u64,
    pub type_id: u64,
    pub status_id: u64,
    pub priority_id: u64,
    pub assignee_id: Option<u64>,
    pub parent_id: Option<u64>,
    pub start_date: Option<String>,
    pub due_date: Option<String>,
    pub estimated_hours: Option<f64>,
}

impl NewWorkPackage {
    /// A work package with the remote defaults: type Task, status New,
    /// priority Normal.
    pub fn new(subject: impl Into<String>, project_id: u64) -> Self {
        Self {
            subject: subject.into(),
            description: None,
            project_id,
            type_id: DEFAULT_TYPE_ID,
            status_id: DEFAULT_STATUS_ID,
            priority_id: DEFAULT_PRIORITY_ID,
            assignee_id: None,
            parent_id: None,
            start_date: None,
            due_date: None,
            estimated_hours: None,
        }
    }

    pub fn validate(&self) -> Result<()> {
        validate_subject(&self.subject, "Subject")?;
        validate_id(self.project_id, "Project ID")?;
        validate_id(self.type_id, "Type ID")?;
        validate_id(self.status_id, "Status ID")?;
        validate_id(self.priority_id, "Priority ID")?;
        if let Some(assignee) = self.assignee_id {
            validate_id(assignee, "Assignee ID")?;
        }
        if let Some(parent) = self.parent_id {
            validate_id(parent, "Parent ID")?;
        }
        if let Some(start) = self.start_date.as_deref() {
            validate_date(start, "Start date")?;
        }
        if let Some(due) = self.due_date.as_deref() {
            validate_date(due, "Due date")?;
        }
        if let Some(hours) = self.estimated_hours {
            if hours <= 0.0 {
                return Err(Error::InvalidInput("Estimated hours must be positive".into()));
            }
        }
        validate_date_ordering(self.start_date.as_deref(), self.due_date.as_deref())
    }
}

/// Partial update for a work package; only set fields are patched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkPackageUpdate {
    pub subject: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<String>,
    pub due_date: Option<String>,
    pub assignee_id: Option<u64>,
    pub estimated_hours: Option<f64>,
    pub status_id: Option<u64>,
}

impl WorkPackageUpdate {
    pub fn is_empty(&self) -> bool {
        self.subject.is_none()
            && self.description.is_none()
            && self.start_date.is_none()
            && self.due_date.is_none()
            && self.assignee_id.is_none()
            && self.estimated_hours.is_none()
            && self.status_id.is_none()
    }

    pub fn validate(&self) -> Result<()> {
        if self.is_empty() {
            return Err(Error::InvalidInput(
                "No updates provided. Specify at least one field to update.".into(),
            ));
        }
        if let Some(subject) = self.subject.as_deref() {
            validate_subject(subject, "Subject")?;
        }
        if let Some(start) = self.start_date.as_deref() {
            validate_date(start, "Start date")?;
        }
        if let Some(due) = self.due_date.as_deref() {
            validate_date(due, "Due date")?;
        }
        if let Some(assignee) = self.assignee_id {
            validate_id(assignee, "Assignee ID")?;
        }
        if let Some(status) = self.status_id {
            validate_id(status, "Status ID")?;
        }
        if let Some(hours) = self.estimated_hours {
            if hours <= 0.0 {
                return Err(Error::InvalidInput("Estimated hours must be positive".into()));
            }
        }
        validate_date_ordering(self.start_date.as_deref(), self.due_date.as_deref())
    }
}

/// Input for relating two work packages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRelation {
    pub from_id: u64,
    pub to_id: u64,
    pub relation_type: String,
    pub description: Option<String>,
    /// Working days between finish of predecessor and start of successor.
    pub lag: u32,
}

impl NewRelation {
    pub fn new(from_id: u64, to_id: u64) -> Self {
        Self { from_id, to_id, relation_type: "follows".into(), description: None, lag: 0 }
    }

    pub fn validate(&self) -> Result<()> {
        validate_id(self.from_id, "Source work package ID")?;
        validate_id(self.to_id, "Target work package ID")?;
        if self.from_id == self.to_id {
            return Err(Error::InvalidInput(
                "Work package cannot have a relation with itself".into(),
            ));
        }
        if !VALID_RELATION_TYPES.contains(&self.relation_type.as_str()) {
            return Err(Error::InvalidInput(format!(
                "Invalid relation type. Must be one of: {}",
                VALID_RELATION_TYPES.join(", ")
            )));
        }
        Ok(())
    }
}

/// Input for logging time against a work package.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTimeEntry {
    pub work_package_id: u64,
    /// Hours spent, decimal (2.5 = 2 hours 30 minutes).
    pub hours: f64,
    /// Date the work was done, `YYYY-MM-DD`.
    pub spent_on: String,
    pub comment: Option<String>,
    pub activity_id: u64,
}

impl NewTimeEntry {
    pub fn new(work_package_id: u64, hours: f64, spent_on: impl Into<String>) -> Self {
        Self {
            work_package_id,
            hours,
            spent_on: spent_on.into(),
            comment: None,
            activity_id: DEFAULT_ACTIVITY_ID,
        }
    }

    pub fn validate(&self) -> Result<()> {
        validate_id(self.work_package_id, "Work package ID")?;
        validate_hours(self.hours, "Hours")?;
        validate_date(&self.spent_on, "Spent-on date")?;
        validate_id(self.activity_id, "Activity ID")
    }
}

/// Partial update for a time entry; only set fields are patched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimeEntryUpdate {
    pub hours: Option<f64>,
    pub spent_on: Option<String>,
    pub comment: Option<String>,
    pub activity_id: Option<u64>,
}

impl TimeEntryUpdate {
    pub fn is_empty(&self) -> bool {
        self.hours.is_none()
            && self.spent_on.is_none()
            && self.comment.is_none()
            && self.activity_id.is_none()
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(hours) = self.hours {
            validate_hours(hours, "Hours")?;
        }
        if let Some(date) = self.spent_on.as_deref() {
            validate_date(date, "Spent-on date")?;
        }
        if let Some(activity) = self.activity_id {
            validate_id(activity, "Activity ID")?;
        }
        Ok(())
    }
}

/// Conjunctive filter criteria for listing time entries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimeEntryQuery {
    pub work_package_id: Option<u64>,
    pub project_id: Option<u64>,
    pub user_id: Option<u64>,
    pub from_date: Option<String>,
    pub to_date: Option<String>,
}

impl TimeEntryQuery {
    pub fn validate(&self) -> Result<()> {
        if let Some(id) = self.work_package_id {
            validate_id(id, "Work package ID")?;
        }
        if let Some(id) = self.project_id {
            validate_id(id, "Project ID")?;
        }
        if let Some(id) = self.user_id {
            validate_id(id, "User ID")?;
        }
        if let Some(from) = self.from_date.as_deref() {
            validate_date(from, "From date")?;
        }
        if let Some(to) = self.to_date.as_deref() {
            validate_date(to, "To date")?;
        }
        Ok(())
    }
}

fn validate_date_ordering(start: Option<&str>, due: Option<&str>) -> Result<()> {
    let (Some(start), Some(due)) = (start, due) else { return Ok(()) };
    let (Ok(start), Ok(due)) = (
        NaiveDate::parse_from_str(start, "%Y-%m-%d"),
        NaiveDate::parse_from_str(due, "%Y-%m-%d"),
    ) else {
        return Ok(());
    };

    if due < start {
        return Err(Error::InvalidInput("Due date must be after start date".into()));
    }
    Ok(())
}
