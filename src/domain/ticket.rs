use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{AppError, AppResult};

/// Scalar the backend sends as either a JSON string or number.
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Integer(i64),
    Float(f64),
}

impl Scalar {
    fn into_string(self) -> String {
        match self {
            Scalar::Text(text) => text,
            Scalar::Integer(value) => value.to_string(),
            Scalar::Float(value) => value.to_string(),
        }
    }
}

pub(crate) fn optional_scalar<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Scalar>::deserialize(deserializer)?.map(Scalar::into_string))
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TicketId(String);

impl TicketId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for TicketId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Scalar::deserialize(deserializer).map(|scalar| TicketId::new(scalar.into_string()))
    }
}

/// Canonical ticket lifecycle. Older backends used pending/assigned/resolved;
/// those tags are accepted on input and never sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    #[serde(alias = "pending")]
    Open,
    #[serde(alias = "assigned")]
    InProgress,
    #[serde(alias = "resolved", alias = "completed")]
    Closed,
}

impl TicketStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketStatus::Open => "open",
            TicketStatus::InProgress => "in_progress",
            TicketStatus::Closed => "closed",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TicketStatus::Open => "open",
            TicketStatus::InProgress => "in progress",
            TicketStatus::Closed => "closed",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "open" | "pending" => Some(TicketStatus::Open),
            "in_progress" | "in-progress" | "in progress" | "assigned" => {
                Some(TicketStatus::InProgress)
            }
            "closed" | "resolved" | "completed" => Some(TicketStatus::Closed),
            _ => None,
        }
    }

    /// The only status a ticket may move to next.
    pub fn successor(&self) -> Option<Self> {
        match self {
            TicketStatus::Open => Some(TicketStatus::InProgress),
            TicketStatus::InProgress => Some(TicketStatus::Closed),
            TicketStatus::Closed => None,
        }
    }

    /// Label of the action that moves a ticket into this status.
    pub fn action_label(&self) -> &'static str {
        match self {
            TicketStatus::Open => "Mark Open",
            TicketStatus::InProgress => "Mark In Progress",
            TicketStatus::Closed => "Mark Resolved",
        }
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Critical => "critical",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "low" => Some(Priority::Low),
            "medium" => Some(Priority::Medium),
            "high" => Some(Priority::High),
            "critical" => Some(Priority::Critical),
            _ => None,
        }
    }
}

fn lenient_priority<'de, D>(deserializer: D) -> Result<Priority, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw
        .as_deref()
        .and_then(Priority::from_str)
        .unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: TicketId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub status: TicketStatus,
    #[serde(default, deserialize_with = "lenient_priority")]
    pub priority: Priority,
    #[serde(default, deserialize_with = "optional_scalar")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "optional_scalar")]
    pub department: Option<String>,
    #[serde(default, deserialize_with = "optional_scalar")]
    pub department_id: Option<String>,
    #[serde(default, deserialize_with = "optional_scalar")]
    pub assigned_to: Option<String>,
    #[serde(default)]
    pub location_details: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Ticket {
    /// Department name when the backend sends one, else its id.
    pub fn department_label(&self) -> Option<&str> {
        self.department
            .as_deref()
            .or(self.department_id.as_deref())
    }

    /// True unless the ticket names some other department. Listings that the
    /// backend already scoped carry no department fields at all.
    pub fn belongs_to_department(&self, department: &str) -> bool {
        let wanted = department.trim();
        let mut reported = [self.department.as_deref(), self.department_id.as_deref()]
            .into_iter()
            .flatten()
            .peekable();
        if reported.peek().is_none() {
            return true;
        }
        reported.any(|value| value.trim().eq_ignore_ascii_case(wanted))
    }

    pub fn created_on(&self) -> Option<NaiveDate> {
        let raw = self.created_at.as_deref()?.trim();
        if let Ok(stamp) = DateTime::parse_from_rfc3339(raw) {
            return Some(stamp.date_naive());
        }
        if let Ok(stamp) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
            return Some(stamp.date());
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
    }

    pub fn matches_search(&self, term: &str) -> bool {
        let needle = term.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        self.title.to_lowercase().contains(&needle)
            || self.description.to_lowercase().contains(&needle)
            || self.id.as_str().to_lowercase().contains(&needle)
    }
}

/// Editable fields of the create-ticket form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketForm {
    pub title: String,
    pub description: String,
    pub category: String,
    pub location_details: String,
    pub department_id: String,
    pub priority: Priority,
}

impl TicketForm {
    pub fn is_blank(&self) -> bool {
        *self == TicketForm::default()
    }

    /// Checks required fields before anything is sent.
    pub fn validate(&self) -> AppResult<NewTicket> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(AppError::Validation("ticket title is required".to_string()));
        }
        let description = self.description.trim();
        if description.is_empty() {
            return Err(AppError::Validation(
                "ticket description is required".to_string(),
            ));
        }
        let category = self.category.trim();

        Ok(NewTicket {
            title: title.to_string(),
            description: description.to_string(),
            priority: self.priority,
            category: if category.is_empty() {
                "general".to_string()
            } else {
                category.to_lowercase()
            },
            location_details: non_empty(&self.location_details),
            department_id: non_empty(&self.department_id),
        })
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Request body for ticket creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewTicket {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TicketReceipt {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, deserialize_with = "optional_scalar")]
    pub ticket_id: Option<String>,
}

/// Status filter applied on top of a ticket list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(TicketStatus),
}

impl StatusFilter {
    pub fn from_str(value: &str) -> Option<Self> {
        if value.trim().eq_ignore_ascii_case("all") {
            return Some(StatusFilter::All);
        }
        TicketStatus::from_str(value).map(StatusFilter::Only)
    }

    pub fn admits(&self, ticket: &Ticket) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(status) => ticket.status == *status,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn transitions_follow_fixed_order() {
        assert_eq!(
            TicketStatus::Open.successor(),
            Some(TicketStatus::InProgress)
        );
        assert_eq!(
            TicketStatus::InProgress.successor(),
            Some(TicketStatus::Closed)
        );
        assert_eq!(TicketStatus::Closed.successor(), None);
    }

    #[test]
    fn legacy_statuses_map_to_canonical() {
        let parsed: Vec<TicketStatus> =
            serde_json::from_value(json!(["pending", "assigned", "resolved", "in_progress"]))
                .unwrap();
        assert_eq!(
            parsed,
            vec![
                TicketStatus::Open,
                TicketStatus::InProgress,
                TicketStatus::Closed,
                TicketStatus::InProgress
            ]
        );
        assert_eq!(
            serde_json::to_value(TicketStatus::InProgress).unwrap(),
            json!("in_progress")
        );
    }

    #[test]
    fn decodes_backend_ticket_with_numeric_ids() {
        let ticket: Ticket = serde_json::from_value(json!({
            "id": 17,
            "title": "Leaking tap",
            "description": "Ward 2B sink",
            "status": "open",
            "priority": null,
            "category": "plumbing",
            "department_id": 3,
            "assigned_to": null,
            "created_at": "2025-10-21T20:40:09.123456",
            "updated_at": null
        }))
        .unwrap();

        assert_eq!(ticket.id.as_str(), "17");
        assert_eq!(ticket.priority, Priority::Medium);
        assert_eq!(ticket.department_label(), Some("3"));
        assert!(ticket.belongs_to_department("3"));
        assert!(!ticket.belongs_to_department("4"));
        assert_eq!(
            ticket.created_on(),
            NaiveDate::from_ymd_opt(2025, 10, 21)
        );
    }

    #[test]
    fn unknown_priority_falls_back_to_medium() {
        let ticket: Ticket = serde_json::from_value(json!({
            "id": "D-1",
            "title": "Broken conveyor",
            "status": "open",
            "priority": "urgent"
        }))
        .unwrap();
        assert_eq!(ticket.priority, Priority::Medium);
        assert_eq!(ticket.description, "");
    }

    #[test]
    fn form_requires_title_and_description() {
        let mut form = TicketForm {
            title: "  ".to_string(),
            description: "Sparking outlet".to_string(),
            ..TicketForm::default()
        };
        assert!(matches!(form.validate(), Err(AppError::Validation(_))));

        form.title = "Outlet".to_string();
        form.location_details = "Ward 3A".to_string();
        let ticket = form.validate().unwrap();
        assert_eq!(ticket.category, "general");
        assert_eq!(ticket.location_details.as_deref(), Some("Ward 3A"));
        assert_eq!(ticket.department_id, None);
    }

    #[test]
    fn search_matches_title_description_and_id() {
        let ticket: Ticket = serde_json::from_value(json!({
            "id": 1248,
            "title": "Sparking outlet",
            "description": "Bed outlet #4",
            "status": "open"
        }))
        .unwrap();
        assert!(ticket.matches_search("SPARK"));
        assert!(ticket.matches_search("bed"));
        assert!(ticket.matches_search("124"));
        assert!(!ticket.matches_search("boiler"));
    }

    #[test]
    fn parses_status_filters() {
        assert_eq!(StatusFilter::from_str("all"), Some(StatusFilter::All));
        assert_eq!(
            StatusFilter::from_str("resolved"),
            Some(StatusFilter::Only(TicketStatus::Closed))
        );
        assert_eq!(StatusFilter::from_str("archived"), None);
    }
}
