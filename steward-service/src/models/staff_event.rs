// steward-service/src/models/staff_event.rs
use crate::models::{VisibilityInfo, VisibilityTier};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const STAFF_EVENT_TYPE: &str = "staff";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    Draft,
    Confirmed,
    Cancelled,
}

impl EventStatus {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "draft" => Some(EventStatus::Draft),
            "confirmed" => Some(EventStatus::Confirmed),
            "cancelled" => Some(EventStatus::Cancelled),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EventStatus::Draft => "Draft",
            EventStatus::Confirmed => "Confirmed",
            EventStatus::Cancelled => "Cancelled",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            EventStatus::Draft => "gray",
            EventStatus::Confirmed => "green",
            EventStatus::Cancelled => "red",
        }
    }
}

// Stored event record. Staff events share the collection with other event types.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct StaffEvent {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_event_type")]
    pub event_type: String,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    #[serde(default)]
    pub location_name: Option<String>,
    #[serde(default)]
    pub room_id: Option<Uuid>,
    #[serde(default)]
    pub visibility_level: VisibilityTier,
    pub status: EventStatus,
    #[serde(default)]
    pub approval_required: bool,
    #[serde(default)]
    pub approved_by: Option<String>,
    #[serde(default)]
    pub approved_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub contact_name: Option<String>,
    #[serde(default)]
    pub contact_email: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub category_id: Option<Uuid>,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_event_type() -> String {
    STAFF_EVENT_TYPE.to_string()
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct StaffEventCategory {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub color: String,
    pub icon: String,
    #[serde(default)]
    pub access_level: VisibilityTier,
    #[serde(default)]
    pub is_confidential: bool,
    #[serde(default)]
    pub sort_order: i32,
    #[serde(default = "default_true")]
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

pub(crate) fn default_true() -> bool {
    true
}

// Creation form for a staff event. Optional inputs arrive as empty strings.
#[derive(Serialize, Deserialize, Debug, Default)]
#[serde(default)]
pub struct CreateStaffEventRequest {
    pub title: String,
    pub description: String,
    pub start_date: String,
    pub end_date: String,
    pub start_time: String,
    pub end_time: String,
    pub location_name: String,
    pub room_id: String,
    pub category_id: String,
    pub visibility_level: String,
    pub contact_name: String,
    pub contact_email: String,
    pub notes: String,
    pub approval_required: bool,
}

#[derive(Serialize, Deserialize, Debug, Default)]
#[serde(default)]
pub struct CreateCategoryRequest {
    pub name: String,
    pub description: String,
    pub color: String,
    pub icon: String,
    pub access_level: String,
    pub is_confidential: bool,
    pub sort_order: i32,
}

// Query string accepted by the staff event listing
#[derive(Serialize, Deserialize, Debug, Default)]
#[serde(default)]
pub struct StaffEventListQuery {
    pub search: String,
    pub status: Option<String>,
    pub category: Option<String>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct CategorySummary {
    pub id: Uuid,
    pub name: String,
    pub color: String,
    pub icon: String,
    pub access_level: VisibilityTier,
}

impl From<&StaffEventCategory> for CategorySummary {
    fn from(category: &StaffEventCategory) -> Self {
        Self {
            id: category.id,
            name: category.name.clone(),
            color: category.color.clone(),
            icon: category.icon.clone(),
            access_level: category.access_level.clone(),
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct RoomSummary {
    pub id: Uuid,
    pub name: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct FormattedDateTime {
    pub date: String,
    pub time: String,
}

// Staff event as shown on the dashboard: the record plus joined and derived fields
#[derive(Serialize, Debug, Clone)]
pub struct StaffEventView {
    #[serde(flatten)]
    pub event: StaffEvent,
    pub category: Option<CategorySummary>,
    pub room: Option<RoomSummary>,
    pub visibility: VisibilityInfo,
    pub status_label: &'static str,
    pub status_color: &'static str,
    pub starts: FormattedDateTime,
    pub ends: FormattedDateTime,
}
