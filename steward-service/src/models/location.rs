// steward-service/src/models/location.rs
use crate::models::staff_event::default_true;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const DEFAULT_BUFFER_MINUTES: u32 = 15;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LocationType {
    WorshipSpace,
    MeetingRoom,
    FellowshipArea,
    Office,
    OutdoorArea,
    UtilitySpace,
    Other(String),
}

impl LocationType {
    pub fn parse(value: &str) -> Self {
        match value {
            "worship_space" => LocationType::WorshipSpace,
            "meeting_room" => LocationType::MeetingRoom,
            "fellowship_area" => LocationType::FellowshipArea,
            "office" => LocationType::Office,
            "outdoor_area" => LocationType::OutdoorArea,
            "utility_space" => LocationType::UtilitySpace,
            other => LocationType::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            LocationType::WorshipSpace => "worship_space",
            LocationType::MeetingRoom => "meeting_room",
            LocationType::FellowshipArea => "fellowship_area",
            LocationType::Office => "office",
            LocationType::OutdoorArea => "outdoor_area",
            LocationType::UtilitySpace => "utility_space",
            LocationType::Other(raw) => raw,
        }
    }

    pub fn label(&self) -> Option<&'static str> {
        match self {
            LocationType::WorshipSpace => Some("Worship Space"),
            LocationType::MeetingRoom => Some("Meeting Room"),
            LocationType::FellowshipArea => Some("Fellowship Area"),
            LocationType::Office => Some("Office"),
            LocationType::OutdoorArea => Some("Outdoor Area"),
            LocationType::UtilitySpace => Some("Utility Space"),
            LocationType::Other(_) => None,
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            LocationType::WorshipSpace => "⛪",
            LocationType::MeetingRoom => "🏢",
            LocationType::FellowshipArea => "🍽️",
            LocationType::Office => "💼",
            LocationType::OutdoorArea => "🌳",
            LocationType::UtilitySpace => "🔧",
            LocationType::Other(_) => "📍",
        }
    }
}

impl Default for LocationType {
    fn default() -> Self {
        LocationType::MeetingRoom
    }
}

impl From<String> for LocationType {
    fn from(value: String) -> Self {
        LocationType::parse(&value)
    }
}

impl From<LocationType> for String {
    fn from(location_type: LocationType) -> Self {
        location_type.as_str().to_string()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Location {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location_type: LocationType,
    #[serde(default)]
    pub capacity: Option<u32>,
    #[serde(default)]
    pub equipment_list: Vec<String>,
    #[serde(default = "default_buffer")]
    pub setup_time_minutes: u32,
    #[serde(default = "default_buffer")]
    pub cleanup_time_minutes: u32,
    #[serde(default)]
    pub requires_approval: bool,
    #[serde(default)]
    pub access_restrictions: Option<String>,
    #[serde(default)]
    pub booking_instructions: Option<String>,
    #[serde(default)]
    pub maintenance_notes: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_buffer() -> u32 {
    DEFAULT_BUFFER_MINUTES
}

// Creation form for a location; numeric inputs arrive as text
#[derive(Serialize, Deserialize, Debug, Default)]
#[serde(default)]
pub struct CreateLocationRequest {
    pub name: String,
    pub description: String,
    pub location_type: String,
    pub capacity: String,
    pub equipment_list: String,
    pub setup_time_minutes: String,
    pub cleanup_time_minutes: String,
    pub requires_approval: bool,
    pub access_restrictions: String,
    pub booking_instructions: String,
    pub maintenance_notes: String,
    pub sort_order: i32,
}

// Location card on the dashboard
#[derive(Serialize, Debug, Clone)]
pub struct LocationView {
    #[serde(flatten)]
    pub location: Location,
    pub type_label: Option<&'static str>,
    pub type_icon: &'static str,
    pub buffer_minutes: u32,
    pub equipment_preview: Vec<String>,
    pub equipment_overflow: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LocationBooking {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub location_id: Uuid,
    #[serde(default)]
    pub event_id: Option<Uuid>,
    pub booking_type: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub start_datetime: DateTime<Utc>,
    pub end_datetime: DateTime<Utc>,
    pub booking_status: BookingStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct CreateBookingRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub booking_type: Option<String>,
    #[serde(default)]
    pub event_id: Option<Uuid>,
    pub start_datetime: DateTime<Utc>,
    pub end_datetime: DateTime<Utc>,
    #[serde(default)]
    pub booking_status: Option<BookingStatus>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct BookingEventSummary {
    pub title: String,
    pub event_type: String,
}

#[derive(Serialize, Debug, Clone)]
pub struct BookingView {
    #[serde(flatten)]
    pub booking: LocationBooking,
    pub event: Option<BookingEventSummary>,
}

#[derive(Serialize, Debug)]
pub struct LocationDetail {
    #[serde(flatten)]
    pub location: LocationView,
    pub upcoming_bookings: Vec<BookingView>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodType {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Default for PeriodType {
    fn default() -> Self {
        PeriodType::Monthly
    }
}

// Precomputed usage statistics for one location over one reporting period
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LocationUsageAnalytics {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub location_id: Uuid,
    pub analysis_date: NaiveDate,
    pub period_type: PeriodType,
    #[serde(default)]
    pub total_bookings: u32,
    #[serde(default)]
    pub total_hours_used: f64,
    #[serde(default)]
    pub utilization_percentage: f64,
    #[serde(default)]
    pub most_common_event_type: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct RecordUsageRequest {
    pub location_id: Uuid,
    #[serde(default)]
    pub analysis_date: Option<NaiveDate>,
    #[serde(default)]
    pub period_type: Option<PeriodType>,
    pub total_bookings: u32,
    pub total_hours_used: f64,
    pub utilization_percentage: f64,
    #[serde(default)]
    pub most_common_event_type: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Default)]
#[serde(default)]
pub struct UsageQuery {
    pub period: Option<PeriodType>,
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UtilizationLevel {
    Low,
    Moderate,
    High,
    Critical,
}

impl UtilizationLevel {
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= 80.0 {
            UtilizationLevel::Critical
        } else if percentage >= 60.0 {
            UtilizationLevel::High
        } else if percentage >= 40.0 {
            UtilizationLevel::Moderate
        } else {
            UtilizationLevel::Low
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            UtilizationLevel::Critical => "red",
            UtilizationLevel::High => "yellow",
            UtilizationLevel::Moderate => "blue",
            UtilizationLevel::Low => "green",
        }
    }
}

#[derive(Serialize, Debug, Clone)]
pub struct UsageView {
    #[serde(flatten)]
    pub stats: LocationUsageAnalytics,
    pub location_name: String,
    pub utilization_level: UtilizationLevel,
    pub utilization_color: &'static str,
    pub utilization_display: String,
    pub hours_display: String,
}
