// steward-service/src/services/staff_event_service.rs
use crate::models::{
    CategorySummary, CreateCategoryRequest, CreateStaffEventRequest, EventStatus, FormattedDateTime,
    Location, RoomSummary, ServiceError, StaffEvent, StaffEventCategory, StaffEventView, VisibilityTier,
    STAFF_EVENT_TYPE,
};
use crate::utils::store::DataStore;
use crate::utils::validation::{
    is_hex_color, is_valid_email, optional_text, optional_uuid, parse_date, parse_time, required_text,
};
use crate::utils::UserContext;
use chrono::{NaiveDate, NaiveTime, Utc};
use log::warn;
use std::collections::HashMap;
use uuid::Uuid;

const DEFAULT_CATEGORY_COLOR: &str = "#6b7280";
const DEFAULT_CATEGORY_ICON: &str = "📅";

// Date as M/D/YYYY and time as hh:mm AM/PM
pub fn format_date_time(date: NaiveDate, time: NaiveTime) -> FormattedDateTime {
    let date_time = date.and_time(time);
    FormattedDateTime {
        date: date_time.format("%-m/%-d/%Y").to_string(),
        time: date_time.format("%I:%M %p").to_string(),
    }
}

// A blank tier means the form default; anything else must be a known tier
fn parse_form_tier(value: &str) -> Result<VisibilityTier, ServiceError> {
    match optional_text(value) {
        None => Ok(VisibilityTier::StaffOnly),
        Some(raw) => {
            let tier = VisibilityTier::parse(&raw);
            if tier.is_recognized() {
                Ok(tier)
            } else {
                Err(ServiceError::BadRequest(format!("Unknown visibility level: {}", raw)))
            }
        }
    }
}

/// Validate the staff event form and turn it into a new event record owned by
/// the session's tenant.
///
/// Referenced category and room must exist in the same tenant. When no
/// location name is typed, the room's name is used.
pub fn build_staff_event(
    store: &DataStore,
    context: &UserContext,
    form: &CreateStaffEventRequest,
) -> Result<StaffEvent, ServiceError> {
    let title = required_text(&form.title, "Event title")?;
    let start_date = parse_date(&form.start_date, "Start date")?;
    let end_date = match optional_text(&form.end_date) {
        Some(raw) => parse_date(&raw, "End date")?,
        None => start_date,
    };
    if end_date < start_date {
        return Err(ServiceError::BadRequest("End date cannot be before start date".to_string()));
    }

    let start_time = parse_time(&form.start_time, "Start time")?;
    let end_time = parse_time(&form.end_time, "End time")?;
    if end_date == start_date && end_time < start_time {
        return Err(ServiceError::BadRequest("End time cannot be before start time".to_string()));
    }

    let visibility_level = parse_form_tier(&form.visibility_level)?;

    let contact_email = optional_text(&form.contact_email);
    if let Some(email) = &contact_email {
        if !is_valid_email(email) {
            return Err(ServiceError::BadRequest(format!("Invalid contact email: {}", email)));
        }
    }

    let category_id = optional_uuid(&form.category_id, "Category")?;
    if let Some(id) = &category_id {
        if store.find_category(&context.tenant_id, id)?.is_none() {
            return Err(ServiceError::BadRequest("Unknown category".to_string()));
        }
    }

    let room_id = optional_uuid(&form.room_id, "Room")?;
    let room = match &room_id {
        Some(id) => Some(
            store
                .find_location(&context.tenant_id, id)?
                .ok_or_else(|| ServiceError::BadRequest("Unknown room".to_string()))?,
        ),
        None => None,
    };
    let location_name = optional_text(&form.location_name).or_else(|| room.map(|room| room.name));

    let now = Utc::now();
    Ok(StaffEvent {
        id: Uuid::new_v4(),
        tenant_id: context.tenant_id,
        title,
        description: optional_text(&form.description),
        event_type: STAFF_EVENT_TYPE.to_string(),
        start_date,
        end_date: Some(end_date),
        start_time,
        end_time,
        location_name,
        room_id,
        visibility_level,
        status: EventStatus::Confirmed,
        approval_required: form.approval_required,
        approved_by: None,
        approved_at: None,
        contact_name: optional_text(&form.contact_name),
        contact_email,
        notes: optional_text(&form.notes),
        category_id,
        created_by: context.user_id.to_string(),
        created_at: now,
        updated_at: now,
    })
}

pub fn build_category(
    context: &UserContext,
    form: &CreateCategoryRequest,
) -> Result<StaffEventCategory, ServiceError> {
    let name = required_text(&form.name, "Category name")?;
    let color = optional_text(&form.color).unwrap_or_else(|| DEFAULT_CATEGORY_COLOR.to_string());
    if !is_hex_color(&color) {
        return Err(ServiceError::BadRequest(format!("Invalid color: {}", color)));
    }

    Ok(StaffEventCategory {
        id: Uuid::new_v4(),
        tenant_id: context.tenant_id,
        name,
        description: optional_text(&form.description),
        color,
        icon: optional_text(&form.icon).unwrap_or_else(|| DEFAULT_CATEGORY_ICON.to_string()),
        access_level: parse_form_tier(&form.access_level)?,
        is_confidential: form.is_confidential,
        sort_order: form.sort_order,
        is_active: true,
        created_at: Utc::now(),
    })
}

// Joins the category and room onto each event and derives display fields
pub struct EventViewBuilder {
    categories: HashMap<Uuid, StaffEventCategory>,
    rooms: HashMap<Uuid, Location>,
}

impl EventViewBuilder {
    pub fn new(categories: Vec<StaffEventCategory>, rooms: Vec<Location>) -> Self {
        Self {
            categories: categories.into_iter().map(|category| (category.id, category)).collect(),
            rooms: rooms.into_iter().map(|room| (room.id, room)).collect(),
        }
    }

    pub fn load(store: &DataStore, tenant_id: &Uuid) -> Result<Self, ServiceError> {
        Ok(Self::new(
            store.list_active_categories(tenant_id)?,
            store.list_all_locations(tenant_id)?,
        ))
    }

    pub fn view(&self, event: StaffEvent) -> StaffEventView {
        let category = event.category_id.and_then(|id| {
            let found = self.categories.get(&id).map(CategorySummary::from);
            if found.is_none() {
                warn!("Event {} references missing category {}", event.id, id);
            }
            found
        });
        let room = event.room_id.and_then(|id| {
            self.rooms.get(&id).map(|room| RoomSummary {
                id: room.id,
                name: room.name.clone(),
            })
        });

        let starts = format_date_time(event.start_date, event.start_time);
        let ends = format_date_time(event.end_date.unwrap_or(event.start_date), event.end_time);

        StaffEventView {
            visibility: event.visibility_level.info(),
            status_label: event.status.label(),
            status_color: event.status.color(),
            category,
            room,
            starts,
            ends,
            event,
        }
    }
}
