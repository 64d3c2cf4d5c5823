// steward-service/src/services/location_service.rs
use crate::models::{
    BookingEventSummary, BookingStatus, BookingView, CreateBookingRequest, CreateLocationRequest, Location,
    LocationBooking, LocationType, LocationUsageAnalytics, LocationView, RecordUsageRequest, ServiceError,
    UsageView, UtilizationLevel, DEFAULT_BUFFER_MINUTES,
};
use crate::utils::store::DataStore;
use crate::utils::validation::{optional_text, optional_u32, required_text};
use crate::utils::UserContext;
use chrono::Utc;
use std::collections::HashMap;
use uuid::Uuid;

pub const EQUIPMENT_PREVIEW_LEN: usize = 3;
pub const UPCOMING_BOOKINGS_LIMIT: usize = 10;
pub const MAX_BUFFER_MINUTES: u32 = 24 * 60;
const UNKNOWN_LOCATION: &str = "Unknown Location";
const DEFAULT_BOOKING_TYPE: &str = "event";

// "projector, sound system,, chairs" -> ["projector", "sound system", "chairs"]
pub fn parse_equipment_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

// Setup and cleanup buffers are bounded to one day
fn parse_buffer(raw: &str, field: &str) -> Result<u32, ServiceError> {
    let minutes = optional_u32(raw, field)?.unwrap_or(DEFAULT_BUFFER_MINUTES);
    if minutes > MAX_BUFFER_MINUTES {
        return Err(ServiceError::BadRequest(format!(
            "{} cannot exceed {} minutes",
            field, MAX_BUFFER_MINUTES
        )));
    }
    Ok(minutes)
}

pub fn build_location(context: &UserContext, form: &CreateLocationRequest) -> Result<Location, ServiceError> {
    let name = required_text(&form.name, "Location name")?;

    let location_type = match optional_text(&form.location_type) {
        None => LocationType::default(),
        Some(raw) => {
            let parsed = LocationType::parse(&raw);
            if parsed.label().is_none() {
                return Err(ServiceError::BadRequest(format!("Unknown location type: {}", raw)));
            }
            parsed
        }
    };

    let capacity = optional_u32(&form.capacity, "Capacity")?;
    if capacity == Some(0) {
        return Err(ServiceError::BadRequest("Capacity must be at least 1".to_string()));
    }

    let now = Utc::now();
    Ok(Location {
        id: Uuid::new_v4(),
        tenant_id: context.tenant_id,
        name,
        description: optional_text(&form.description),
        location_type,
        capacity,
        equipment_list: parse_equipment_list(&form.equipment_list),
        setup_time_minutes: parse_buffer(&form.setup_time_minutes, "Setup time")?,
        cleanup_time_minutes: parse_buffer(&form.cleanup_time_minutes, "Cleanup time")?,
        requires_approval: form.requires_approval,
        access_restrictions: optional_text(&form.access_restrictions),
        booking_instructions: optional_text(&form.booking_instructions),
        maintenance_notes: optional_text(&form.maintenance_notes),
        is_active: true,
        sort_order: form.sort_order,
        created_at: now,
        updated_at: now,
    })
}

pub fn location_view(location: Location) -> LocationView {
    let equipment_preview: Vec<String> = location
        .equipment_list
        .iter()
        .take(EQUIPMENT_PREVIEW_LEN)
        .cloned()
        .collect();
    let equipment_overflow = location.equipment_list.len().saturating_sub(EQUIPMENT_PREVIEW_LEN);

    LocationView {
        type_label: location.location_type.label(),
        type_icon: location.location_type.icon(),
        buffer_minutes: location
            .setup_time_minutes
            .saturating_add(location.cleanup_time_minutes),
        equipment_preview,
        equipment_overflow,
        location,
    }
}

/// Validate a booking request against its location.
///
/// Without an explicit status, bookings of locations that require approval
/// start out pending; everything else is confirmed straight away.
pub fn build_booking(
    store: &DataStore,
    context: &UserContext,
    location: &Location,
    form: &CreateBookingRequest,
) -> Result<LocationBooking, ServiceError> {
    let title = required_text(&form.title, "Booking title")?;
    if form.end_datetime <= form.start_datetime {
        return Err(ServiceError::BadRequest("Booking must end after it starts".to_string()));
    }

    if let Some(event_id) = &form.event_id {
        if store.find_event(&context.tenant_id, event_id)?.is_none() {
            return Err(ServiceError::BadRequest("Unknown event".to_string()));
        }
    }

    let booking_status = form.booking_status.unwrap_or(if location.requires_approval {
        BookingStatus::Pending
    } else {
        BookingStatus::Confirmed
    });

    let now = Utc::now();
    Ok(LocationBooking {
        id: Uuid::new_v4(),
        tenant_id: context.tenant_id,
        location_id: location.id,
        event_id: form.event_id,
        booking_type: form
            .booking_type
            .as_deref()
            .and_then(optional_text)
            .unwrap_or_else(|| DEFAULT_BOOKING_TYPE.to_string()),
        title,
        description: form.description.as_deref().and_then(optional_text),
        start_datetime: form.start_datetime,
        end_datetime: form.end_datetime,
        booking_status,
        created_at: now,
        updated_at: now,
    })
}

// Attach the linked event's title and type to each booking
pub fn booking_views(
    store: &DataStore,
    tenant_id: &Uuid,
    bookings: Vec<LocationBooking>,
) -> Result<Vec<BookingView>, ServiceError> {
    bookings
        .into_iter()
        .map(|booking| -> Result<BookingView, ServiceError> {
            let event = match &booking.event_id {
                Some(event_id) => store.find_event(tenant_id, event_id)?.map(|event| BookingEventSummary {
                    title: event.title,
                    event_type: event.event_type,
                }),
                None => None,
            };
            Ok(BookingView { booking, event })
        })
        .collect()
}

pub fn build_usage(context: &UserContext, form: &RecordUsageRequest) -> Result<LocationUsageAnalytics, ServiceError> {
    if !(0.0..=100.0).contains(&form.utilization_percentage) {
        return Err(ServiceError::BadRequest(
            "Utilization percentage must be between 0 and 100".to_string(),
        ));
    }
    if !form.total_hours_used.is_finite() || form.total_hours_used < 0.0 {
        return Err(ServiceError::BadRequest("Hours used cannot be negative".to_string()));
    }

    let now = Utc::now();
    Ok(LocationUsageAnalytics {
        id: Uuid::new_v4(),
        tenant_id: context.tenant_id,
        location_id: form.location_id,
        analysis_date: form.analysis_date.unwrap_or_else(|| now.date_naive()),
        period_type: form.period_type.unwrap_or_default(),
        total_bookings: form.total_bookings,
        total_hours_used: form.total_hours_used,
        utilization_percentage: form.utilization_percentage,
        most_common_event_type: form.most_common_event_type.as_deref().and_then(optional_text),
        created_at: now,
        updated_at: now,
    })
}

pub fn usage_views(rows: Vec<LocationUsageAnalytics>, locations: &[Location]) -> Vec<UsageView> {
    let names: HashMap<Uuid, &str> = locations
        .iter()
        .map(|location| (location.id, location.name.as_str()))
        .collect();

    rows.into_iter()
        .map(|stats| {
            let level = UtilizationLevel::from_percentage(stats.utilization_percentage);
            UsageView {
                location_name: names
                    .get(&stats.location_id)
                    .copied()
                    .unwrap_or(UNKNOWN_LOCATION)
                    .to_string(),
                utilization_level: level,
                utilization_color: level.color(),
                utilization_display: format!("{:.1}%", stats.utilization_percentage),
                hours_display: format!("{:.1}h", stats.total_hours_used),
                stats,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PeriodType, Role};
    use crate::utils::store::TempStore;
    use chrono::{Duration, NaiveDate};

    fn context() -> UserContext {
        UserContext {
            user_id: Uuid::new_v4(),
            email: "facilities@gracechurch.org".to_string(),
            tenant_id: Uuid::new_v4(),
            role: Role::Admin,
        }
    }

    fn temp_store() -> TempStore {
        TempStore::new("steward-locations")
    }

    #[test]
    fn equipment_is_split_and_trimmed() {
        assert_eq!(
            parse_equipment_list(" projector, sound system,, chairs ,"),
            vec!["projector", "sound system", "chairs"]
        );
        assert!(parse_equipment_list("   ").is_empty());
    }

    #[test]
    fn form_defaults() {
        let location = build_location(
            &context(),
            &CreateLocationRequest {
                name: "Fellowship Hall".to_string(),
                ..CreateLocationRequest::default()
            },
        )
        .unwrap();
        assert_eq!(location.location_type, LocationType::MeetingRoom);
        assert_eq!(location.capacity, None);
        assert_eq!(location.setup_time_minutes, 15);
        assert_eq!(location.cleanup_time_minutes, 15);
        assert!(location.is_active);
    }

    #[test]
    fn form_rejects_bad_numbers_and_types() {
        let context = context();
        let base = || CreateLocationRequest {
            name: "Sanctuary".to_string(),
            ..CreateLocationRequest::default()
        };

        let mut bad_capacity = base();
        bad_capacity.capacity = "lots".to_string();
        assert!(build_location(&context, &bad_capacity).is_err());

        let mut zero_capacity = base();
        zero_capacity.capacity = "0".to_string();
        assert!(build_location(&context, &zero_capacity).is_err());

        let mut bad_type = base();
        bad_type.location_type = "parking_lot".to_string();
        assert!(build_location(&context, &bad_type).is_err());

        let mut no_name = base();
        no_name.name = String::new();
        assert!(build_location(&context, &no_name).is_err());
    }

    #[test]
    fn card_shows_three_items_and_overflow() {
        let location = build_location(
            &context(),
            &CreateLocationRequest {
                name: "Sanctuary".to_string(),
                location_type: "worship_space".to_string(),
                equipment_list: "organ, piano, projector, sound board, risers".to_string(),
                setup_time_minutes: "30".to_string(),
                cleanup_time_minutes: "20".to_string(),
                ..CreateLocationRequest::default()
            },
        )
        .unwrap();

        let view = location_view(location);
        assert_eq!(view.equipment_preview, vec!["organ", "piano", "projector"]);
        assert_eq!(view.equipment_overflow, 2);
        assert_eq!(view.buffer_minutes, 50);
        assert_eq!(view.type_icon, "⛪");
        assert_eq!(view.type_label, Some("Worship Space"));
    }

    #[test]
    fn oversized_buffers_are_rejected() {
        let context = context();
        for (setup, cleanup) in [("4294967295", ""), ("", "1441")] {
            let form = CreateLocationRequest {
                name: "Gym".to_string(),
                setup_time_minutes: setup.to_string(),
                cleanup_time_minutes: cleanup.to_string(),
                ..CreateLocationRequest::default()
            };
            assert!(matches!(
                build_location(&context, &form),
                Err(ServiceError::BadRequest(_))
            ));
        }

        let form = CreateLocationRequest {
            name: "Gym".to_string(),
            setup_time_minutes: "1440".to_string(),
            cleanup_time_minutes: "1440".to_string(),
            ..CreateLocationRequest::default()
        };
        assert_eq!(location_view(build_location(&context, &form).unwrap()).buffer_minutes, 2880);
    }

    #[test]
    fn stored_buffers_never_overflow_the_card() {
        let mut location = build_location(
            &context(),
            &CreateLocationRequest {
                name: "Imported hall".to_string(),
                ..CreateLocationRequest::default()
            },
        )
        .unwrap();
        location.setup_time_minutes = u32::MAX;
        location.cleanup_time_minutes = 30;

        assert_eq!(location_view(location).buffer_minutes, u32::MAX);
    }

    #[test]
    fn booking_status_follows_approval_flag() {
        let store = temp_store();
        let context = context();
        let mut location = build_location(
            &context,
            &CreateLocationRequest {
                name: "Chapel".to_string(),
                ..CreateLocationRequest::default()
            },
        )
        .unwrap();
        let start = Utc::now() + Duration::days(2);
        let form = CreateBookingRequest {
            title: "Wedding rehearsal".to_string(),
            description: None,
            booking_type: None,
            event_id: None,
            start_datetime: start,
            end_datetime: start + Duration::hours(2),
            booking_status: None,
        };

        let booking = build_booking(&store, &context, &location, &form).unwrap();
        assert_eq!(booking.booking_status, BookingStatus::Confirmed);
        assert_eq!(booking.booking_type, "event");

        location.requires_approval = true;
        let booking = build_booking(&store, &context, &location, &form).unwrap();
        assert_eq!(booking.booking_status, BookingStatus::Pending);
    }

    #[test]
    fn booking_must_end_after_start() {
        let store = temp_store();
        let context = context();
        let location = build_location(
            &context,
            &CreateLocationRequest {
                name: "Chapel".to_string(),
                ..CreateLocationRequest::default()
            },
        )
        .unwrap();
        let start = Utc::now();
        let form = CreateBookingRequest {
            title: "Backwards".to_string(),
            description: None,
            booking_type: None,
            event_id: None,
            start_datetime: start,
            end_datetime: start,
            booking_status: None,
        };
        assert!(build_booking(&store, &context, &location, &form).is_err());
    }

    #[test]
    fn usage_rows_resolve_names_and_levels() {
        let context = context();
        let location = build_location(
            &context,
            &CreateLocationRequest {
                name: "Youth Room".to_string(),
                ..CreateLocationRequest::default()
            },
        )
        .unwrap();

        let known = build_usage(
            &context,
            &RecordUsageRequest {
                location_id: location.id,
                analysis_date: NaiveDate::from_ymd_opt(2026, 10, 1),
                period_type: Some(PeriodType::Monthly),
                total_bookings: 14,
                total_hours_used: 31.26,
                utilization_percentage: 82.46,
                most_common_event_type: Some("youth".to_string()),
            },
        )
        .unwrap();
        let mut orphan = known.clone();
        orphan.location_id = Uuid::new_v4();
        orphan.utilization_percentage = 12.0;

        let views = usage_views(vec![known, orphan], &[location]);
        assert_eq!(views[0].location_name, "Youth Room");
        assert_eq!(views[0].utilization_level, UtilizationLevel::Critical);
        assert_eq!(views[0].utilization_display, "82.5%");
        assert_eq!(views[0].hours_display, "31.3h");
        assert_eq!(views[1].location_name, "Unknown Location");
        assert_eq!(views[1].utilization_color, "green");
    }

    #[test]
    fn usage_percentage_out_of_range_is_rejected() {
        let form = RecordUsageRequest {
            location_id: Uuid::new_v4(),
            analysis_date: None,
            period_type: None,
            total_bookings: 1,
            total_hours_used: 1.0,
            utilization_percentage: 140.0,
            most_common_event_type: None,
        };
        assert!(build_usage(&context(), &form).is_err());
    }
}
