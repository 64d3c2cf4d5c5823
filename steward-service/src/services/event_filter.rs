// steward-service/src/services/event_filter.rs
use crate::models::{EventStatus, Role, ServiceError, StaffEvent, StaffEventListQuery};
use crate::services::visibility_gate::VisibilityGate;
use uuid::Uuid;

const ALL: &str = "all";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(EventStatus),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Uuid),
}

// Search text plus the two dropdown filters of the staff events page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterQuery {
    pub search_text: String,
    pub status: StatusFilter,
    pub category: CategoryFilter,
}

impl FilterQuery {
    // Build from the raw query string; a missing or "all" filter means no filtering
    pub fn from_request(query: &StaffEventListQuery) -> Result<Self, ServiceError> {
        let status = match query.status.as_deref().map(str::trim) {
            None | Some("") | Some(ALL) => StatusFilter::All,
            Some(value) => StatusFilter::Only(EventStatus::parse(value).ok_or_else(|| {
                ServiceError::BadRequest(format!("Unknown status filter: {}", value))
            })?),
        };

        let category = match query.category.as_deref().map(str::trim) {
            None | Some("") | Some(ALL) => CategoryFilter::All,
            Some(value) => CategoryFilter::Only(Uuid::parse_str(value).map_err(|_| {
                ServiceError::BadRequest(format!("Invalid category filter: {}", value))
            })?),
        };

        Ok(Self {
            search_text: query.search.clone(),
            status,
            category,
        })
    }

    fn matches_search(&self, event: &StaffEvent) -> bool {
        if self.search_text.is_empty() {
            return true;
        }
        let needle = self.search_text.to_lowercase();
        event.title.to_lowercase().contains(&needle)
            || event
                .description
                .as_ref()
                .map_or(false, |description| description.to_lowercase().contains(&needle))
    }

    fn matches_status(&self, event: &StaffEvent) -> bool {
        match self.status {
            StatusFilter::All => true,
            StatusFilter::Only(status) => event.status == status,
        }
    }

    fn matches_category(&self, event: &StaffEvent) -> bool {
        match self.category {
            CategoryFilter::All => true,
            CategoryFilter::Only(category_id) => event.category_id == Some(category_id),
        }
    }
}

/// Events the viewer may see that also satisfy the query, in their original order.
pub fn filter_events(
    gate: &VisibilityGate,
    events: Vec<StaffEvent>,
    viewer_role: Role,
    query: &FilterQuery,
) -> Vec<StaffEvent> {
    events
        .into_iter()
        .filter(|event| gate.can_view(viewer_role, &event.visibility_level))
        .filter(|event| query.matches_search(event))
        .filter(|event| query.matches_status(event))
        .filter(|event| query.matches_category(event))
        .collect()
}
