// steward-service/src/utils/event_storage.rs
use crate::models::{ServiceError, StaffEvent, StaffEventCategory};
use crate::utils::store::{DataStore, EVENTS, STAFF_EVENT_CATEGORIES};
use log::{debug, info};
use uuid::Uuid;

impl DataStore {
    pub fn save_event(&self, event: &StaffEvent) -> Result<(), ServiceError> {
        let dir = self.tenant_dir(&event.tenant_id, EVENTS);
        self.write_record(&dir, &event.id, event)?;
        info!("✅ Saved event: {} for tenant: {}", event.id, event.tenant_id);
        Ok(())
    }

    pub fn find_event(&self, tenant_id: &Uuid, event_id: &Uuid) -> Result<Option<StaffEvent>, ServiceError> {
        let dir = self.tenant_dir(tenant_id, EVENTS);
        let event: Option<StaffEvent> = self.read_record(&dir, event_id)?;
        // A record filed under the wrong tenant is treated as missing
        Ok(event.filter(|event| event.tenant_id == *tenant_id))
    }

    // Events of one type, ordered by start date then start time
    pub fn list_events_by_type(&self, tenant_id: &Uuid, event_type: &str) -> Result<Vec<StaffEvent>, ServiceError> {
        let dir = self.tenant_dir(tenant_id, EVENTS);
        let mut events: Vec<StaffEvent> = self
            .read_all::<StaffEvent>(&dir)?
            .into_iter()
            .filter(|event| event.tenant_id == *tenant_id && event.event_type == event_type)
            .collect();

        events.sort_by(|a, b| {
            a.start_date
                .cmp(&b.start_date)
                .then_with(|| a.start_time.cmp(&b.start_time))
                .then_with(|| a.created_at.cmp(&b.created_at))
        });

        debug!("Loaded {} '{}' events for tenant: {}", events.len(), event_type, tenant_id);
        Ok(events)
    }

    pub fn save_category(&self, category: &StaffEventCategory) -> Result<(), ServiceError> {
        let dir = self.tenant_dir(&category.tenant_id, STAFF_EVENT_CATEGORIES);
        self.write_record(&dir, &category.id, category)?;
        info!("✅ Saved staff event category: {}", category.id);
        Ok(())
    }

    pub fn find_category(
        &self,
        tenant_id: &Uuid,
        category_id: &Uuid,
    ) -> Result<Option<StaffEventCategory>, ServiceError> {
        let dir = self.tenant_dir(tenant_id, STAFF_EVENT_CATEGORIES);
        let category: Option<StaffEventCategory> = self.read_record(&dir, category_id)?;
        Ok(category.filter(|category| category.tenant_id == *tenant_id))
    }

    // Active categories ordered by sort order, then name
    pub fn list_active_categories(&self, tenant_id: &Uuid) -> Result<Vec<StaffEventCategory>, ServiceError> {
        let dir = self.tenant_dir(tenant_id, STAFF_EVENT_CATEGORIES);
        let mut categories: Vec<StaffEventCategory> = self
            .read_all::<StaffEventCategory>(&dir)?
            .into_iter()
            .filter(|category| category.tenant_id == *tenant_id && category.is_active)
            .collect();

        categories.sort_by(|a, b| a.sort_order.cmp(&b.sort_order).then_with(|| a.name.cmp(&b.name)));
        Ok(categories)
    }
}
