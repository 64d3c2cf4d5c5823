// steward-service/src/utils/location_storage.rs
use crate::models::{
    BookingStatus, Location, LocationBooking, LocationUsageAnalytics, PeriodType, ServiceError,
};
use crate::utils::store::{DataStore, LOCATIONS, LOCATION_BOOKINGS, LOCATION_USAGE_ANALYTICS};
use chrono::{DateTime, NaiveDate, Utc};
use log::{debug, info};
use uuid::Uuid;

impl DataStore {
    pub fn save_location(&self, location: &Location) -> Result<(), ServiceError> {
        let dir = self.tenant_dir(&location.tenant_id, LOCATIONS);
        self.write_record(&dir, &location.id, location)?;
        info!("✅ Saved location: {} ({})", location.name, location.id);
        Ok(())
    }

    pub fn find_location(&self, tenant_id: &Uuid, location_id: &Uuid) -> Result<Option<Location>, ServiceError> {
        let dir = self.tenant_dir(tenant_id, LOCATIONS);
        let location: Option<Location> = self.read_record(&dir, location_id)?;
        Ok(location.filter(|location| location.tenant_id == *tenant_id))
    }

    // Active locations ordered by sort order, then name
    pub fn list_active_locations(&self, tenant_id: &Uuid) -> Result<Vec<Location>, ServiceError> {
        let dir = self.tenant_dir(tenant_id, LOCATIONS);
        let mut locations: Vec<Location> = self
            .read_all::<Location>(&dir)?
            .into_iter()
            .filter(|location| location.tenant_id == *tenant_id && location.is_active)
            .collect();

        locations.sort_by(|a, b| a.sort_order.cmp(&b.sort_order).then_with(|| a.name.cmp(&b.name)));
        Ok(locations)
    }

    // Every location of the tenant, inactive ones included; used to resolve names
    pub fn list_all_locations(&self, tenant_id: &Uuid) -> Result<Vec<Location>, ServiceError> {
        let dir = self.tenant_dir(tenant_id, LOCATIONS);
        Ok(self
            .read_all::<Location>(&dir)?
            .into_iter()
            .filter(|location| location.tenant_id == *tenant_id)
            .collect())
    }

    pub fn save_booking(&self, booking: &LocationBooking) -> Result<(), ServiceError> {
        let dir = self.tenant_dir(&booking.tenant_id, LOCATION_BOOKINGS);
        self.write_record(&dir, &booking.id, booking)?;
        info!("✅ Saved booking: {} for location: {}", booking.id, booking.location_id);
        Ok(())
    }

    // Confirmed bookings for a location starting at or after `from`, soonest first
    pub fn upcoming_bookings(
        &self,
        tenant_id: &Uuid,
        location_id: &Uuid,
        from: DateTime<Utc>,
        limit: usize,
    ) -> Result<Vec<LocationBooking>, ServiceError> {
        let dir = self.tenant_dir(tenant_id, LOCATION_BOOKINGS);
        let mut bookings: Vec<LocationBooking> = self
            .read_all::<LocationBooking>(&dir)?
            .into_iter()
            .filter(|booking| {
                booking.tenant_id == *tenant_id
                    && booking.location_id == *location_id
                    && booking.booking_status == BookingStatus::Confirmed
                    && booking.start_datetime >= from
            })
            .collect();

        bookings.sort_by(|a, b| a.start_datetime.cmp(&b.start_datetime));
        bookings.truncate(limit);

        debug!("Found {} upcoming bookings for location: {}", bookings.len(), location_id);
        Ok(bookings)
    }

    // Insert, or replace the row already recorded for the same location, period and date
    pub fn save_usage_analytics(&self, stats: &LocationUsageAnalytics) -> Result<LocationUsageAnalytics, ServiceError> {
        let dir = self.tenant_dir(&stats.tenant_id, LOCATION_USAGE_ANALYTICS);
        let existing = self
            .read_all::<LocationUsageAnalytics>(&dir)?
            .into_iter()
            .find(|row| {
                row.location_id == stats.location_id
                    && row.period_type == stats.period_type
                    && row.analysis_date == stats.analysis_date
            });

        let mut row = stats.clone();
        if let Some(previous) = existing {
            debug!("Replacing usage analytics row: {}", previous.id);
            row.id = previous.id;
            row.created_at = previous.created_at;
        }

        self.write_record(&dir, &row.id, &row)?;
        info!(
            "✅ Recorded {:?} usage for location: {} on {}",
            row.period_type, row.location_id, row.analysis_date
        );
        Ok(row)
    }

    pub fn list_usage_analytics(
        &self,
        tenant_id: &Uuid,
        period_type: PeriodType,
        analysis_date: NaiveDate,
    ) -> Result<Vec<LocationUsageAnalytics>, ServiceError> {
        let dir = self.tenant_dir(tenant_id, LOCATION_USAGE_ANALYTICS);
        let mut rows: Vec<LocationUsageAnalytics> = self
            .read_all::<LocationUsageAnalytics>(&dir)?
            .into_iter()
            .filter(|row| {
                row.tenant_id == *tenant_id
                    && row.period_type == period_type
                    && row.analysis_date == analysis_date
            })
            .collect();

        rows.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(rows)
    }
}
