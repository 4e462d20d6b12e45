//! Demo portfolio used when no database is configured.

use std::collections::HashMap;

use chrono::{Datelike, Duration, Months, NaiveDate, NaiveTime, TimeZone, Utc};

use super::portfolio_store::InMemoryPortfolioStore;
use crate::domain::applications::{ApplicationCard, ApplicationStatus};
use crate::domain::foundation::OwnerId;
use crate::domain::portfolio::{
    ListingStatus, MaintenanceStats, OccupancyRecord, PaymentStatus, Property, RentPayment,
};

/// Fills `store` with a small mixed portfolio for `owner_id`, dated around `today`.
pub async fn seed_demo_portfolio(store: &InMemoryPortfolioStore, owner_id: &OwnerId, today: NaiveDate) {
    let created = |days_ago: i64| {
        let date = today - Duration::days(days_ago);
        Utc.from_utc_datetime(&date.and_time(NaiveTime::default()))
    };
    let month_start = today.with_day0(0).unwrap_or(today);
    let months_back = |n: u32| month_start.checked_sub_months(Months::new(n)).unwrap_or(month_start);

    let canal = Property::new("Canal House", "Amsterdam", 1850.0)
        .with_owner(owner_id.clone())
        .with_status(ListingStatus::Rented)
        .with_address("Prinsengracht 12")
        .with_counters(420, 18)
        .with_created_at(created(400));
    let loft = Property::new("Harbour Loft", "Rotterdam", 1250.0)
        .with_owner(owner_id.clone())
        .with_status(ListingStatus::Rented)
        .with_address("Wilhelminakade 88")
        .with_counters(310, 9)
        .with_created_at(created(300));
    let studio = Property::new("Garden Studio", "Utrecht", 950.0)
        .with_owner(owner_id.clone())
        .with_status(ListingStatus::Published)
        .with_counters(150, 6)
        .with_created_at(created(120))
        .with_vacant_since(today - Duration::days(41));
    let attic = Property::new("Attic Room", "Leiden", 650.0)
        .with_owner(owner_id.clone())
        .with_status(ListingStatus::Published)
        .with_counters(40, 2)
        .with_created_at(created(60))
        .with_vacant_since(today - Duration::days(18));
    let cottage = Property::new("Dune Cottage", "Haarlem", 1400.0)
        .with_owner(owner_id.clone())
        .with_status(ListingStatus::Draft)
        .with_created_at(created(10));

    store
        .add_occupancy(
            OccupancyRecord::new(canal.id).moving_out(today + Duration::days(12)),
        )
        .await;
    store.add_occupancy(OccupancyRecord::new(loft.id)).await;

    for n in 0..3 {
        store
            .add_payment(RentPayment::new(canal.id, months_back(n), 1850.0, PaymentStatus::Paid))
            .await;
    }
    store
        .add_payment(RentPayment::new(loft.id, months_back(0), 1250.0, PaymentStatus::Pending))
        .await;
    store
        .add_payment(RentPayment::new(loft.id, months_back(1), 1250.0, PaymentStatus::Overdue))
        .await;
    store
        .add_payment(RentPayment::new(loft.id, months_back(2), 1250.0, PaymentStatus::Paid))
        .await;

    store
        .set_maintenance(
            loft.id,
            MaintenanceStats {
                open_count: 2,
                in_progress_count: 1,
                by_priority: HashMap::from([
                    (MaintenanceStats::URGENT_PRIORITY.to_string(), 1),
                    ("low".to_string(), 2),
                ]),
            },
        )
        .await;

    let applicants = [
        (studio.id, "Maya Jansen", ApplicationStatus::Pending, 3),
        (studio.id, "Tom de Vries", ApplicationStatus::Reviewing, 6),
        (attic.id, "Sara Bakker", ApplicationStatus::Pending, 1),
        (canal.id, "Lars Visser", ApplicationStatus::Approved, 200),
    ];
    for (property_id, name, status, days_ago) in applicants {
        let mut card = ApplicationCard::new(property_id, name).with_status(status);
        card.submitted_at = Some(created(days_ago));
        store.add_application(card).await;
    }

    for property in [canal, loft, studio, attic, cottage] {
        store.add_property(property).await;
    }

    tracing::info!(owner_id = %owner_id, "Seeded demo portfolio");
}
