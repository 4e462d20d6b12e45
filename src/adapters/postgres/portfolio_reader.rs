//! PostgreSQL implementation of PortfolioReader.
//!
//! Money columns are `numeric` and are read back as `float8`. Enum-like
//! columns are stored as lowercase text; unknown labels map to the
//! catch-all variants instead of failing the query.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde::de::DeserializeOwned;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{OwnerId, PropertyId};
use crate::domain::portfolio::{
    MaintenanceStats, OccupancyRecord, PaymentStatus, Property, PropertyHealth, RentPayment,
};
use crate::ports::{PortfolioError, PortfolioReader};

/// PostgreSQL implementation of the PortfolioReader port.
#[derive(Clone)]
pub struct PostgresPortfolioReader {
    pool: PgPool,
}

impl PostgresPortfolioReader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct PropertyRow {
    id: Uuid,
    owner_id: Option<String>,
    title: Option<String>,
    city: Option<String>,
    address: Option<String>,
    status: Option<String>,
    monthly_rent: Option<f64>,
    bedrooms: Option<i32>,
    bathrooms: Option<i32>,
    views_count: Option<i64>,
    inquiries_count: Option<i64>,
    created_at: Option<DateTime<Utc>>,
    vacant_since: Option<NaiveDate>,
    main_image: Option<String>,
    health: Option<String>,
}

#[derive(Debug, sqlx::FromRow)]
struct OccupancyRow {
    property_id: Uuid,
    move_in_date: Option<NaiveDate>,
    move_out_date: Option<NaiveDate>,
}

#[derive(Debug, sqlx::FromRow)]
struct PaymentRow {
    property_id: Uuid,
    month: Option<NaiveDate>,
    amount: Option<f64>,
    status: Option<String>,
}

#[derive(Debug, sqlx::FromRow)]
struct MaintenanceRow {
    property_id: Uuid,
    status: String,
    priority: Option<String>,
    count: i64,
}

/// Parses a text label into a snake_case serde enum.
fn parse_label<T: DeserializeOwned>(label: &str) -> Option<T> {
    serde_json::from_value(serde_json::Value::String(label.to_lowercase())).ok()
}

fn non_negative_u32(value: Option<i32>) -> u32 {
    value.and_then(|v| u32::try_from(v).ok()).unwrap_or(0)
}

fn non_negative_u64(value: Option<i64>) -> u64 {
    value.and_then(|v| u64::try_from(v).ok()).unwrap_or(0)
}

fn count_to_u32(count: i64) -> u32 {
    u32::try_from(count.max(0)).unwrap_or(u32::MAX)
}

fn property_ids_to_uuids(ids: &[PropertyId]) -> Vec<Uuid> {
    ids.iter().map(|id| *id.as_uuid()).collect()
}

impl From<PropertyRow> for Property {
    fn from(row: PropertyRow) -> Self {
        Property {
            id: PropertyId::from_uuid(row.id),
            owner_id: row.owner_id.and_then(|id| OwnerId::new(id).ok()),
            title: row.title.unwrap_or_default(),
            city: row.city.unwrap_or_default(),
            address: row.address,
            status: row.status.as_deref().and_then(parse_label).unwrap_or_default(),
            monthly_rent: row.monthly_rent.unwrap_or(0.0),
            bedrooms: non_negative_u32(row.bedrooms),
            bathrooms: non_negative_u32(row.bathrooms),
            views_count: non_negative_u64(row.views_count),
            inquiries_count: non_negative_u64(row.inquiries_count),
            created_at: row.created_at,
            vacant_since: row.vacant_since,
            main_image: row.main_image,
            health: row.health.as_deref().and_then(parse_label::<PropertyHealth>),
        }
    }
}

/// Folds per-(status, priority) counts into one aggregate per property.
fn aggregate_maintenance(rows: Vec<MaintenanceRow>) -> HashMap<PropertyId, MaintenanceStats> {
    let mut stats: HashMap<PropertyId, MaintenanceStats> = HashMap::new();
    for row in rows {
        let open = match row.status.as_str() {
            "open" => true,
            "in_progress" => false,
            _ => continue,
        };
        let count = count_to_u32(row.count);
        let entry = stats.entry(PropertyId::from_uuid(row.property_id)).or_default();
        if open {
            entry.open_count += count;
        } else {
            entry.in_progress_count += count;
        }
        if let Some(priority) = row.priority {
            *entry.by_priority.entry(priority.to_lowercase()).or_insert(0) += count;
        }
    }
    stats
}

#[async_trait]
impl PortfolioReader for PostgresPortfolioReader {
    async fn list_properties(&self, owner_id: &OwnerId) -> Result<Vec<Property>, PortfolioError> {
        let rows: Vec<PropertyRow> = sqlx::query_as(
            r#"
            SELECT id, owner_id, title, city, address, status,
                   monthly_rent::float8 AS monthly_rent,
                   bedrooms, bathrooms, views_count, inquiries_count,
                   created_at, vacant_since, main_image, health
            FROM properties
            WHERE owner_id = $1
            ORDER BY created_at DESC NULLS LAST
            "#,
        )
        .bind(owner_id.as_str())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Property::from).collect())
    }

    async fn list_occupancies(
        &self,
        property_ids: &[PropertyId],
    ) -> Result<Vec<OccupancyRecord>, PortfolioError> {
        if property_ids.is_empty() {
            return Ok(vec![]);
        }

        let rows: Vec<OccupancyRow> = sqlx::query_as(
            r#"
            SELECT property_id, move_in_date, move_out_date
            FROM occupancies
            WHERE property_id = ANY($1)
            "#,
        )
        .bind(property_ids_to_uuids(property_ids))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| OccupancyRecord {
                property_id: PropertyId::from_uuid(row.property_id),
                move_in_date: row.move_in_date,
                move_out_date: row.move_out_date,
            })
            .collect())
    }

    async fn list_rent_payments(
        &self,
        property_ids: &[PropertyId],
    ) -> Result<Vec<RentPayment>, PortfolioError> {
        if property_ids.is_empty() {
            return Ok(vec![]);
        }

        let rows: Vec<PaymentRow> = sqlx::query_as(
            r#"
            SELECT property_id, month, amount::float8 AS amount, status
            FROM rent_payments
            WHERE property_id = ANY($1)
            ORDER BY month DESC NULLS LAST
            "#,
        )
        .bind(property_ids_to_uuids(property_ids))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| RentPayment {
                property_id: PropertyId::from_uuid(row.property_id),
                month: row.month,
                amount: row.amount.unwrap_or(0.0),
                status: row
                    .status
                    .as_deref()
                    .and_then(parse_label::<PaymentStatus>)
                    .unwrap_or_default(),
            })
            .collect())
    }

    async fn maintenance_stats(
        &self,
        property_ids: &[PropertyId],
    ) -> Result<HashMap<PropertyId, MaintenanceStats>, PortfolioError> {
        if property_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows: Vec<MaintenanceRow> = sqlx::query_as(
            r#"
            SELECT property_id, status, priority, COUNT(*) AS count
            FROM maintenance_requests
            WHERE property_id = ANY($1) AND status IN ('open', 'in_progress')
            GROUP BY property_id, status, priority
            "#,
        )
        .bind(property_ids_to_uuids(property_ids))
        .fetch_all(&self.pool)
        .await?;

        Ok(aggregate_maintenance(rows))
    }

    async fn count_pending_applications(
        &self,
        property_ids: &[PropertyId],
    ) -> Result<u32, PortfolioError> {
        if property_ids.is_empty() {
            return Ok(0);
        }

        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM applications
            WHERE property_id = ANY($1) AND status = 'pending'
            "#,
        )
        .bind(property_ids_to_uuids(property_ids))
        .fetch_one(&self.pool)
        .await?;

        Ok(count_to_u32(count))
    }
}
