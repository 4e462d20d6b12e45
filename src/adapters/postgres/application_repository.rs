//! PostgreSQL implementation of ApplicationRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::applications::{ApplicationCard, ApplicationStatus};
use crate::domain::foundation::{ApplicationId, OwnerId, PropertyId};
use crate::ports::{ApplicationError, ApplicationRepository};

#[derive(Clone)]
pub struct PostgresApplicationRepository {
    pool: PgPool,
}

impl PostgresApplicationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ApplicationRow {
    id: Uuid,
    property_id: Uuid,
    applicant_name: Option<String>,
    status: String,
    submitted_at: Option<DateTime<Utc>>,
}

fn parse_status(s: &str) -> Result<ApplicationStatus, ApplicationError> {
    match s.to_lowercase().as_str() {
        "pending" => Ok(ApplicationStatus::Pending),
        "reviewing" => Ok(ApplicationStatus::Reviewing),
        "approved" => Ok(ApplicationStatus::Approved),
        "rejected" => Ok(ApplicationStatus::Rejected),
        _ => Err(ApplicationError::Database(format!(
            "Invalid application status value: {}",
            s
        ))),
    }
}

fn status_to_str(status: ApplicationStatus) -> &'static str {
    match status {
        ApplicationStatus::Pending => "pending",
        ApplicationStatus::Reviewing => "reviewing",
        ApplicationStatus::Approved => "approved",
        ApplicationStatus::Rejected => "rejected",
    }
}

fn row_to_card(row: ApplicationRow) -> Result<ApplicationCard, ApplicationError> {
    Ok(ApplicationCard {
        id: ApplicationId::from_uuid(row.id),
        property_id: PropertyId::from_uuid(row.property_id),
        applicant_name: row.applicant_name.unwrap_or_default(),
        status: parse_status(&row.status)?,
        submitted_at: row.submitted_at,
    })
}

#[async_trait]
impl ApplicationRepository for PostgresApplicationRepository {
    async fn list_for_owner(&self, owner_id: &OwnerId) -> Result<Vec<ApplicationCard>, ApplicationError> {
        let rows: Vec<ApplicationRow> = sqlx::query_as(
            r#"
            SELECT a.id, a.property_id, a.applicant_name, a.status, a.submitted_at
            FROM applications a
            JOIN properties p ON p.id = a.property_id
            WHERE p.owner_id = $1
            ORDER BY a.submitted_at ASC NULLS FIRST
            "#,
        )
        .bind(owner_id.as_str())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(row_to_card).collect()
    }

    async fn update_status(
        &self,
        id: ApplicationId,
        from: ApplicationStatus,
        to: ApplicationStatus,
    ) -> Result<(), ApplicationError> {
        let result = sqlx::query(
            r#"
            UPDATE applications SET status = $2, updated_at = NOW()
            WHERE id = $1 AND status = $3
            "#,
        )
        .bind(id.as_uuid())
        .bind(status_to_str(to))
        .bind(status_to_str(from))
        .execute(&self.pool)
        .await?;

        if result.rows_affected() > 0 {
            return Ok(());
        }

        let current: Option<String> = sqlx::query_scalar("SELECT status FROM applications WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        match current {
            None => Err(ApplicationError::NotFound(id)),
            Some(label) => Err(ApplicationError::stale_status(id, from, parse_status(&label)?)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_labels_round_trip() {
        for status in ApplicationStatus::ALL {
            assert_eq!(parse_status(status_to_str(status)).unwrap(), status);
        }
    }

    #[test]
    fn test_parse_status_is_case_insensitive() {
        assert_eq!(parse_status("Approved").unwrap(), ApplicationStatus::Approved);
    }

    #[test]
    fn test_unknown_status_is_a_database_error() {
        assert!(matches!(parse_status("withdrawn"), Err(ApplicationError::Database(_))));
    }

    #[test]
    fn test_row_without_name_maps_to_empty_name() {
        let row = ApplicationRow {
            id: Uuid::new_v4(),
            property_id: Uuid::new_v4(),
            applicant_name: None,
            status: "reviewing".to_string(),
            submitted_at: None,
        };

        let card = row_to_card(row).unwrap();
        assert_eq!(card.applicant_name, "");
        assert_eq!(card.status, ApplicationStatus::Reviewing);
    }
}
