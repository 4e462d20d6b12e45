//! ListPropertiesHandler - Query handler for the filtered portfolio grid.

use std::sync::Arc;

use chrono::NaiveDate;

use super::load_snapshot::load_listing_snapshot;
use crate::domain::foundation::OwnerId;
use crate::domain::portfolio::{filter_and_sort, portfolio_listings, PropertyFilter, PropertyListing};
use crate::ports::{PortfolioError, PortfolioReader};

/// Query for the portfolio grid of one owner.
#[derive(Debug, Clone)]
pub struct ListPropertiesQuery {
    pub owner_id: OwnerId,
    pub filter: PropertyFilter,
    pub as_of: NaiveDate,
}

/// Result of a successful grid query.
#[derive(Debug, Clone)]
pub struct ListPropertiesResult {
    pub listings: Vec<PropertyListing>,
    /// Number of properties before filtering.
    pub total: usize,
}

pub struct ListPropertiesHandler {
    reader: Arc<dyn PortfolioReader>,
}

impl ListPropertiesHandler {
    pub fn new(reader: Arc<dyn PortfolioReader>) -> Self {
        Self { reader }
    }

    pub async fn handle(&self, query: ListPropertiesQuery) -> Result<ListPropertiesResult, PortfolioError> {
        validate_filter(&query.filter)?;

        let snapshot = load_listing_snapshot(self.reader.as_ref(), &query.owner_id).await?;
        let listings = portfolio_listings(&snapshot, query.as_of);

        Ok(ListPropertiesResult {
            total: listings.len(),
            listings: filter_and_sort(&listings, &query.filter),
        })
    }
}

fn validate_filter(filter: &PropertyFilter) -> Result<(), PortfolioError> {
    for (name, bound) in [("min_rent", filter.min_rent), ("max_rent", filter.max_rent)] {
        if bound.is_some_and(|value| !value.is_finite() || value < 0.0) {
            return Err(PortfolioError::InvalidInput(format!(
                "{} must be a non-negative number",
                name
            )));
        }
    }
    if let (Some(min), Some(max)) = (filter.min_rent, filter.max_rent) {
        if min > max {
            return Err(PortfolioError::InvalidInput(
                "min_rent must not exceed max_rent".to_string(),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::portfolio::test_support::{owner, today, MockPortfolioReader};
    use crate::domain::portfolio::{PropertyHealth, SortField, SortOrder, StatusFilter};

    fn query(filter: PropertyFilter) -> ListPropertiesQuery {
        ListPropertiesQuery {
            owner_id: owner(),
            filter,
            as_of: today(),
        }
    }

    #[tokio::test]
    async fn test_default_filter_returns_everything() {
        let handler = ListPropertiesHandler::new(Arc::new(MockPortfolioReader::scenario()));

        let result = handler.handle(query(PropertyFilter::default())).await.unwrap();

        assert_eq!(result.total, 2);
        assert_eq!(result.listings.len(), 2);
    }

    #[tokio::test]
    async fn test_rented_filter_uses_occupancy() {
        let handler = ListPropertiesHandler::new(Arc::new(MockPortfolioReader::scenario()));
        let filter = PropertyFilter {
            status: StatusFilter::Rented,
            ..Default::default()
        };

        let result = handler.handle(query(filter)).await.unwrap();

        assert_eq!(result.listings.len(), 1);
        assert_eq!(result.listings[0].property.title, "Canal House");
        assert_eq!(result.listings[0].health, PropertyHealth::Excellent);
        assert_eq!(result.total, 2);
    }

    #[tokio::test]
    async fn test_sorts_by_rent() {
        let handler = ListPropertiesHandler::new(Arc::new(MockPortfolioReader::scenario()));
        let filter = PropertyFilter {
            sort_by: SortField::Rent,
            sort_order: SortOrder::Asc,
            ..Default::default()
        };

        let result = handler.handle(query(filter)).await.unwrap();
        let rents: Vec<f64> = result.listings.iter().map(|l| l.property.monthly_rent).collect();
        assert_eq!(rents, vec![800.0, 1000.0]);
    }

    #[tokio::test]
    async fn test_rejects_inverted_rent_range() {
        let handler = ListPropertiesHandler::new(Arc::new(MockPortfolioReader::scenario()));
        let filter = PropertyFilter {
            min_rent: Some(2000.0),
            max_rent: Some(1000.0),
            ..Default::default()
        };

        let result = handler.handle(query(filter)).await;
        assert!(matches!(result, Err(PortfolioError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_rejects_negative_bound() {
        let handler = ListPropertiesHandler::new(Arc::new(MockPortfolioReader::scenario()));
        let filter = PropertyFilter {
            min_rent: Some(-5.0),
            ..Default::default()
        };

        assert!(handler.handle(query(filter)).await.is_err());
    }

    #[tokio::test]
    async fn test_grid_does_not_need_payments() {
        let reader = MockPortfolioReader::scenario().failing_on("payments");
        let handler = ListPropertiesHandler::new(Arc::new(reader));

        assert!(handler.handle(query(PropertyFilter::default())).await.is_ok());
    }
}
