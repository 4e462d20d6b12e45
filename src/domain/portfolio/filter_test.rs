use chrono::{TimeZone, Utc};
use proptest::prelude::*;

use super::*;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 10).unwrap()
}

fn listing(property: Property, occupied: bool) -> PropertyListing {
    let occupied_ids: HashSet<PropertyId> = if occupied {
        HashSet::from([property.id])
    } else {
        HashSet::new()
    };
    PropertyListing::from_properties(&[property], &occupied_ids, today())
        .pop()
        .unwrap()
}

fn titles(listings: &[PropertyListing]) -> Vec<&str> {
    listings.iter().map(|l| l.property.title.as_str()).collect()
}

fn sample() -> Vec<PropertyListing> {
    vec![
        listing(
            Property::new("Harbour Loft", "Oslo", 1400.0)
                .with_status(ListingStatus::Published)
                .with_address("12 Pier Road")
                .with_created_at(Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap())
                .with_counters(50, 4),
            true,
        ),
        listing(
            Property::new("garden cottage", "Bergen", 900.0)
                .with_status(ListingStatus::Draft)
                .with_created_at(Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap())
                .with_counters(10, 9),
            false,
        ),
        listing(
            Property::new("City Studio", "Oslo", 700.0)
                .with_status(ListingStatus::Published)
                .with_vacant_since(NaiveDate::from_ymd_opt(2024, 4, 1).unwrap())
                .with_counters(80, 1),
            false,
        ),
        listing(
            Property::new("Old Mill", "Trondheim", 1100.0)
                .with_status(ListingStatus::Archived)
                .with_created_at(Utc.with_ymd_and_hms(2023, 11, 1, 0, 0, 0).unwrap()),
            true,
        ),
    ]
}

#[test]
fn default_filter_sorts_newest_first_with_missing_dates_last() {
    let result = filter_and_sort(&sample(), &PropertyFilter::default());
    assert_eq!(
        titles(&result),
        vec!["garden cottage", "Harbour Loft", "Old Mill", "City Studio"]
    );
}

#[test]
fn search_is_case_insensitive_across_title_city_and_address() {
    let by_title = PropertyFilter {
        search: Some("GARDEN".to_string()),
        ..Default::default()
    };
    assert_eq!(titles(&filter_and_sort(&sample(), &by_title)), vec!["garden cottage"]);

    let by_address = PropertyFilter {
        search: Some("pier".to_string()),
        ..Default::default()
    };
    assert_eq!(titles(&filter_and_sort(&sample(), &by_address)), vec!["Harbour Loft"]);

    let by_city = PropertyFilter {
        search: Some("trond".to_string()),
        ..Default::default()
    };
    assert_eq!(titles(&filter_and_sort(&sample(), &by_city)), vec!["Old Mill"]);
}

#[test]
fn empty_search_matches_everything() {
    let filter = PropertyFilter {
        search: Some(String::new()),
        ..Default::default()
    };
    assert_eq!(filter_and_sort(&sample(), &filter).len(), 4);
}

#[test]
fn search_whitespace_is_part_of_the_needle() {
    let leading = PropertyFilter {
        search: Some(" studio".to_string()),
        ..Default::default()
    };
    assert_eq!(titles(&filter_and_sort(&sample(), &leading)), vec!["City Studio"]);

    let spaces_only = PropertyFilter {
        search: Some("   ".to_string()),
        ..Default::default()
    };
    assert!(filter_and_sort(&sample(), &spaces_only).is_empty());
}

#[test]
fn rented_and_vacant_test_occupancy_not_listing_status() {
    let rented = PropertyFilter {
        status: StatusFilter::Rented,
        sort_by: SortField::Name,
        sort_order: SortOrder::Asc,
        ..Default::default()
    };
    assert_eq!(titles(&filter_and_sort(&sample(), &rented)), vec!["Harbour Loft", "Old Mill"]);

    let vacant = PropertyFilter {
        status: StatusFilter::Vacant,
        sort_by: SortField::Name,
        sort_order: SortOrder::Asc,
        ..Default::default()
    };
    assert_eq!(titles(&filter_and_sort(&sample(), &vacant)), vec!["City Studio", "garden cottage"]);
}

#[test]
fn listing_status_filters_use_listing_status() {
    let archived = PropertyFilter {
        status: StatusFilter::Archived,
        ..Default::default()
    };
    assert_eq!(titles(&filter_and_sort(&sample(), &archived)), vec!["Old Mill"]);
}

#[test]
fn health_filter_uses_shared_classifier() {
    // City Studio: published, vacant since 2024-04-01, 70 days before today.
    let critical = PropertyFilter {
        health: HealthFilter::Critical,
        ..Default::default()
    };
    assert_eq!(titles(&filter_and_sort(&sample(), &critical)), vec!["City Studio"]);

    let attention = PropertyFilter {
        health: HealthFilter::Attention,
        ..Default::default()
    };
    assert_eq!(titles(&filter_and_sort(&sample(), &attention)), vec!["garden cottage"]);
}

#[test]
fn city_filter_is_exact() {
    let filter = PropertyFilter {
        city: Some("Oslo".to_string()),
        sort_by: SortField::Rent,
        sort_order: SortOrder::Asc,
        ..Default::default()
    };
    assert_eq!(titles(&filter_and_sort(&sample(), &filter)), vec!["City Studio", "Harbour Loft"]);

    let partial = PropertyFilter {
        city: Some("Osl".to_string()),
        ..Default::default()
    };
    assert!(filter_and_sort(&sample(), &partial).is_empty());
}

#[test]
fn rent_range_is_inclusive() {
    let filter = PropertyFilter {
        min_rent: Some(900.0),
        max_rent: Some(1100.0),
        sort_by: SortField::Rent,
        sort_order: SortOrder::Asc,
        ..Default::default()
    };
    assert_eq!(titles(&filter_and_sort(&sample(), &filter)), vec!["garden cottage", "Old Mill"]);
}

#[test]
fn name_sort_ignores_case() {
    let filter = PropertyFilter {
        sort_by: SortField::Name,
        sort_order: SortOrder::Asc,
        ..Default::default()
    };
    assert_eq!(
        titles(&filter_and_sort(&sample(), &filter)),
        vec!["City Studio", "garden cottage", "Harbour Loft", "Old Mill"]
    );
}

#[test]
fn numeric_sorts_follow_counters() {
    let views = PropertyFilter {
        sort_by: SortField::Views,
        ..Default::default()
    };
    assert_eq!(
        titles(&filter_and_sort(&sample(), &views)),
        vec!["City Studio", "Harbour Loft", "garden cottage", "Old Mill"]
    );

    let inquiries = PropertyFilter {
        sort_by: SortField::Inquiries,
        sort_order: SortOrder::Asc,
        ..Default::default()
    };
    assert_eq!(
        titles(&filter_and_sort(&sample(), &inquiries)),
        vec!["Old Mill", "City Studio", "Harbour Loft", "garden cottage"]
    );
}

#[test]
fn descending_order_keeps_ties_in_input_order() {
    let listings = vec![
        listing(Property::new("a", "X", 500.0), false),
        listing(Property::new("b", "X", 500.0), false),
        listing(Property::new("c", "X", 800.0), false),
    ];
    let desc = PropertyFilter {
        sort_by: SortField::Rent,
        sort_order: SortOrder::Desc,
        ..Default::default()
    };
    assert_eq!(titles(&filter_and_sort(&listings, &desc)), vec!["c", "a", "b"]);
}

#[test]
fn filter_deserializes_from_partial_json() {
    let filter: PropertyFilter =
        serde_json::from_str(r#"{"status":"vacant","sort_by":"city","sort_order":"asc"}"#).unwrap();
    assert_eq!(filter.status, StatusFilter::Vacant);
    assert_eq!(filter.health, HealthFilter::All);
    assert_eq!(filter.sort_by, SortField::City);
    assert_eq!(filter.sort_order, SortOrder::Asc);
}

fn arb_status() -> impl Strategy<Value = ListingStatus> {
    prop_oneof![
        Just(ListingStatus::Published),
        Just(ListingStatus::Draft),
        Just(ListingStatus::Archived),
        Just(ListingStatus::Rented),
    ]
}

fn arb_listing() -> impl Strategy<Value = PropertyListing> {
    (
        "[a-zA-Z ]{0,12}",
        prop_oneof![Just("Oslo"), Just("Bergen"), Just("oslo")],
        0u32..5000,
        arb_status(),
        any::<bool>(),
        0u64..100,
        proptest::option::of(0i64..2_000_000_000),
    )
        .prop_map(|(title, city, rent, status, occupied, views, created)| {
            let mut property = Property::new(title, city, f64::from(rent))
                .with_status(status)
                .with_counters(views, views % 7);
            property.created_at = created.and_then(|secs| Utc.timestamp_opt(secs, 0).single());
            listing(property, occupied)
        })
}

fn arb_filter() -> impl Strategy<Value = PropertyFilter> {
    (
        proptest::option::of("[a-z]{0,3}"),
        prop_oneof![
            Just(StatusFilter::All),
            Just(StatusFilter::Published),
            Just(StatusFilter::Rented),
            Just(StatusFilter::Vacant),
        ],
        prop_oneof![
            Just(SortField::Created),
            Just(SortField::Rent),
            Just(SortField::Views),
            Just(SortField::Name),
            Just(SortField::City),
        ],
        prop_oneof![Just(SortOrder::Asc), Just(SortOrder::Desc)],
        proptest::option::of(0u32..2500),
    )
        .prop_map(|(search, status, sort_by, sort_order, min)| PropertyFilter {
            search,
            status,
            sort_by,
            sort_order,
            min_rent: min.map(f64::from),
            ..Default::default()
        })
}

proptest! {
    #[test]
    fn applying_a_filter_twice_gives_identical_output(
        listings in proptest::collection::vec(arb_listing(), 0..20),
        filter in arb_filter(),
    ) {
        let first = filter_and_sort(&listings, &filter);
        let second = filter_and_sort(&listings, &filter);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn filtered_output_is_a_subset_that_satisfies_the_filter(
        listings in proptest::collection::vec(arb_listing(), 0..20),
        filter in arb_filter(),
    ) {
        let result = filter_and_sort(&listings, &filter);
        prop_assert!(result.len() <= listings.len());
        for listing in &result {
            if let Some(min) = filter.min_rent {
                prop_assert!(listing.property.monthly_rent >= min);
            }
            if filter.status == StatusFilter::Vacant {
                prop_assert!(!listing.occupied);
            }
        }
    }
}
