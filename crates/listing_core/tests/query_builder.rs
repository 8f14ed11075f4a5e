use listing_core::{
    CatalogQuery, Column, Direction, FeedScope, FilterState, ListingType, Predicate, QueryValue,
};
use pretty_assertions::assert_eq;

#[test]
fn unconstrained_filter_only_bounds_price() {
    let query = CatalogQuery::for_scope(&FeedScope::default());
    assert_eq!(
        query.predicates,
        vec![Predicate::Between {
            column: Column::Price,
            min: 0.0,
            max: 10_000_000.0,
        }]
    );
    assert_eq!(query.order.column, Column::CreatedAt);
    assert_eq!(query.order.direction, Direction::Ascending);
}

#[test]
fn whole_catalog_scope_has_no_predicates() {
    let query = CatalogQuery::for_scope(&FeedScope::whole_catalog());
    assert_eq!(query.predicates, Vec::new());
}

#[test]
fn every_constraint_becomes_a_predicate() {
    let filter = FilterState::default()
        .with_listing_type(ListingType::Sale)
        .with_property_type("house")
        .with_bedrooms(3)
        .with_bathrooms(2)
        .with_price(100_000.0, 400_000.0)
        .with_tags(["garden", "garage"]);
    let query = CatalogQuery::for_scope(&FeedScope::new(filter, Some("quiet street")));

    assert_eq!(
        query.predicates,
        vec![
            Predicate::Eq {
                column: Column::ListingType,
                value: QueryValue::Text("sale".to_string()),
            },
            Predicate::Eq {
                column: Column::PropertyType,
                value: QueryValue::Text("house".to_string()),
            },
            Predicate::Eq {
                column: Column::Bedrooms,
                value: QueryValue::Int(3),
            },
            Predicate::Eq {
                column: Column::Bathrooms,
                value: QueryValue::Int(2),
            },
            Predicate::Between {
                column: Column::Price,
                min: 100_000.0,
                max: 400_000.0,
            },
            Predicate::TextSearch {
                column: Column::SearchDocument,
                query: "quiet street".to_string(),
            },
            Predicate::ContainsAll {
                column: Column::Tags,
                values: vec!["garden".to_string(), "garage".to_string()],
            },
        ]
    );
}

#[test]
fn sentinel_fields_parsed_from_text_add_no_predicates() {
    let filter = FilterState {
        listing_type: "all".parse().unwrap(),
        property_type: "all".parse().unwrap(),
        bedrooms: "any".parse().unwrap(),
        bathrooms: "any".parse().unwrap(),
        ..FilterState::default()
    };
    let query = CatalogQuery::for_scope(&FeedScope::new(filter, Some("")));
    assert_eq!(query.predicates.len(), 1);
}
