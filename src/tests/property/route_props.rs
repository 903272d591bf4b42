//! Property-based tests for route paths
//!
//! Tests invariants:
//! - Every route with concrete ids parses back from its own path
//! - The section follows the path prefix

use proptest::prelude::*;

use crate::core::routes::{Route, Section};

fn id() -> impl Strategy<Value = String> {
    "[0-9][0-9a-f]{0,11}"
}

fn route() -> impl Strategy<Value = Route> {
    prop_oneof![
        Just(Route::Home),
        Just(Route::Products),
        Just(Route::ProductForm),
        Just(Route::Campaigns),
        id().prop_map(|id| Route::CampaignDetail(Some(id))),
        id().prop_map(|id| Route::CampaignCreate(Some(id))),
        id().prop_map(|id| Route::Chat(Some(id))),
        (id(), id()).prop_map(|(c, p)| Route::Post {
            campaign_id: Some(c),
            post_id: Some(p),
        }),
    ]
}

proptest! {
    #[test]
    fn path_parses_back(route in route()) {
        prop_assert_eq!(Route::parse(&route.path()), Ok(route));
    }

    #[test]
    fn section_matches_prefix(route in route()) {
        let path = route.path();
        let expected = if path.starts_with("/campaigns") {
            Section::Campaigns
        } else if path.starts_with("/products") {
            Section::Products
        } else {
            Section::Home
        };
        prop_assert_eq!(route.section(), expected);
    }
}
