//! Home dashboard: both lists load independently.

use crate::core::api::{ApiError, MockLaunchApi};
use crate::core::dashboard::{load_dashboard, Dashboard};
use crate::core::onboarding::{step_route, OnboardingStep};
use crate::core::routes::Route;
use crate::tests::common::fixtures;

#[tokio::test]
async fn test_both_lists_requested() {
    let mut api = MockLaunchApi::new();
    api.expect_get_products()
        .times(1)
        .returning(|| Ok(vec![fixtures::product("p1", "Acme")]));
    api.expect_get_campaigns().times(1).returning(|| Ok(vec![]));

    let (products, campaigns) = load_dashboard(&api).await;
    let dashboard = Dashboard {
        products: products.unwrap(),
        campaigns: campaigns.unwrap(),
    };

    let onboarding = dashboard.onboarding();
    assert_eq!(onboarding.step, OnboardingStep::PlanCampaign);
    assert!(onboarding.visible);
    assert_eq!(
        step_route(onboarding.step, dashboard.first_product_id()),
        Some(Route::CampaignCreate(Some("p1".into())))
    );
}

#[tokio::test]
async fn test_one_failure_keeps_other_list() {
    let mut api = MockLaunchApi::new();
    api.expect_get_products()
        .times(1)
        .returning(|| Err(ApiError::status(503, None)));
    api.expect_get_campaigns()
        .times(1)
        .returning(|| Ok(vec![fixtures::campaign("c1", "Spring")]));

    let (products, campaigns) = load_dashboard(&api).await;
    assert!(products.is_err());
    assert_eq!(campaigns.unwrap()[0].id, "c1");
}
