//! Product wizard through to the create call.

use mockall::predicate::eq;

use crate::core::api::{ApiError, LaunchApi, MockLaunchApi};
use crate::core::models::ProductInfo;
use crate::core::wizard::{ProductWizard, StepOutcome, PRODUCT_FAILURE_MESSAGE};
use crate::tests::common::fixtures;

fn filled_wizard() -> (ProductWizard, ProductInfo) {
    let mut wizard = ProductWizard::new();
    let answers = ["Acme", "Launch prep takes weeks", "Planner\nScheduler", "Indie founders"];
    let mut request = None;
    for answer in answers {
        wizard.set_answer(answer);
        match wizard.next() {
            StepOutcome::Advanced => {}
            StepOutcome::Submit(info) => request = Some(info),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }
    (wizard, request.expect("last step should submit"))
}

#[tokio::test]
async fn test_wizard_request_reaches_backend() {
    let (mut wizard, info) = filled_wizard();
    assert!(wizard.is_submitting());
    assert_eq!(info.brand_name, "Acme");
    assert_eq!(info.features, "Planner\nScheduler");

    let mut api = MockLaunchApi::new();
    api.expect_create_product()
        .with(eq(info.clone()))
        .times(1)
        .returning(|info| Ok(fixtures::product("p-new", &info.brand_name)));

    let product = api.create_product(&info).await.unwrap();
    wizard.submit_succeeded();

    assert_eq!(product.id, "p-new");
    assert!(!wizard.is_submitting());
    assert!(wizard.error().is_none());
}

#[tokio::test]
async fn test_failed_create_keeps_answers() {
    let (mut wizard, info) = filled_wizard();

    let mut api = MockLaunchApi::new();
    api.expect_create_product()
        .times(1)
        .returning(|_| Err(ApiError::status(500, None)));

    assert!(api.create_product(&info).await.is_err());
    wizard.submit_failed();

    assert_eq!(wizard.error(), Some(PRODUCT_FAILURE_MESSAGE));
    assert!(wizard.is_last_step());
    assert_eq!(wizard.current_answer(), "Indie founders");

    // Retrying submits the same answers again
    assert!(matches!(wizard.next(), StepOutcome::Submit(retry) if retry == info));
}

#[test]
fn test_second_submit_is_busy() {
    let (mut wizard, _) = filled_wizard();
    assert_eq!(wizard.next(), StepOutcome::Busy);
    assert!(!wizard.back());
}
