//! Campaign wizard through to generation.

use mockall::predicate::eq;

use crate::core::api::{ApiError, LaunchApi, MockLaunchApi};
use crate::core::models::{Channel, GenerateCampaignRequest, LaunchType, Tone};
use crate::core::wizard::{
    CampaignStep, CampaignWizard, StepOutcome, CAMPAIGN_FAILURE_MESSAGE,
};
use crate::tests::common::fixtures;

fn run_to_submit(wizard: &mut CampaignWizard) -> GenerateCampaignRequest {
    wizard.toggle_channel(Channel::ProductHunt);
    wizard.toggle_channel(Channel::Reddit);
    assert_eq!(wizard.next(), StepOutcome::Advanced);

    wizard.select_launch_type(LaunchType::SoftLaunch);
    assert_eq!(wizard.next(), StepOutcome::Advanced);

    while wizard.step() != CampaignStep::Keywords {
        if wizard.step() == CampaignStep::Tone {
            wizard.select_tone(Tone::Witty);
        }
        assert_eq!(wizard.next(), StepOutcome::Advanced);
    }

    wizard.set_keywords("launch, productivity ,, saas");
    match wizard.next() {
        StepOutcome::Submit(request) => request,
        other => panic!("expected submit, got {other:?}"),
    }
}

#[tokio::test]
async fn test_generate_with_selected_options() {
    let mut wizard = CampaignWizard::new(Some("p1".into()));
    let request = run_to_submit(&mut wizard);

    assert_eq!(
        request.selected_channels,
        vec![Channel::ProductHunt, Channel::Reddit]
    );
    assert_eq!(request.launch_type, LaunchType::SoftLaunch);
    assert_eq!(request.tone, Some(Tone::Witty));
    assert_eq!(request.keywords, vec!["launch", "productivity", "saas"]);

    let mut api = MockLaunchApi::new();
    api.expect_generate_campaign()
        .with(eq("p1"), eq(request.clone()))
        .times(1)
        .returning(|_, _| Ok(fixtures::campaign("c9", "Soft launch")));

    let campaign = api.generate_campaign("p1", &request).await.unwrap();
    wizard.submit_succeeded();

    assert_eq!(campaign.id, "c9");
    assert!(!wizard.is_submitting());
}

#[tokio::test]
async fn test_generate_failure_shows_message() {
    let mut wizard = CampaignWizard::new(Some("p1".into()));
    let request = run_to_submit(&mut wizard);

    let mut api = MockLaunchApi::new();
    api.expect_generate_campaign()
        .times(1)
        .returning(|_, _| Err(ApiError::status(502, Some("upstream".into()))));

    assert!(api.generate_campaign("p1", &request).await.is_err());
    wizard.submit_failed();
    assert_eq!(wizard.error(), Some(CAMPAIGN_FAILURE_MESSAGE));
    assert_eq!(wizard.step(), CampaignStep::Keywords);
}

#[test]
fn test_missing_product_blocks_submit() {
    let mut wizard = CampaignWizard::new(None);
    wizard.toggle_channel(Channel::X);
    assert_eq!(wizard.next(), StepOutcome::Advanced);
    wizard.select_launch_type(LaunchType::BigBang);
    assert_eq!(wizard.next(), StepOutcome::Advanced);
    while wizard.step() != CampaignStep::Keywords {
        if wizard.step() == CampaignStep::Tone {
            wizard.select_tone(Tone::Casual);
        }
        assert_eq!(wizard.next(), StepOutcome::Advanced);
    }
    assert!(wizard.next().is_blocked());
    assert!(!wizard.is_submitting());
}
