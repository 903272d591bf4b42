//! Chat enrichment: optimistic sends and the skip path.

use mockall::predicate::eq;
use rstest::rstest;

use crate::core::api::{ApiError, LaunchApi, MockLaunchApi};
use crate::core::chat::{
    skip, ChatSession, DeliveryStatus, SkipOutcome, SEND_FAILURE_MESSAGE,
    SKIP_FALLBACK_MESSAGE,
};
use crate::core::models::{ChatMessage, Sender, SkipResponse};
use crate::tests::common::fixtures;

#[tokio::test]
async fn test_send_confirms_and_updates_progress() {
    let mut api = MockLaunchApi::new();
    api.expect_get_product()
        .with(eq("p1"))
        .returning(|id| {
            Ok(fixtures::product_with_chat(
                id,
                vec![ChatMessage::assistant("Who is Acme for?").with_id("m1")],
            ))
        });
    api.expect_send_message()
        .with(eq("p1"), eq("Indie founders"))
        .times(1)
        .returning(|_, _| Ok(fixtures::reply("Great, what makes it different?", Some("2/4"))));

    let product = api.get_product("p1").await.unwrap();
    let mut session = ChatSession::new(product.id.clone(), product.chat);
    assert_eq!(session.progress(), 33);

    let correlation = session.begin_send("  Indie founders ").unwrap();
    assert!(session.is_sending());
    assert_eq!(session.entries().last().unwrap().status, DeliveryStatus::Pending);

    let reply = api.send_message("p1", "Indie founders").await.unwrap();
    assert!(session.complete_send(correlation, reply));

    let entries = session.entries();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[1].status, DeliveryStatus::Confirmed);
    assert_eq!(entries[2].message.sender, Sender::Assistant);
    assert_eq!(session.progress(), 50);
    assert!(!session.is_sending());
}

#[tokio::test]
async fn test_failed_send_marks_message() {
    let mut api = MockLaunchApi::new();
    api.expect_send_message()
        .times(1)
        .returning(|_, _| Err(ApiError::status(500, None)));

    let mut session = ChatSession::new("p1", Vec::new());
    let correlation = session.begin_send("hello").unwrap();
    assert!(session.begin_send("again").is_none());

    assert!(api.send_message("p1", "hello").await.is_err());
    assert!(session.fail_send(correlation));

    let entries = session.entries();
    assert_eq!(entries[0].status, DeliveryStatus::Failed);
    assert_eq!(entries[1].message.message, SEND_FAILURE_MESSAGE);
    assert_eq!(session.progress(), 33);
}

#[tokio::test]
async fn test_skip_success_marks_product_completed() {
    let mut api = MockLaunchApi::new();
    api.expect_skip_chat().with(eq("p1")).times(1).returning(|id| {
        Ok(SkipResponse {
            message: "Chat skipped successfully".into(),
            product: Some(fixtures::product(id, "Acme")),
        })
    });

    match skip(&api, "p1").await {
        SkipOutcome::Skipped(Some(product)) => assert!(product.is_chat_completed()),
        other => panic!("expected skip, got {other:?}"),
    }
}

#[rstest]
#[case("Answer two more questions first")]
#[case("Chat skipped successfully!")]
#[case("chat skipped successfully")]
#[case("Chat skipped successfully ")]
#[case("")]
#[tokio::test]
async fn test_skip_unconfirmed_message_is_fallback_failure(#[case] message: &'static str) {
    let mut api = MockLaunchApi::new();
    api.expect_skip_chat().times(1).returning(move |_| {
        Ok(SkipResponse {
            message: message.into(),
            product: Some(fixtures::product("p1", "Acme")),
        })
    });

    assert_eq!(
        skip(&api, "p1").await,
        SkipOutcome::Failed(SKIP_FALLBACK_MESSAGE.into())
    );
}

#[tokio::test]
async fn test_skip_not_found() {
    let mut api = MockLaunchApi::new();
    api.expect_skip_chat()
        .times(1)
        .returning(|_| Err(ApiError::status(404, Some("Product not found".into()))));

    let outcome = skip(&api, "gone").await;
    let SkipOutcome::Failed(text) = outcome else {
        panic!("expected failure");
    };
    assert!(text.contains("couldn't find this product"));
}
