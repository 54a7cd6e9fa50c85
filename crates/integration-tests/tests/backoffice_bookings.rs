//! Integration tests for the booking coordinator: quoting, reference
//! checks, and newest-first listing against the mock platform.

use std::sync::atomic::Ordering;

use chrono::NaiveDate;
use staybook_backoffice::coordinator::{BookingCoordinator, BookingForm, CoordinatorError};
use staybook_core::Price;
use staybook_integration_tests::MockStay;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

#[tokio::test]
async fn test_quote_multiplies_nightly_price_by_nights() {
    let mock = MockStay::new().spawn().await;
    let room = mock.seed_room("Loft", 120);
    let coordinator = BookingCoordinator::new(mock.client(300));

    let form = BookingForm {
        room_id: room.id.as_i64(),
        check_in: Some(date(2026, 9, 1)),
        check_out: Some(date(2026, 9, 4)),
        ..BookingForm::add()
    };

    let quote = coordinator
        .quote(&form)
        .await
        .expect("quote")
        .expect("priceable draft");
    assert_eq!(quote.room_name, "Loft");
    assert_eq!(quote.nights, 3);
    assert_eq!(quote.nightly_price, Price::from_dollars(120));
    assert_eq!(quote.total, Price::from_dollars(360));
}

#[tokio::test]
async fn test_quote_is_none_for_incomplete_or_inverted_drafts() {
    let mock = MockStay::new().spawn().await;
    let room = mock.seed_room("Loft", 120);
    let coordinator = BookingCoordinator::new(mock.client(300));

    // Missing check-out.
    let form = BookingForm {
        room_id: room.id.as_i64(),
        check_in: Some(date(2026, 9, 1)),
        ..BookingForm::add()
    };
    assert!(coordinator.quote(&form).await.expect("quote").is_none());

    // Check-out before check-in.
    let form = BookingForm {
        room_id: room.id.as_i64(),
        check_in: Some(date(2026, 9, 4)),
        check_out: Some(date(2026, 9, 1)),
        ..BookingForm::add()
    };
    assert!(coordinator.quote(&form).await.expect("quote").is_none());

    // Room id does not exist: draft is unpriceable, not an error.
    let form = BookingForm {
        room_id: 9999,
        check_in: Some(date(2026, 9, 1)),
        check_out: Some(date(2026, 9, 4)),
        ..BookingForm::add()
    };
    assert!(coordinator.quote(&form).await.expect("quote").is_none());
}

#[tokio::test]
async fn test_submit_rejects_dangling_references_without_creating() {
    let mock = MockStay::new().spawn().await;
    let user = mock.seed_user("Mai", "mai@example.com");
    let coordinator = BookingCoordinator::new(mock.client(300));

    let form = BookingForm {
        room_id: 9999,
        user_id: user.id.as_i64(),
        check_in: Some(date(2026, 9, 1)),
        check_out: Some(date(2026, 9, 4)),
        ..BookingForm::add()
    };

    let err = coordinator.submit(&form).await.expect_err("dangling room");
    let CoordinatorError::Invalid(errors) = err else {
        panic!("expected field errors, got {err:?}");
    };
    assert!(errors.iter().any(|e| e.field == "maPhong"));
    assert_eq!(mock.hits().creates.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_submit_creates_when_references_resolve() {
    let mock = MockStay::new().spawn().await;
    let room = mock.seed_room("Loft", 120);
    let user = mock.seed_user("Mai", "mai@example.com");
    let coordinator = BookingCoordinator::new(mock.client(300));

    let form = BookingForm {
        room_id: room.id.as_i64(),
        user_id: user.id.as_i64(),
        check_in: Some(date(2026, 9, 1)),
        check_out: Some(date(2026, 9, 4)),
        guests: 2,
        ..BookingForm::add()
    };

    let booking = coordinator.submit(&form).await.expect("create");
    assert!(booking.id.is_assigned());
    assert_eq!(booking.fields.room_id, room.id);
    assert_eq!(booking.fields.nights(), 3);
}

#[tokio::test]
async fn test_list_returns_newest_first() {
    let mock = MockStay::new().spawn().await;
    let room = mock.seed_room("Loft", 120);
    let user = mock.seed_user("Mai", "mai@example.com");
    let older = mock.seed_booking(room.id, user.id, date(2026, 9, 1), date(2026, 9, 3));
    let newer = mock.seed_booking(room.id, user.id, date(2026, 10, 1), date(2026, 10, 5));

    let coordinator = BookingCoordinator::new(mock.client(300));
    let listed = coordinator.list(1).await.expect("list");

    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].id, newer.id);
    assert_eq!(listed[1].id, older.id);
}

#[tokio::test]
async fn test_validation_messages_for_empty_form() {
    let mock = MockStay::new().spawn().await;
    let coordinator = BookingCoordinator::new(mock.client(300));

    let err = coordinator
        .submit(&BookingForm::add())
        .await
        .expect_err("empty form");
    let CoordinatorError::Invalid(errors) = err else {
        panic!("expected field errors, got {err:?}");
    };
    let messages: Vec<&str> = errors.iter().map(|e| e.message.as_str()).collect();
    assert!(messages.contains(&"Please enter a room ID."));
    assert!(messages.contains(&"Please enter a user ID."));
    assert!(messages.contains(&"Please select a check-in date."));
    assert!(messages.contains(&"Please select a check-out date."));
}
