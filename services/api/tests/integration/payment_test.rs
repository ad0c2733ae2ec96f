use serde_json::json;

use veranda_api::domain::currency::Currency;
use veranda_api::domain::repository::DocumentStore;
use veranda_api::domain::types::{BOOKINGS_COLLECTION, IntentStatus};
use veranda_api::error::ApiError;
use veranda_api::infra::memory::MemoryDocumentStore;
use veranda_api::usecase::payment::{
    ConfirmPaymentInput, ConfirmPaymentUseCase, CreatePaymentIntentInput,
    CreatePaymentIntentUseCase,
};

use crate::helpers::{MockPaymentGateway, test_intent};

fn create_input(amount: f64) -> CreatePaymentIntentInput {
    CreatePaymentIntentInput {
        amount,
        currency: None,
        customer_email: Some("guest@example.com".to_owned()),
        metadata: vec![("bookingId".to_owned(), "b-1".to_owned())],
        country: None,
    }
}

#[tokio::test]
async fn should_reject_non_positive_amounts() {
    let uc = CreatePaymentIntentUseCase {
        payments: MockPaymentGateway::new(),
    };
    for amount in [0.0, -10.0, f64::NAN] {
        let result = uc.execute(create_input(amount)).await;
        assert!(
            matches!(result, Err(ApiError::InvalidPayment(_))),
            "amount {amount} should be rejected"
        );
    }
}

#[tokio::test]
async fn country_overrides_the_requested_currency() {
    let gateway = MockPaymentGateway::new();
    let uc = CreatePaymentIntentUseCase {
        payments: gateway.clone(),
    };

    let out = uc
        .execute(CreatePaymentIntentInput {
            currency: Some("usd".to_owned()),
            country: Some("India".to_owned()),
            ..create_input(250.5)
        })
        .await
        .unwrap();

    let requests = gateway.created_requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].currency, Currency::Inr);
    assert_eq!(requests[0].amount_minor, 25050);
    assert_eq!(out.currency, "INR");
    assert_eq!(out.amount, 250.5);
    assert_eq!(out.display_amount, 250.5);
    assert_eq!(out.payment_intent_id, "pi_test_1");
    assert_eq!(out.client_secret.as_deref(), Some("pi_test_1_secret"));
}

#[tokio::test]
async fn defaults_to_inr_for_the_default_country() {
    let gateway = MockPaymentGateway::new();
    let uc = CreatePaymentIntentUseCase {
        payments: gateway.clone(),
    };
    uc.execute(create_input(100.0)).await.unwrap();
    assert_eq!(gateway.created_requests()[0].currency, Currency::Inr);
}

#[tokio::test]
async fn unsupported_currencies_name_the_supported_set() {
    let uc = CreatePaymentIntentUseCase {
        payments: MockPaymentGateway::new(),
    };
    let result = uc
        .execute(CreatePaymentIntentInput {
            currency: Some("jpy".to_owned()),
            country: Some("Japan".to_owned()),
            ..create_input(100.0)
        })
        .await;
    match result {
        Err(ApiError::InvalidPayment(msg)) => {
            assert!(msg.contains("jpy is not supported"), "got: {msg}");
            assert!(msg.contains("inr, gbp, usd, eur, aud, cad"), "got: {msg}");
        }
        other => panic!("expected InvalidPayment, got {other:?}"),
    }
}

#[tokio::test]
async fn enforces_processor_minimums() {
    let uc = CreatePaymentIntentUseCase {
        payments: MockPaymentGateway::new(),
    };
    let result = uc
        .execute(CreatePaymentIntentInput {
            currency: Some("usd".to_owned()),
            country: Some("United States".to_owned()),
            ..create_input(0.25)
        })
        .await;
    match result {
        Err(ApiError::InvalidPayment(msg)) => {
            assert_eq!(msg, "Minimum amount for USD is 0.5");
        }
        other => panic!("expected InvalidPayment, got {other:?}"),
    }
}

#[tokio::test]
async fn metadata_is_enriched_before_reaching_the_processor() {
    let gateway = MockPaymentGateway::new();
    let uc = CreatePaymentIntentUseCase {
        payments: gateway.clone(),
    };
    uc.execute(create_input(99.0)).await.unwrap();

    let request = &gateway.created_requests()[0];
    let keys: Vec<&str> = request.metadata.iter().map(|(k, _)| k.as_str()).collect();
    assert!(keys.contains(&"bookingId"));
    assert!(keys.contains(&"customerEmail"));
    assert!(keys.contains(&"country"));
    assert!(keys.contains(&"originalAmount"));
    assert!(keys.contains(&"timestamp"));

    let email = request
        .metadata
        .iter()
        .find(|(k, _)| k == "customerEmail")
        .map(|(_, v)| v.as_str());
    assert_eq!(email, Some("guest@example.com"));
}

#[tokio::test]
async fn confirm_requires_an_intent_id() {
    let uc = ConfirmPaymentUseCase {
        payments: MockPaymentGateway::new(),
        documents: MemoryDocumentStore::new(),
    };
    let result = uc
        .execute(ConfirmPaymentInput {
            payment_intent_id: String::new(),
            booking_data: None,
        })
        .await;
    assert!(matches!(result, Err(ApiError::InvalidPayment(_))));
}

#[tokio::test]
async fn confirm_persists_the_booking_on_success() {
    let documents = MemoryDocumentStore::new();
    let gateway =
        MockPaymentGateway::new().with_intent(test_intent("pi_ok", IntentStatus::Succeeded));
    let uc = ConfirmPaymentUseCase {
        payments: gateway,
        documents: documents.clone(),
    };

    let out = uc
        .execute(ConfirmPaymentInput {
            payment_intent_id: "pi_ok".to_owned(),
            booking_data: Some(json!({
                "userName": "Asha",
                "category": "resorts",
                "numberOfRooms": 2,
            })),
        })
        .await
        .unwrap();

    assert!(out.success);
    assert_eq!(out.booking_status, "confirmed");
    assert_eq!(out.message, "Payment successful");

    let bookings = documents.list(BOOKINGS_COLLECTION).await.unwrap();
    assert_eq!(bookings.len(), 1);
    let booking = &bookings[0];
    assert_eq!(booking["userName"], "Asha");
    assert_eq!(booking["paymentIntentId"], "pi_ok");
    assert_eq!(booking["paymentStatus"], "succeeded");
    assert_eq!(booking["paymentAmount"], 250.0);
    assert_eq!(booking["paymentCurrency"], "inr");
    assert_eq!(booking["status"], "confirmed");
}

#[tokio::test]
async fn confirm_without_booking_data_writes_nothing() {
    let documents = MemoryDocumentStore::new();
    let gateway =
        MockPaymentGateway::new().with_intent(test_intent("pi_ok", IntentStatus::Succeeded));
    let uc = ConfirmPaymentUseCase {
        payments: gateway,
        documents: documents.clone(),
    };

    let out = uc
        .execute(ConfirmPaymentInput {
            payment_intent_id: "pi_ok".to_owned(),
            booking_data: None,
        })
        .await
        .unwrap();
    assert!(out.success);
    assert_eq!(documents.count(BOOKINGS_COLLECTION), 0);
}

#[tokio::test]
async fn confirm_maps_non_terminal_statuses() {
    for (status, expected_status, expected_success) in [
        (IntentStatus::Processing, "processing", false),
        (IntentStatus::RequiresAction, "requires_action", false),
        (IntentStatus::Canceled, "failed", false),
        (
            IntentStatus::Other("requires_capture".to_owned()),
            "pending",
            false,
        ),
    ] {
        let documents = MemoryDocumentStore::new();
        let gateway = MockPaymentGateway::new().with_intent(test_intent("pi_x", status));
        let uc = ConfirmPaymentUseCase {
            payments: gateway,
            documents: documents.clone(),
        };
        let out = uc
            .execute(ConfirmPaymentInput {
                payment_intent_id: "pi_x".to_owned(),
                booking_data: Some(json!({ "userName": "Asha" })),
            })
            .await
            .unwrap();
        assert_eq!(out.booking_status, expected_status);
        assert_eq!(out.success, expected_success);
        assert_eq!(
            documents.count(BOOKINGS_COLLECTION),
            0,
            "no booking for status {expected_status}"
        );
    }
}

#[tokio::test]
async fn confirm_surfaces_unknown_intents_as_upstream_errors() {
    let uc = ConfirmPaymentUseCase {
        payments: MockPaymentGateway::new(),
        documents: MemoryDocumentStore::new(),
    };
    let result = uc
        .execute(ConfirmPaymentInput {
            payment_intent_id: "pi_missing".to_owned(),
            booking_data: None,
        })
        .await;
    assert!(matches!(result, Err(ApiError::Upstream(_))));
}
