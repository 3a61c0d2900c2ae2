//! Contract service tests against the in-memory adapters

use std::sync::Arc;

use chrono::NaiveDate;
use core_kernel::{ContractId, KeyedLocks};
use domain_contract::{
    CheckoutCompleted, ContractError, ContractService, ContractStatus, ContractStore,
    EngineSettings, NewContract, NewPayment, Notice, PaymentType,
};
use domain_insurance::PaymentPeriod;
use rust_decimal_macros::dec;
use test_support::{
    condition, date, usd, ClientProfileBuilder, InMemoryClientDirectory, InMemoryContractStore,
    InMemoryInsuranceCatalog, InsuranceBuilder, RecordingNotifier, StubRenderer,
};

struct Harness {
    store: Arc<InMemoryContractStore>,
    catalog: Arc<InMemoryInsuranceCatalog>,
    directory: Arc<InMemoryClientDirectory>,
    notifier: Arc<RecordingNotifier>,
    renderer: Arc<StubRenderer>,
    service: ContractService,
}

fn harness() -> Harness {
    let store = InMemoryContractStore::new();
    let catalog = InMemoryInsuranceCatalog::new();
    let directory = InMemoryClientDirectory::new();
    let notifier = RecordingNotifier::new();
    let renderer = StubRenderer::new();
    let service = ContractService::new(
        store.clone(),
        catalog.clone(),
        directory.clone(),
        notifier.clone(),
        renderer.clone(),
        EngineSettings::default(),
        Arc::new(KeyedLocks::new()),
    );
    Harness {
        store,
        catalog,
        directory,
        notifier,
        renderer,
        service,
    }
}

fn today() -> NaiveDate {
    date(2026, 8, 23)
}

/// Seeds the standard scenario: monthly product at 100 with coverage 100,
/// client carrying one +10% condition with documents already on file.
async fn seed_standard(h: &Harness) -> NewContract {
    let insurance = InsuranceBuilder::new()
        .with_payment_amount(usd(dec!(100)))
        .with_coverage(usd(dec!(100)))
        .with_payment_period(PaymentPeriod::Monthly)
        .build();
    let client = ClientProfileBuilder::new()
        .with_condition(condition("Smoker", Some(10)))
        .build();

    let request = NewContract {
        client_id: client.id,
        insurance_id: insurance.id,
        beneficiaries: Vec::new(),
        start_date: None,
    };
    h.catalog.insert(insurance).await;
    h.directory.insert(client).await;
    request
}

#[tokio::test]
async fn end_to_end_activation_scenario() {
    let h = harness();
    let request = seed_standard(&h).await;
    let service = &h.service;

    let contract = service.create(request).await.unwrap();
    assert_eq!(contract.total_payment_amount, usd(dec!(110)));
    assert_eq!(contract.status, ContractStatus::Pending);

    // premature approval fails and mutates nothing
    let err = service.approve_contract(contract.id, today()).await.unwrap_err();
    assert!(matches!(err, ContractError::Validation(_)));
    let reloaded = h.store.get(contract.id).await.unwrap();
    assert_eq!(reloaded.status, ContractStatus::Pending);
    assert!(!reloaded.steps.client_approval);

    service.approve_documents(contract.id).await.unwrap();
    service.approve_payment(contract.id).await.unwrap();
    let activated = service.approve_contract(contract.id, today()).await.unwrap();

    assert_eq!(activated.status, ContractStatus::Active);
    assert!(activated.active);
    assert_eq!(activated.start_date, Some(today()));

    let notices: Vec<Notice> = h
        .notifier
        .sent()
        .await
        .into_iter()
        .map(|sent| sent.notice)
        .collect();
    assert_eq!(notices, vec![Notice::PaymentApproved, Notice::ContractActivated]);
}

#[tokio::test]
async fn duplicate_policy_for_the_same_client_is_rejected() {
    let h = harness();
    let request = seed_standard(&h).await;

    h.service.create(request.clone()).await.unwrap();
    let err = h.service.create(request).await.unwrap_err();

    assert!(matches!(err, ContractError::Validation(_)));
}

#[tokio::test]
async fn missing_documents_trigger_a_reminder_before_the_save() {
    let h = harness();
    let insurance = InsuranceBuilder::new().build();
    let client = ClientProfileBuilder::new().without_documents().build();
    let request = NewContract {
        client_id: client.id,
        insurance_id: insurance.id,
        beneficiaries: Vec::new(),
        start_date: None,
    };
    h.catalog.insert(insurance).await;
    h.directory.insert(client).await;

    let contract = h.service.create(request).await.unwrap();
    assert!(!contract.steps.upload_documents);

    let sent = h.notifier.sent().await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].notice, Notice::UploadDocumentsReminder);
}

#[tokio::test]
async fn notification_failure_aborts_creation() {
    let h = harness();
    let insurance = InsuranceBuilder::new().build();
    let client = ClientProfileBuilder::new().without_documents().build();
    let request = NewContract {
        client_id: client.id,
        insurance_id: insurance.id,
        beneficiaries: Vec::new(),
        start_date: None,
    };
    h.catalog.insert(insurance).await;
    h.directory.insert(client).await;
    h.notifier.fail_next_sends();

    let err = h.service.create(request).await.unwrap_err();
    assert!(matches!(err, ContractError::Internal(_)));

    let all = h.service.find_pending().await.unwrap();
    assert!(all.is_empty(), "failed creation must not persist");
}

#[tokio::test]
async fn manual_payments_upsert_within_the_billing_cycle() {
    let h = harness();
    let request = seed_standard(&h).await;
    let service = &h.service;

    let contract = service.create(request).await.unwrap();
    service.approve_documents(contract.id).await.unwrap();
    service.approve_payment(contract.id).await.unwrap();
    let activated = service.approve_contract(contract.id, today()).await.unwrap();
    assert_eq!(activated.start_date, Some(today()));

    let first = service
        .record_payment(
            contract.id,
            NewPayment {
                payment_type: PaymentType::Cash,
                date: today(),
                proof: None,
            },
            today(),
        )
        .await
        .unwrap();
    // the billed amount is the contract's periodic amount, not the caller's
    assert_eq!(first.amount, usd(dec!(110)));

    let second = service
        .record_payment(
            contract.id,
            NewPayment {
                payment_type: PaymentType::Transfer,
                date: date(2026, 8, 25),
                proof: None,
            },
            date(2026, 8, 25),
        )
        .await
        .unwrap();
    assert_ne!(first.id, second.id);

    let detail = service.contract_detail(contract.id, today()).await.unwrap();
    assert_eq!(detail.contract.payments.len(), 1, "same cycle replaces");
    assert_eq!(detail.contract.payments[0].payment_type, PaymentType::Transfer);
}

#[tokio::test]
async fn checkout_completion_approves_payment_and_appends_a_card_payment() {
    let h = harness();
    let request = seed_standard(&h).await;
    let service = &h.service;

    let contract = service.create(request).await.unwrap();
    service
        .handle_checkout_completed(
            CheckoutCompleted {
                contract_id: contract.id,
                session_id: "cs_live_777".to_string(),
            },
            today(),
        )
        .await
        .unwrap();

    let stored = h.store.get(contract.id).await.unwrap();
    assert!(stored.steps.payment_approval);
    assert_eq!(stored.payments.len(), 1);
    assert_eq!(stored.payments[0].payment_type, PaymentType::Card);
    assert_eq!(
        stored.payments[0].reference_session_id.as_deref(),
        Some("cs_live_777")
    );
}

#[tokio::test]
async fn unknown_contract_is_not_found() {
    let h = harness();
    let err = h
        .service
        .approve_documents(ContractId::new())
        .await
        .unwrap_err();
    assert!(matches!(err, ContractError::NotFound { .. }));
}

#[tokio::test]
async fn rendering_failure_surfaces_as_internal_error() {
    let h = harness();
    let request = seed_standard(&h).await;
    let contract = h.service.create(request).await.unwrap();

    h.renderer.fail_next_renders();
    let err = h
        .service
        .contract_detail(contract.id, today())
        .await
        .unwrap_err();
    assert!(matches!(err, ContractError::Internal(_)));
}

#[tokio::test]
async fn listings_render_only_fully_gated_contracts() {
    let h = harness();
    let request = seed_standard(&h).await;
    let service = &h.service;

    let contract = service.create(request).await.unwrap();

    let summaries = service.list_contracts().await.unwrap();
    assert!(summaries[0].document.is_none());

    service.approve_documents(contract.id).await.unwrap();
    service.approve_payment(contract.id).await.unwrap();

    let summaries = service.list_contracts().await.unwrap();
    assert!(summaries[0].document.is_some());
}

#[tokio::test]
async fn classification_queries_follow_the_contract_dates() {
    let h = harness();
    let request = seed_standard(&h).await;
    let service = &h.service;

    let contract = service.create(request).await.unwrap();
    service.approve_documents(contract.id).await.unwrap();
    service.approve_payment(contract.id).await.unwrap();
    service
        .approve_contract(contract.id, date(2026, 8, 1))
        .await
        .unwrap();

    // cycle ends 2026-09-01
    let pending = service.find_pending().await.unwrap();
    assert!(pending.is_empty());

    let expiring = service.find_expiring_soon(date(2026, 8, 20)).await.unwrap();
    assert_eq!(expiring.len(), 1);

    let expired = service.find_expired(date(2026, 9, 2)).await.unwrap();
    assert_eq!(expired.len(), 1);

    let unpaid = service.find_unpaid(date(2026, 9, 2)).await.unwrap();
    assert_eq!(unpaid.len(), 1);

    let unpaid = service.find_unpaid(date(2026, 8, 20)).await.unwrap();
    assert!(unpaid.is_empty());
}
