//! Invoice service behaviour against the in-process store

mod common;

use chrono::Duration;
use common::Fixture;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use superpay_core::models::InvoiceStatus;
use superpay_core::{AppError, InvoiceFilter, Pagination};
use superpay_services::CreateInvoiceInput;

fn input(fx: &Fixture, partner_id: i64, amount: Decimal, days: i64) -> CreateInvoiceInput {
    CreateInvoiceInput {
        business_partner_id: partner_id,
        payment_amount: amount,
        payment_due_date: fx.now + Duration::days(days),
    }
}

#[tokio::test]
async fn test_create_invoice_prices_and_joins() {
    let fx = Fixture::new().await;
    let service = fx.invoice_service();

    let detail = service
        .create_invoice(fx.alice.id, input(&fx, fx.alice_partner.id, dec!(10000), 30))
        .await
        .unwrap();

    let invoice = &detail.invoice;
    assert_eq!(invoice.company_id, fx.alice.company_id);
    assert_eq!(invoice.business_partner_id, fx.alice_partner.id);
    assert_eq!(invoice.fee, dec!(400.00));
    assert_eq!(invoice.consumption_tax, dec!(40.00));
    assert_eq!(invoice.invoice_amount, dec!(10440.00));
    assert_eq!(invoice.fee_rate, dec!(0.04));
    assert_eq!(invoice.consumption_tax_rate, dec!(0.10));
    assert_eq!(invoice.status, InvoiceStatus::Unprocessed);
    assert_eq!(invoice.issue_date, fx.now);

    assert_eq!(detail.company.id, fx.alice.company_id);
    assert_eq!(detail.company.corporate_name, "Acme KK");
    assert_eq!(detail.business_partner.corporate_name, "Supplier A");
}

#[tokio::test]
async fn test_fee_and_tax_are_not_rounded() {
    let fx = Fixture::new().await;
    let service = fx.invoice_service();

    let detail = service
        .create_invoice(fx.alice.id, input(&fx, fx.alice_partner.id, dec!(1), 1))
        .await
        .unwrap();
    assert_eq!(detail.invoice.fee, dec!(0.04));
    assert_eq!(detail.invoice.consumption_tax, dec!(0.004));
    assert_eq!(detail.invoice.invoice_amount, dec!(1.04));

    let detail = service
        .create_invoice(fx.alice.id, input(&fx, fx.alice_partner.id, dec!(12345), 1))
        .await
        .unwrap();
    assert_eq!(detail.invoice.fee, dec!(493.8));
    assert_eq!(detail.invoice.consumption_tax, dec!(49.38));
    assert_eq!(detail.invoice.invoice_amount, dec!(12888.18));
}

#[tokio::test]
async fn test_amount_boundaries() {
    let fx = Fixture::new().await;
    let service = fx.invoice_service();

    for amount in [dec!(0), dec!(-1000)] {
        let result = service
            .create_invoice(fx.alice.id, input(&fx, fx.alice_partner.id, amount, 30))
            .await;
        assert!(matches!(result, Err(AppError::Validation(_))), "{amount}");
    }

    let result = service
        .create_invoice(fx.alice.id, input(&fx, fx.alice_partner.id, dec!(0.01), 30))
        .await;
    assert!(result.is_ok());
    assert_eq!(fx.store.invoice_count(), 1);

    let large = service
        .create_invoice(
            fx.alice.id,
            input(&fx, fx.alice_partner.id, dec!(20000000000000), 30),
        )
        .await
        .unwrap();
    assert_eq!(large.invoice.invoice_amount, dec!(20880000000000));
    assert_eq!(fx.store.invoice_count(), 2);

    let result = service
        .create_invoice(fx.alice.id, input(&fx, fx.alice_partner.id, Decimal::MAX, 30))
        .await;
    assert!(matches!(result, Err(AppError::Validation(_))));
    assert_eq!(fx.store.invoice_count(), 2);
}

#[tokio::test]
async fn test_due_date_boundaries() {
    let fx = Fixture::new().await;
    let service = fx.invoice_service();

    for due in [fx.now, fx.now - Duration::seconds(1), fx.now - Duration::days(30)] {
        let result = service
            .create_invoice(
                fx.alice.id,
                CreateInvoiceInput {
                    business_partner_id: fx.alice_partner.id,
                    payment_amount: dec!(1000),
                    payment_due_date: due,
                },
            )
            .await;
        assert!(matches!(result, Err(AppError::Validation(_))), "{due}");
    }

    let result = service
        .create_invoice(
            fx.alice.id,
            CreateInvoiceInput {
                business_partner_id: fx.alice_partner.id,
                payment_amount: dec!(1000),
                payment_due_date: fx.now + Duration::seconds(1),
            },
        )
        .await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_cross_tenant_partner_is_forbidden() {
    let fx = Fixture::new().await;
    let service = fx.invoice_service();

    let result = service
        .create_invoice(fx.alice.id, input(&fx, fx.bob_partner.id, dec!(5000), 30))
        .await;

    match result {
        Err(AppError::Forbidden(message)) => {
            assert_eq!(message, "business partner does not belong to your company")
        }
        other => panic!("expected Forbidden, got {:?}", other),
    }
    assert_eq!(fx.store.invoice_count(), 0);
}

#[tokio::test]
async fn test_unknown_partner_is_not_found() {
    let fx = Fixture::new().await;
    let service = fx.invoice_service();

    let result = service
        .create_invoice(fx.alice.id, input(&fx, 999, dec!(5000), 30))
        .await;
    assert!(matches!(result, Err(AppError::BusinessPartnerNotFound(_))));
}

#[tokio::test]
async fn test_deleted_user_is_unauthorized() {
    let fx = Fixture::new().await;
    let service = fx.invoice_service();
    assert!(fx.store.remove_user(fx.alice.id));

    let result = service
        .create_invoice(fx.alice.id, input(&fx, fx.alice_partner.id, dec!(5000), 30))
        .await;
    assert!(matches!(result, Err(AppError::Unauthorized(_))));

    let result = service
        .list_invoices(fx.alice.id, InvoiceFilter::default(), Pagination::default())
        .await;
    assert!(matches!(result, Err(AppError::Unauthorized(_))));
}

#[tokio::test]
async fn test_persistence_failure_surfaces() {
    let fx = Fixture::new().await;
    let service = fx.invoice_service();
    fx.store.set_fail_writes(true);

    let result = service
        .create_invoice(fx.alice.id, input(&fx, fx.alice_partner.id, dec!(5000), 30))
        .await;
    let err = result.unwrap_err();
    assert!(err.is_persistence());
    assert_eq!(fx.store.invoice_count(), 0);
}

#[tokio::test]
async fn test_cross_tenant_read_is_not_found() {
    let fx = Fixture::new().await;
    let service = fx.invoice_service();

    let bobs = service
        .create_invoice(fx.bob.id, input(&fx, fx.bob_partner.id, dec!(5000), 30))
        .await
        .unwrap();

    let result = service.get_invoice(fx.alice.id, bobs.invoice.id).await;
    assert!(matches!(result, Err(AppError::InvoiceNotFound(_))));

    let missing = service.get_invoice(fx.alice.id, 12345).await;
    assert!(matches!(missing, Err(AppError::InvoiceNotFound(_))));

    // Both render the same way
    let a = result.unwrap_err();
    let b = missing.unwrap_err();
    assert_eq!(a.status_code(), b.status_code());
    assert_eq!(a.error_code(), b.error_code());
}

#[tokio::test]
async fn test_repeated_reads_are_identical() {
    let fx = Fixture::new().await;
    let service = fx.invoice_service();

    let created = service
        .create_invoice(fx.alice.id, input(&fx, fx.alice_partner.id, dec!(98765.43), 10))
        .await
        .unwrap();

    let first = service.get_invoice(fx.alice.id, created.invoice.id).await.unwrap();
    let second = service.get_invoice(fx.alice.id, created.invoice.id).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first.invoice.fee, created.invoice.fee);
    assert_eq!(first.invoice.consumption_tax, created.invoice.consumption_tax);
    assert_eq!(first.invoice.invoice_amount, created.invoice.invoice_amount);
}

#[tokio::test]
async fn test_list_is_scoped_and_ordered() {
    let fx = Fixture::new().await;
    let service = fx.invoice_service();

    let mut ids = Vec::new();
    for days in [5, 20, 5, 10] {
        let detail = service
            .create_invoice(fx.alice.id, input(&fx, fx.alice_partner.id, dec!(1000), days))
            .await
            .unwrap();
        ids.push(detail.invoice.id);
    }
    service
        .create_invoice(fx.bob.id, input(&fx, fx.bob_partner.id, dec!(1000), 15))
        .await
        .unwrap();

    let listed: Vec<i64> = service
        .list_invoices(fx.alice.id, InvoiceFilter::default(), Pagination::default())
        .await
        .unwrap()
        .iter()
        .map(|d| d.invoice.id)
        .collect();

    // due +20, +10, then the two +5 invoices in insertion order
    assert_eq!(listed, vec![ids[1], ids[3], ids[0], ids[2]]);
}

#[tokio::test]
async fn test_pagination_defaults_and_clamp() {
    let fx = Fixture::new().await;
    let service = fx.invoice_service();

    for i in 0..105 {
        service
            .create_invoice(fx.alice.id, input(&fx, fx.alice_partner.id, dec!(100), 1 + i))
            .await
            .unwrap();
    }

    let page = service
        .list_invoices(fx.alice.id, InvoiceFilter::default(), Pagination::new(0, 0))
        .await
        .unwrap();
    assert_eq!(page.len(), 20);

    let page = service
        .list_invoices(fx.alice.id, InvoiceFilter::default(), Pagination::new(1, 500))
        .await
        .unwrap();
    assert_eq!(page.len(), 100);

    let page = service
        .list_invoices(fx.alice.id, InvoiceFilter::default(), Pagination::new(2, 100))
        .await
        .unwrap();
    assert_eq!(page.len(), 5);
}

#[tokio::test]
async fn test_filters_are_conjunctive() {
    let fx = Fixture::new().await;
    let service = fx.invoice_service();

    // (days until due, status): two paid and one unprocessed inside the
    // +3..=+10 window, one paid outside it
    let seeded = [
        (3, InvoiceStatus::Paid),
        (7, InvoiceStatus::Unprocessed),
        (10, InvoiceStatus::Paid),
        (20, InvoiceStatus::Paid),
    ];
    let mut ids = Vec::new();
    for (days, status) in seeded {
        let detail = service
            .create_invoice(fx.alice.id, input(&fx, fx.alice_partner.id, dec!(1000), days))
            .await
            .unwrap();
        assert!(fx.store.set_invoice_status(detail.invoice.id, status));
        ids.push(detail.invoice.id);
    }

    let in_range = InvoiceFilter {
        start_date: Some(fx.now + Duration::days(3)),
        end_date: Some(fx.now + Duration::days(10)),
        status: None,
    };
    let listed: Vec<i64> = service
        .list_invoices(fx.alice.id, in_range.clone(), Pagination::default())
        .await
        .unwrap()
        .iter()
        .map(|d| d.invoice.id)
        .collect();
    assert_eq!(listed, vec![ids[2], ids[1], ids[0]]);

    let paid_in_range = InvoiceFilter {
        status: Some("paid".to_string()),
        ..in_range.clone()
    };
    let listed = service
        .list_invoices(fx.alice.id, paid_in_range, Pagination::default())
        .await
        .unwrap();
    assert!(listed.iter().all(|d| d.invoice.status == InvoiceStatus::Paid));
    let listed: Vec<i64> = listed.iter().map(|d| d.invoice.id).collect();
    assert_eq!(listed, vec![ids[2], ids[0]]);

    let unprocessed_in_range = InvoiceFilter {
        status: Some("unprocessed".to_string()),
        ..in_range.clone()
    };
    let listed: Vec<i64> = service
        .list_invoices(fx.alice.id, unprocessed_in_range, Pagination::default())
        .await
        .unwrap()
        .iter()
        .map(|d| d.invoice.id)
        .collect();
    assert_eq!(listed, vec![ids[1]]);

    let processing_in_range = InvoiceFilter {
        status: Some("processing".to_string()),
        ..in_range
    };
    let listed = service
        .list_invoices(fx.alice.id, processing_in_range, Pagination::default())
        .await
        .unwrap();
    assert!(listed.is_empty());
}

#[tokio::test]
async fn test_huge_page_is_empty() {
    let fx = Fixture::new().await;
    let service = fx.invoice_service();

    for days in [1, 2, 3] {
        service
            .create_invoice(fx.alice.id, input(&fx, fx.alice_partner.id, dec!(100), days))
            .await
            .unwrap();
    }

    let page = service
        .list_invoices(
            fx.alice.id,
            InvoiceFilter::default(),
            Pagination::new(i64::MAX, 100),
        )
        .await
        .unwrap();
    assert!(page.is_empty());

    let page = service
        .list_invoices(
            fx.alice.id,
            InvoiceFilter::default(),
            Pagination::new(1, i64::MAX),
        )
        .await
        .unwrap();
    assert_eq!(page.len(), 3);
}

#[tokio::test]
async fn test_unknown_status_is_empty_not_error() {
    let fx = Fixture::new().await;
    let service = fx.invoice_service();

    service
        .create_invoice(fx.alice.id, input(&fx, fx.alice_partner.id, dec!(1000), 3))
        .await
        .unwrap();

    let filter = InvoiceFilter {
        status: Some("cancelled".to_string()),
        ..Default::default()
    };
    let listed = service
        .list_invoices(fx.alice.id, filter, Pagination::default())
        .await
        .unwrap();
    assert!(listed.is_empty());
}
