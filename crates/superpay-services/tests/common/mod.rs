//! Shared fixtures: two companies, one user and one partner each

#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use std::sync::Arc;
use superpay_core::models::{BusinessPartner, Company, NewBusinessPartner, User};
use superpay_core::traits::BusinessPartnerRepository;
use superpay_core::TenantScope;
use superpay_db::MemoryStore;
use superpay_services::{FixedClock, InvoiceService, Repositories};

pub struct Fixture {
    pub store: Arc<MemoryStore>,
    pub repos: Repositories,
    pub now: DateTime<Utc>,
    pub alice: User,
    pub bob: User,
    pub alice_partner: BusinessPartner,
    pub bob_partner: BusinessPartner,
}

pub fn new_partner(name: &str) -> NewBusinessPartner {
    NewBusinessPartner {
        corporate_name: name.to_string(),
        representative: "Taro Yamada".to_string(),
        phone_number: "03-1234-5678".to_string(),
        postal_code: "100-0001".to_string(),
        address: "1-1 Chiyoda, Tokyo".to_string(),
    }
}

impl Fixture {
    pub async fn new() -> Self {
        let store = Arc::new(MemoryStore::new());

        let acme = store.insert_company(Company {
            corporate_name: "Acme KK".to_string(),
            ..Default::default()
        });
        let globex = store.insert_company(Company {
            corporate_name: "Globex KK".to_string(),
            ..Default::default()
        });

        let alice = store.insert_user(User {
            company_id: acme.id,
            full_name: "Alice".to_string(),
            email: "alice@acme.example".to_string(),
            ..Default::default()
        });
        let bob = store.insert_user(User {
            company_id: globex.id,
            full_name: "Bob".to_string(),
            email: "bob@globex.example".to_string(),
            ..Default::default()
        });

        let alice_partner = store
            .create(&TenantScope::for_user(&alice), &new_partner("Supplier A"))
            .await
            .unwrap();
        let bob_partner = store
            .create(&TenantScope::for_user(&bob), &new_partner("Supplier B"))
            .await
            .unwrap();

        Self {
            repos: Repositories::memory(store.clone()),
            store,
            now: Utc.with_ymd_and_hms(2026, 10, 1, 9, 0, 0).unwrap(),
            alice,
            bob,
            alice_partner,
            bob_partner,
        }
    }

    pub fn invoice_service(&self) -> InvoiceService {
        InvoiceService::with_clock(self.repos.clone(), Arc::new(FixedClock(self.now)))
    }
}
