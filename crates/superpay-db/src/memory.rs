//! In-process store
//!
//! Implements every repository trait over `parking_lot` guarded tables with
//! the same scoping, filter and ordering rules as the PostgreSQL
//! repositories. Identifiers are assigned from per-table sequences, so
//! insertion order and ID order agree.

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use superpay_core::{
    models::{
        BusinessPartner, Company, Invoice, InvoiceDetail, InvoiceStatus, NewBusinessPartner,
        NewInvoice, User,
    },
    query::listing_order,
    traits::{BusinessPartnerRepository, CompanyRepository, InvoiceRepository, UserRepository},
    AppError, AppResult, InvoiceQuery, TenantScope,
};
use tracing::{debug, instrument};

#[derive(Debug, Default)]
struct Tables {
    companies: Vec<Company>,
    users: Vec<User>,
    partners: Vec<BusinessPartner>,
    invoices: Vec<Invoice>,
    next_company_id: i64,
    next_user_id: i64,
    next_partner_id: i64,
    next_invoice_id: i64,
}

fn next_id(seq: &mut i64) -> i64 {
    *seq += 1;
    *seq
}

/// Shared in-memory implementation of all repositories
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
    fail_writes: RwLock<bool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a company; the stored record gets a fresh ID and timestamps
    pub fn insert_company(&self, company: Company) -> Company {
        let mut tables = self.tables.write();
        let now = Utc::now();
        let company = Company {
            id: next_id(&mut tables.next_company_id),
            created_at: now,
            updated_at: now,
            ..company
        };
        tables.companies.push(company.clone());
        company
    }

    /// Seed a user under an existing company
    pub fn insert_user(&self, user: User) -> User {
        let mut tables = self.tables.write();
        let now = Utc::now();
        let user = User {
            id: next_id(&mut tables.next_user_id),
            email: User::normalize_email(&user.email),
            created_at: now,
            updated_at: now,
            ..user
        };
        tables.users.push(user.clone());
        user
    }

    /// Delete a user, as if removed by another process
    pub fn remove_user(&self, id: i64) -> bool {
        let mut tables = self.tables.write();
        let before = tables.users.len();
        tables.users.retain(|u| u.id != id);
        tables.users.len() != before
    }

    /// Make subsequent writes fail with a persistence error
    pub fn set_fail_writes(&self, fail: bool) {
        *self.fail_writes.write() = fail;
    }

    /// Move an invoice to another status, as the payment pipeline would
    pub fn set_invoice_status(&self, id: i64, status: InvoiceStatus) -> bool {
        let mut tables = self.tables.write();
        match tables.invoices.iter_mut().find(|i| i.id == id) {
            Some(invoice) => {
                invoice.status = status;
                invoice.updated_at = Utc::now();
                true
            }
            None => false,
        }
    }

    /// Number of stored invoices across all tenants
    pub fn invoice_count(&self) -> usize {
        self.tables.read().invoices.len()
    }

    fn check_writable(&self) -> AppResult<()> {
        if *self.fail_writes.read() {
            return Err(AppError::Database("store rejected write".to_string()));
        }
        Ok(())
    }

    fn join(tables: &Tables, invoice: &Invoice) -> AppResult<InvoiceDetail> {
        let company = tables
            .companies
            .iter()
            .find(|c| c.id == invoice.company_id)
            .cloned()
            .ok_or_else(|| {
                AppError::Database(format!("invoice {} has no company", invoice.id))
            })?;
        let business_partner = tables
            .partners
            .iter()
            .find(|p| p.id == invoice.business_partner_id)
            .cloned()
            .ok_or_else(|| {
                AppError::Database(format!("invoice {} has no business partner", invoice.id))
            })?;

        Ok(InvoiceDetail {
            invoice: invoice.clone(),
            company,
            business_partner,
        })
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>> {
        Ok(self.tables.read().users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let email = User::normalize_email(email);
        Ok(self
            .tables
            .read()
            .users
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }
}

#[async_trait]
impl CompanyRepository for MemoryStore {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Company>> {
        Ok(self
            .tables
            .read()
            .companies
            .iter()
            .find(|c| c.id == id)
            .cloned())
    }
}

#[async_trait]
impl BusinessPartnerRepository for MemoryStore {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<BusinessPartner>> {
        Ok(self
            .tables
            .read()
            .partners
            .iter()
            .find(|p| p.id == id)
            .cloned())
    }

    async fn list_by_company(&self, scope: &TenantScope) -> AppResult<Vec<BusinessPartner>> {
        Ok(self
            .tables
            .read()
            .partners
            .iter()
            .filter(|p| scope.owns(p.company_id))
            .cloned()
            .collect())
    }

    #[instrument(skip(self, partner), fields(company_id = scope.company_id()))]
    async fn create(
        &self,
        scope: &TenantScope,
        partner: &NewBusinessPartner,
    ) -> AppResult<BusinessPartner> {
        self.check_writable()?;

        let mut tables = self.tables.write();
        let now = Utc::now();
        let partner = BusinessPartner {
            id: next_id(&mut tables.next_partner_id),
            company_id: scope.company_id(),
            corporate_name: partner.corporate_name.clone(),
            representative: partner.representative.clone(),
            phone_number: partner.phone_number.clone(),
            postal_code: partner.postal_code.clone(),
            address: partner.address.clone(),
            created_at: now,
            updated_at: now,
        };
        tables.partners.push(partner.clone());

        debug!(partner_id = partner.id, "Stored business partner");
        Ok(partner)
    }
}

#[async_trait]
impl InvoiceRepository for MemoryStore {
    #[instrument(skip(self, invoice), fields(company_id = scope.company_id()))]
    async fn create(&self, scope: &TenantScope, invoice: &NewInvoice) -> AppResult<Invoice> {
        self.check_writable()?;

        let mut tables = self.tables.write();
        let now = Utc::now();
        let invoice = Invoice {
            id: next_id(&mut tables.next_invoice_id),
            company_id: scope.company_id(),
            business_partner_id: invoice.business_partner_id,
            issue_date: invoice.issue_date,
            payment_amount: invoice.payment_amount,
            fee: invoice.fee,
            fee_rate: invoice.fee_rate,
            consumption_tax: invoice.consumption_tax,
            consumption_tax_rate: invoice.consumption_tax_rate,
            invoice_amount: invoice.invoice_amount,
            payment_due_date: invoice.payment_due_date,
            status: invoice.status,
            created_at: now,
            updated_at: now,
        };
        tables.invoices.push(invoice.clone());

        debug!(invoice_id = invoice.id, "Stored invoice");
        Ok(invoice)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<InvoiceDetail>> {
        let tables = self.tables.read();
        tables
            .invoices
            .iter()
            .find(|i| i.id == id)
            .map(|invoice| Self::join(&tables, invoice))
            .transpose()
    }

    async fn list(
        &self,
        scope: &TenantScope,
        query: &InvoiceQuery,
    ) -> AppResult<Vec<InvoiceDetail>> {
        let tables = self.tables.read();

        let mut matching: Vec<&Invoice> = tables
            .invoices
            .iter()
            .filter(|i| scope.owns(i.company_id) && query.filter.matches(i))
            .collect();
        matching.sort_by(|a, b| listing_order(a, b));

        // Offsets beyond the address space skip everything
        let offset = query
            .pagination
            .offset()
            .map_or(0, |o| usize::try_from(o).unwrap_or(usize::MAX));
        let limit = query
            .pagination
            .limit()
            .map_or(usize::MAX, |l| usize::try_from(l).unwrap_or(usize::MAX));

        matching
            .into_iter()
            .skip(offset)
            .take(limit)
            .map(|invoice| Self::join(&tables, invoice))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use rust_decimal_macros::dec;
    use superpay_core::money::InvoiceRates;
    use superpay_core::{InvoiceFilter, Pagination};

    fn seed(store: &MemoryStore) -> (TenantScope, BusinessPartner) {
        let company = store.insert_company(Company::default());
        let user = store.insert_user(User {
            company_id: company.id,
            email: "Owner@Example.com".to_string(),
            ..Default::default()
        });
        let scope = TenantScope::for_user(&user);
        let partner = BusinessPartner {
            company_id: company.id,
            ..Default::default()
        };
        let mut tables = store.tables.write();
        let partner = BusinessPartner {
            id: next_id(&mut tables.next_partner_id),
            ..partner
        };
        tables.partners.push(partner.clone());
        (scope, partner)
    }

    #[tokio::test]
    async fn test_email_lookup_is_normalized() {
        let store = MemoryStore::new();
        seed(&store);

        let user = UserRepository::find_by_email(&store, " owner@EXAMPLE.com ")
            .await
            .unwrap();
        assert!(user.is_some());
    }

    #[tokio::test]
    async fn test_list_pages_in_listing_order() {
        let store = MemoryStore::new();
        let (scope, partner) = seed(&store);
        let now = Utc::now();

        for days in [3, 9, 3, 6] {
            let invoice = NewInvoice::priced(
                partner.id,
                dec!(1000),
                now + Duration::days(days),
                now,
                InvoiceRates::standard(),
            )
            .unwrap();
            InvoiceRepository::create(&store, &scope, &invoice)
                .await
                .unwrap();
        }

        let first = InvoiceQuery::new(InvoiceFilter::default(), Pagination::new(1, 2));
        let ids: Vec<i64> = store
            .list(&scope, &first)
            .await
            .unwrap()
            .iter()
            .map(|d| d.invoice.id)
            .collect();
        assert_eq!(ids, vec![2, 4]);

        let second = InvoiceQuery::new(InvoiceFilter::default(), Pagination::new(2, 2));
        let ids: Vec<i64> = store
            .list(&scope, &second)
            .await
            .unwrap()
            .iter()
            .map(|d| d.invoice.id)
            .collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[tokio::test]
    async fn test_page_past_the_end_is_empty() {
        let store = MemoryStore::new();
        let (scope, partner) = seed(&store);
        let now = Utc::now();

        let invoice = NewInvoice::priced(
            partner.id,
            dec!(1000),
            now + Duration::days(1),
            now,
            InvoiceRates::standard(),
        )
        .unwrap();
        InvoiceRepository::create(&store, &scope, &invoice)
            .await
            .unwrap();

        let query = InvoiceQuery::new(
            InvoiceFilter::default(),
            Pagination::new(i64::MAX, 100).normalized(),
        );
        assert!(store.list(&scope, &query).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_status_update() {
        let store = MemoryStore::new();
        let (scope, partner) = seed(&store);
        let now = Utc::now();

        let invoice = NewInvoice::priced(
            partner.id,
            dec!(1000),
            now + Duration::days(1),
            now,
            InvoiceRates::standard(),
        )
        .unwrap();
        let stored = InvoiceRepository::create(&store, &scope, &invoice)
            .await
            .unwrap();

        assert!(store.set_invoice_status(stored.id, InvoiceStatus::Paid));
        assert!(!store.set_invoice_status(999, InvoiceStatus::Paid));

        let detail = InvoiceRepository::find_by_id(&store, stored.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(detail.invoice.status, InvoiceStatus::Paid);
    }

    #[tokio::test]
    async fn test_failed_write_stores_nothing() {
        let store = MemoryStore::new();
        let (scope, partner) = seed(&store);
        store.set_fail_writes(true);

        let now = Utc::now();
        let invoice = NewInvoice::priced(
            partner.id,
            dec!(1000),
            now + Duration::days(1),
            now,
            InvoiceRates::standard(),
        )
        .unwrap();
        let result = InvoiceRepository::create(&store, &scope, &invoice).await;

        assert!(matches!(result, Err(AppError::Database(_))));
        assert_eq!(store.invoice_count(), 0);
    }
}
