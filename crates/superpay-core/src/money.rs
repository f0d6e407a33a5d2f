//! Invoice pricing
//!
//! The fee is a percentage of the principal and the consumption tax is a
//! percentage of the fee. Intermediate amounts keep full precision; only the
//! final total is rounded to cents, half away from zero.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Decimal places of the billed total
pub const TOTAL_DECIMAL_PLACES: u32 = 2;

/// Service fee rate (4%)
pub const FEE_RATE: Decimal = Decimal::from_parts(4, 0, 0, false, 2);

/// Consumption tax rate applied to the fee (10%)
pub const CONSUMPTION_TAX_RATE: Decimal = Decimal::from_parts(10, 0, 0, false, 2);

/// Rates used to price an invoice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceRates {
    pub fee_rate: Decimal,
    pub consumption_tax_rate: Decimal,
}

impl InvoiceRates {
    /// The fixed production rates: 4% fee, 10% tax on the fee
    pub const fn standard() -> Self {
        Self {
            fee_rate: FEE_RATE,
            consumption_tax_rate: CONSUMPTION_TAX_RATE,
        }
    }
}

impl Default for InvoiceRates {
    fn default() -> Self {
        Self::standard()
    }
}

/// Derived amounts of an invoice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceBreakdown {
    pub fee: Decimal,
    pub consumption_tax: Decimal,
    pub total: Decimal,
}

/// Compute fee, tax and total for a principal
///
/// The caller is responsible for rejecting non-positive principals. Returns
/// `None` only when a derived amount exceeds the range of `Decimal`.
pub fn compute_invoice(
    payment_amount: Decimal,
    fee_rate: Decimal,
    consumption_tax_rate: Decimal,
) -> Option<InvoiceBreakdown> {
    let fee = payment_amount.checked_mul(fee_rate)?;
    let consumption_tax = fee.checked_mul(consumption_tax_rate)?;
    let total = round_total(payment_amount.checked_add(fee)?.checked_add(consumption_tax)?);

    Some(InvoiceBreakdown {
        fee,
        consumption_tax,
        total,
    })
}

/// Round an amount to cents, half away from zero
#[inline]
pub fn round_total(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(TOTAL_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}
