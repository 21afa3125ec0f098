//! Balance due or refund after payments.
//!
//! Only income-tax withholding and estimated payments offset a liability.
//! Social Security and Medicare withholding are payroll taxes and are carried
//! on the result for display only. Federal and state balances are reconciled
//! independently and never netted against each other here.

use rust_decimal::Decimal;
use tracing::debug;

use crate::calculations::common::round_half_up;
use crate::models::{FinalStatus, Reconciliation};
use crate::state::StateTaxResult;

/// Reconciles `total_tax_liability` against income-tax payments.
pub fn reconcile(
    total_tax_liability: Decimal,
    tax_withheld: Decimal,
    estimated_tax_payments: Decimal,
) -> Reconciliation {
    let total_payments = round_half_up(tax_withheld + estimated_tax_payments);
    let balance = round_half_up(total_tax_liability - total_payments);

    let (final_status, refund_amount, balance_due) = if balance < Decimal::ZERO {
        (FinalStatus::Refund, -balance, Decimal::ZERO)
    } else if balance > Decimal::ZERO {
        (FinalStatus::Owed, Decimal::ZERO, balance)
    } else {
        (FinalStatus::Even, Decimal::ZERO, Decimal::ZERO)
    };

    debug!(
        balance = %balance,
        final_status = ?final_status,
        "Reconciled payments"
    );

    Reconciliation {
        total_tax_liability,
        tax_withheld,
        estimated_tax_payments,
        total_payments,
        balance,
        final_status,
        refund_amount,
        balance_due,
    }
}

/// Reconciles state withholding against a state result.
pub fn reconcile_state(
    state: &StateTaxResult,
    state_tax_withheld: Decimal,
) -> Reconciliation {
    reconcile(state.state_tax, state_tax_withheld, Decimal::ZERO)
}
