//! Standard vs itemized deduction.
//!
//! Two separate responsibilities live here and must not be merged:
//!
//! - [`select_deduction`] applies the caller's explicit election. It never
//!   switches to the larger amount on its own.
//! - [`recommend_deduction`] reports which mode would be larger, for display
//!   next to the election. Its output never feeds the computation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::calculations::common::round_half_up;
use crate::models::{DeductionMode, DeductionSelection, FilingStatus};

/// Resolves the deduction used for taxable income.
///
/// Itemized is used only when `use_itemized` is set and the itemized amount
/// is strictly greater than the standard deduction; a tie resolves to the
/// standard deduction. Caps such as the SALT limit are the caller's job, so
/// `itemized_amount` is taken as already capped.
pub fn select_deduction(
    filing_status: FilingStatus,
    use_itemized: bool,
    itemized_amount: Decimal,
    standard_deduction: Decimal,
) -> DeductionSelection {
    let standard_deduction = round_half_up(standard_deduction);
    let itemized_deduction = round_half_up(itemized_amount);

    let use_standard_deduction = !use_itemized || itemized_deduction <= standard_deduction;
    if use_itemized && use_standard_deduction {
        warn!(
            filing_status = %filing_status,
            itemized = %itemized_deduction,
            standard = %standard_deduction,
            "Itemized deduction elected but does not exceed the standard deduction; using standard"
        );
    }

    let selected_deduction = if use_standard_deduction {
        standard_deduction
    } else {
        itemized_deduction
    };

    debug!(
        filing_status = %filing_status,
        selected = %selected_deduction,
        use_standard_deduction,
        "Selected deduction"
    );

    DeductionSelection {
        standard_deduction,
        itemized_deduction,
        selected_deduction,
        use_standard_deduction,
    }
}

/// Display-only comparison of the two deduction modes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionRecommendation {
    pub recommended: DeductionMode,
    pub standard_deduction: Decimal,
    pub itemized_deduction: Decimal,
    /// How much larger the recommended deduction is than the other one.
    pub difference: Decimal,
}

/// Reports the larger of the two deductions; ties favour standard.
pub fn recommend_deduction(
    standard_deduction: Decimal,
    itemized_deduction: Decimal,
) -> DeductionRecommendation {
    let recommended = if itemized_deduction > standard_deduction {
        DeductionMode::Itemized
    } else {
        DeductionMode::Standard
    };

    DeductionRecommendation {
        recommended,
        standard_deduction,
        itemized_deduction,
        difference: round_half_up((itemized_deduction - standard_deduction).abs()),
    }
}
