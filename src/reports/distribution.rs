use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::reports::Distribution;
use crate::scheme::UserScheme;
use crate::types::{PaymentMode, Transaction, UserSchemeId};

/// bucket for transactions whose enrollment is not in the supplied list
pub const UNKNOWN_LABEL: &str = "Unknown";

/// number of transactions per payment mode, every mode listed
pub fn payment_mode_distribution(transactions: &[Transaction]) -> Distribution {
    let mut counts = [Decimal::ZERO; PaymentMode::ALL.len()];
    for t in transactions {
        if let Some(i) = PaymentMode::ALL.iter().position(|m| *m == t.payment_mode) {
            counts[i] += Decimal::ONE;
        }
    }

    Distribution {
        labels: PaymentMode::ALL.iter().map(|m| m.label().to_string()).collect(),
        values: counts.to_vec(),
    }
}

/// Amount collected per scheme name, labels in order of first appearance.
///
/// A transaction whose enrollment is missing from `user_schemes` is counted
/// under [`UNKNOWN_LABEL`].
pub fn amount_by_scheme_type(transactions: &[Transaction], user_schemes: &[UserScheme]) -> Distribution {
    let names: HashMap<UserSchemeId, &str> = user_schemes
        .iter()
        .map(|s| (s.id, s.scheme.name.as_str()))
        .collect();

    let mut distribution = Distribution::default();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for t in transactions {
        let name = match names.get(&t.scheme_id) {
            Some(name) => *name,
            None => {
                tracing::debug!(transaction_id = %t.id, scheme_id = %t.scheme_id, "transaction references an unknown enrollment");
                UNKNOWN_LABEL
            }
        };

        let i = *index.entry(name).or_insert_with(|| {
            distribution.labels.push(name.to_string());
            distribution.values.push(Decimal::ZERO);
            distribution.labels.len() - 1
        });
        distribution.values[i] += t.amount.as_decimal();
    }

    distribution
}
