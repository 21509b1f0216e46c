//! Cart Data

use rustc_hash::FxHashSet;

use crate::{domain::carts::records::CartLine, validation::ValidationError};

/// Check a replacement line list: every quantity positive, no product twice.
///
/// # Errors
///
/// Returns a [`ValidationError`] on the first offending line.
pub fn validate_lines(lines: &[CartLine]) -> Result<(), ValidationError> {
    let mut seen = FxHashSet::default();

    for line in lines {
        if line.quantity == 0 {
            return Err(ValidationError::new("quantity", "must be at least 1"));
        }

        if !seen.insert(line.product_uuid) {
            return Err(ValidationError::new("products", "must not repeat a product"));
        }
    }

    Ok(())
}
