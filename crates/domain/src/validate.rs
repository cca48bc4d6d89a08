//! Input rules shared by the workflows.

use crate::error::{DomainError, Result};

/// Rejects empty or whitespace-only identifiers.
pub(crate) fn non_blank_id(entity: &str, id: &str) -> Result<()> {
    if id.trim().is_empty() {
        return Err(DomainError::validation(format!("{entity} ID is empty")));
    }
    Ok(())
}

/// Rejects quantities below one.
///
/// A negative quantity fed to the conditional decrement would add stock.
pub(crate) fn positive_quantity(quantity: i32) -> Result<()> {
    if quantity < 1 {
        return Err(DomainError::validation(format!(
            "quantity must be greater than 0, got {quantity}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_ids_are_rejected() {
        assert!(non_blank_id("product", "").is_err());
        assert!(non_blank_id("product", " \t").is_err());
        assert!(non_blank_id("product", "prod-1").is_ok());
    }

    #[test]
    fn quantity_must_be_positive() {
        assert!(positive_quantity(0).is_err());
        assert!(positive_quantity(-4).is_err());
        assert!(positive_quantity(1).is_ok());
    }
}
