use serde::{Deserialize, Serialize};

use crate::columns::{PURCHASE_AMOUNT, TIME_OF_PURCHASE};

/// Which recognized source columns an input table carries.
///
/// Computed once from the header; each cleaning stage consults it instead of
/// probing the table again.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectedColumns {
    /// `Purchase_Amount` is present.
    pub amount: bool,
    /// `Time_of_Purchase` is present.
    pub purchase_time: bool,
}

impl DetectedColumns {
    /// Detects recognized columns from header names (exact match).
    pub fn from_names<'a, I>(names: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut detected = Self::default();
        for name in names {
            match name {
                PURCHASE_AMOUNT => detected.amount = true,
                TIME_OF_PURCHASE => detected.purchase_time = true,
                _ => {}
            }
        }
        detected
    }

    /// True when neither source column is present and the table passes through.
    pub fn is_passthrough(&self) -> bool {
        !self.amount && !self.purchase_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_both_columns() {
        let detected =
            DetectedColumns::from_names(["Customer_ID", "Purchase_Amount", "Time_of_Purchase"]);
        assert!(detected.amount);
        assert!(detected.purchase_time);
        assert!(!detected.is_passthrough());
    }

    #[test]
    fn matching_is_case_sensitive() {
        let detected = DetectedColumns::from_names(["purchase_amount", "TIME_OF_PURCHASE"]);
        assert_eq!(detected, DetectedColumns::default());
        assert!(detected.is_passthrough());
    }
}
