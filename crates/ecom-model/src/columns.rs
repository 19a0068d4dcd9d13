//! Column names used by the raw transaction export and by the cleaned table.
//!
//! Names match the source export exactly (case-sensitive).

/// Customer identifier; passthrough, excluded from model features.
pub const CUSTOMER_ID: &str = "Customer_ID";
/// Raw currency text such as `$1,234.50`.
pub const PURCHASE_AMOUNT: &str = "Purchase_Amount";
/// Raw purchase date text in `MM/DD/YYYY` or `MM-DD-YYYY` form.
pub const TIME_OF_PURCHASE: &str = "Time_of_Purchase";
pub const PURCHASE_CATEGORY: &str = "Purchase_Category";
pub const CUSTOMER_SATISFACTION: &str = "Customer_Satisfaction";
/// Binary target for the baseline classifier.
pub const DISCOUNT_USED: &str = "Discount_Used";

/// Normalized amount appended by the cleaner.
pub const PURCHASE_AMOUNT_CLEAN: &str = "Purchase_Amount_clean";
/// Normalized calendar date appended by the cleaner.
pub const PURCHASE_DATE: &str = "Purchase_Date";
pub const PURCHASE_YEAR: &str = "Purchase_Year";
pub const PURCHASE_MONTH: &str = "Purchase_Month";
pub const PURCHASE_DAY: &str = "Purchase_Day";
pub const PURCHASE_DAY_OF_WEEK: &str = "Purchase_DayOfWeek";

/// Derived date feature columns, in append order.
pub const DATE_FEATURE_COLUMNS: [&str; 4] = [
    PURCHASE_YEAR,
    PURCHASE_MONTH,
    PURCHASE_DAY,
    PURCHASE_DAY_OF_WEEK,
];

/// Every column the cleaner may append, in append order.
pub const CLEANED_COLUMNS: [&str; 6] = [
    PURCHASE_AMOUNT_CLEAN,
    PURCHASE_DATE,
    PURCHASE_YEAR,
    PURCHASE_MONTH,
    PURCHASE_DAY,
    PURCHASE_DAY_OF_WEEK,
];

/// Columns never used as classifier features.
pub const MODEL_EXCLUDED_COLUMNS: [&str; 4] =
    [DISCOUNT_USED, CUSTOMER_ID, PURCHASE_AMOUNT, TIME_OF_PURCHASE];
