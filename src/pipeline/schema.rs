//! Fixed survey schema: identifier, segment, and the ordered predictor list

/// Unique respondent identifier column
pub const ID_COLUMN: &str = "prolific_id";

/// Binary (0/1) customer segment, the dependent variable for every model
pub const SEGMENT_COLUMN: &str = "lmp_customer_segment";

/// Predictors in declaration order. Order drives report layout and the
/// stepwise tie-break.
pub const PREDICTOR_COLUMNS: [&str; 12] = [
    "park_run_walk",
    "park_biking",
    "park_skiing",
    "park_team_sports",
    "park_family_pets",
    "park_before_after_bar",
    "park_before_after_meal",
    "park_drink_coffee",
    "freq_buy_local_brands",
    "freq_drink_alcohol",
    "freq_drink_coffee_tea",
    "brand_loyalty",
];

/// Modeling columns (segment followed by predictors), as summarized and correlated
pub fn modeling_columns() -> Vec<String> {
    std::iter::once(SEGMENT_COLUMN)
        .chain(PREDICTOR_COLUMNS)
        .map(String::from)
        .collect()
}

/// Every column the input file must provide
pub fn required_columns() -> Vec<String> {
    let mut columns = vec![ID_COLUMN.to_string()];
    columns.extend(modeling_columns());
    columns
}

/// Predictor names as owned strings
pub fn predictor_columns() -> Vec<String> {
    PREDICTOR_COLUMNS.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modeling_columns_order() {
        let cols = modeling_columns();
        assert_eq!(cols.len(), 13);
        assert_eq!(cols[0], SEGMENT_COLUMN);
        assert_eq!(cols[1], "park_run_walk");
        assert_eq!(cols[12], "brand_loyalty");
    }

    #[test]
    fn test_required_columns_starts_with_id() {
        let cols = required_columns();
        assert_eq!(cols.len(), 14);
        assert_eq!(cols[0], ID_COLUMN);
    }
}
