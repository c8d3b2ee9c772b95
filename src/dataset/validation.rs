use crate::dataset::Dataset;
use crate::ScrapeError;

/// Checks that the dataset holds at least `minimum` rows
///
/// A short table usually means the page layout changed and a different table
/// was picked up.
///
/// # Returns
///
/// * `Ok(count)` - The observed row count
/// * `Err(ScrapeError::RowCountTooLow)` - Fewer than `minimum` rows
pub fn validate_row_count(dataset: &Dataset, minimum: usize) -> Result<usize, ScrapeError> {
    let count = dataset.len();
    if count < minimum {
        let err = ScrapeError::RowCountTooLow { count, minimum };
        tracing::error!("Validation failed: {}", err);
        return Err(err);
    }

    tracing::info!("Validation passed: {} rows (minimum {})", count, minimum);
    Ok(count)
}
