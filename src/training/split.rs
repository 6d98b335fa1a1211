use super::TrainError;
use crate::corpus::Dataset;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Seeded shuffle split. The held-out share is `ceil(n * test_fraction)`,
/// capped so at least one sample stays in the training half.
pub fn train_test_split(
    data: &Dataset,
    test_fraction: f64,
    seed: u64,
) -> Result<(Dataset, Dataset), TrainError> {
    if !(0.0..1.0).contains(&test_fraction) {
        return Err(TrainError::InvalidParameter(format!(
            "test_fraction must be in [0, 1), got {}",
            test_fraction
        )));
    }
    if data.is_empty() {
        return Err(TrainError::EmptyTrainingSet);
    }

    let n = data.len();
    let n_test = ((n as f64 * test_fraction).ceil() as usize).min(n - 1);
    let mut indices: Vec<usize> = (0..n).collect();
    indices.shuffle(&mut StdRng::seed_from_u64(seed));

    let (test_idx, train_idx) = indices.split_at(n_test);
    Ok((data.select(train_idx), data.select(test_idx)))
}
