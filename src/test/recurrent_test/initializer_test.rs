use super::*;

#[test]
fn test_uniform_sample_shape_and_bounds() {
    let mut initializer =
        MatrixInitializer::new(WeightDistribution::Uniform { scale: 0.05 }, Some(7)).unwrap();

    let weights = initializer.sample(4, 6);
    assert_eq!(weights.dim(), (4, 6));
    assert!(weights.iter().all(|w| w.abs() < 0.05));
    assert!(weights.iter().any(|w| *w != 0.0));
}

#[test]
fn test_gaussian_sample_shape() {
    let mut initializer = MatrixInitializer::new(
        WeightDistribution::Gaussian {
            mean: 0.0,
            sigma: 0.1,
        },
        Some(7),
    )
    .unwrap();

    let weights = initializer.sample(3, 5);
    assert_eq!(weights.dim(), (3, 5));
    assert!(weights.iter().all(|w| w.is_finite()));
}

#[test]
fn test_seeded_sampling_is_reproducible() {
    let mut first = uniform_initializer(42);
    let mut second = uniform_initializer(42);

    assert_eq!(first.sample(3, 3), second.sample(3, 3));
    assert_eq!(first.sample(2, 4), second.sample(2, 4));
}

#[test]
fn test_different_seeds_differ() {
    let mut first = uniform_initializer(1);
    let mut second = uniform_initializer(2);

    assert_ne!(first.sample(3, 3), second.sample(3, 3));
}

#[test]
fn test_parameter_validation() {
    assert!(matches!(
        MatrixInitializer::new(WeightDistribution::Uniform { scale: 0.0 }, None),
        Err(ModelError::InputValidationError(_))
    ));
    assert!(matches!(
        MatrixInitializer::new(WeightDistribution::Uniform { scale: -0.1 }, None),
        Err(ModelError::InputValidationError(_))
    ));
    assert!(matches!(
        MatrixInitializer::new(WeightDistribution::Uniform { scale: f64::NAN }, None),
        Err(ModelError::InputValidationError(_))
    ));
    assert!(matches!(
        MatrixInitializer::new(
            WeightDistribution::Gaussian {
                mean: f64::INFINITY,
                sigma: 0.1
            },
            None
        ),
        Err(ModelError::InputValidationError(_))
    ));
    assert!(matches!(
        MatrixInitializer::new(
            WeightDistribution::Gaussian {
                mean: 0.0,
                sigma: -1.0
            },
            None
        ),
        Err(ModelError::InputValidationError(_))
    ));
}

#[test]
fn test_getters() {
    let initializer =
        MatrixInitializer::new(WeightDistribution::Uniform { scale: 0.1 }, Some(42)).unwrap();

    assert_eq!(
        initializer.get_distribution(),
        WeightDistribution::Uniform { scale: 0.1 }
    );
    assert_eq!(initializer.get_random_state(), Some(42));
}
