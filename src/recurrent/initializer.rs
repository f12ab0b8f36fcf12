use super::Matrix;
use crate::ModelError;
use rand::SeedableRng;
use rand::distr::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand_distr::Normal;

/// Distribution from which weight matrix elements are drawn at cell construction.
///
/// # Variants
///
/// - `Uniform` - Each element is drawn from `U(-scale, scale)`
/// - `Gaussian` - Each element is drawn from `N(mean, sigma^2)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WeightDistribution {
    Uniform { scale: f64 },
    Gaussian { mean: f64, sigma: f64 },
}

/// Prebuilt sampler matching the configured distribution.
#[derive(Debug, Clone, Copy)]
enum Sampler {
    Uniform(Uniform<f64>),
    Gaussian(Normal<f64>),
}

/// Draws weight matrices from a configured distribution out of one seeded random source.
///
/// Every kernel of a cell is sampled through the same initializer instance, so a
/// fixed `random_state` makes the whole cell construction reproducible. Bias
/// vectors are not sampled; cells start them at zero.
///
/// # Fields
///
/// - `distribution` - The distribution weight elements are drawn from
/// - `random_state` - Optional seed controlling the random source
///
/// # Examples
/// ```rust
/// use rustyrnn::recurrent::{MatrixInitializer, WeightDistribution};
///
/// let mut initializer = MatrixInitializer::new(
///     WeightDistribution::Uniform { scale: 0.01 },
///     Some(42),
/// )
/// .unwrap();
///
/// let weights = initializer.sample(2, 3);
/// assert_eq!(weights.dim(), (2, 3));
/// assert!(weights.iter().all(|w| w.abs() < 0.01));
/// ```
#[derive(Debug, Clone)]
pub struct MatrixInitializer {
    distribution: WeightDistribution,
    random_state: Option<u64>,
    sampler: Sampler,
    rng: StdRng,
}

impl MatrixInitializer {
    /// Creates a new initializer for the given distribution.
    ///
    /// # Parameters
    ///
    /// - `distribution` - Distribution weight elements are drawn from
    /// - `random_state` - Optional seed; `None` seeds from the system random source
    ///
    /// # Returns
    ///
    /// - `Ok(Self)` - A ready initializer
    /// - `Err(ModelError::InputValidationError)` - If the distribution parameters are not finite, `scale` is not positive, or `sigma` is negative
    pub fn new(
        distribution: WeightDistribution,
        random_state: Option<u64>,
    ) -> Result<Self, ModelError> {
        let sampler = match distribution {
            WeightDistribution::Uniform { scale } => {
                if !scale.is_finite() || scale <= 0.0 {
                    return Err(ModelError::InputValidationError(format!(
                        "scale must be a positive finite number, got {}",
                        scale
                    )));
                }
                Sampler::Uniform(
                    Uniform::new(-scale, scale)
                        .map_err(|e| ModelError::InputValidationError(e.to_string()))?,
                )
            }
            WeightDistribution::Gaussian { mean, sigma } => {
                if !mean.is_finite() {
                    return Err(ModelError::InputValidationError(format!(
                        "mean must be a finite number, got {}",
                        mean
                    )));
                }
                if !sigma.is_finite() || sigma < 0.0 {
                    return Err(ModelError::InputValidationError(format!(
                        "sigma must be a non-negative finite number, got {}",
                        sigma
                    )));
                }
                Sampler::Gaussian(
                    Normal::new(mean, sigma)
                        .map_err(|e| ModelError::InputValidationError(e.to_string()))?,
                )
            }
        };

        let rng = match random_state {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };

        Ok(Self {
            distribution,
            random_state,
            sampler,
            rng,
        })
    }

    /// Samples a `rows x cols` matrix from the configured distribution.
    ///
    /// # Parameters
    ///
    /// - `rows` - Number of rows of the sampled matrix
    /// - `cols` - Number of columns of the sampled matrix
    ///
    /// # Returns
    ///
    /// - `Matrix` - Freshly sampled matrix of the requested shape
    pub fn sample(&mut self, rows: usize, cols: usize) -> Matrix {
        match self.sampler {
            Sampler::Uniform(uniform) => {
                Matrix::from_shape_fn((rows, cols), |_| uniform.sample(&mut self.rng))
            }
            Sampler::Gaussian(normal) => {
                Matrix::from_shape_fn((rows, cols), |_| normal.sample(&mut self.rng))
            }
        }
    }

    get_field!(get_distribution, distribution, WeightDistribution);

    get_field!(get_random_state, random_state, Option<u64>);
}
