use crate::ModelError;
use ndarray::{Array2, ArrayBase, Data, Ix1, Ix2};

/// Floor applied to exactly-zero probabilities inside the cross-entropy logarithm.
const CROSS_ENTROPY_FLOOR: f64 = 1e-10;

/// Applies the elementwise logistic function `1 / (1 + e^(-z))`.
///
/// This is the squashing nonlinearity used by every sigmoid gate; its output
/// lies strictly in (0, 1) for all finite inputs.
///
/// # Parameters
///
/// - `z` - Pre-activation values stored in a 2D array
///
/// # Returns
///
/// - `Array2<f64>` - Array of the same shape with the logistic function applied
///
/// # Examples
/// ```rust
/// use rustyrnn::math::logistic;
/// use ndarray::array;
///
/// let activated = logistic(&array![[0.0, 2.0]]);
/// assert!((activated[[0, 0]] - 0.5).abs() < 1e-12);
/// assert!(activated[[0, 1]] > 0.5 && activated[[0, 1]] < 1.0);
/// ```
#[inline]
pub fn logistic<S>(z: &ArrayBase<S, Ix2>) -> Array2<f64>
where
    S: Data<Elem = f64>,
{
    z.mapv(|v| 1.0 / (1.0 + (-v).exp()))
}

/// Applies the elementwise hyperbolic tangent.
///
/// Used by the candidate activations of both cell variants; its output lies
/// strictly in (-1, 1) for all finite inputs.
///
/// # Parameters
///
/// - `z` - Pre-activation values stored in a 2D array
///
/// # Returns
///
/// - `Array2<f64>` - Array of the same shape with tanh applied
///
/// # Examples
/// ```rust
/// use rustyrnn::math::tanh;
/// use ndarray::array;
///
/// let activated = tanh(&array![[0.0, 1.0]]);
/// assert!((activated[[0, 0]]).abs() < 1e-12);
/// assert!((activated[[0, 1]] - 0.7615941559557649).abs() < 1e-12);
/// ```
#[inline]
pub fn tanh<S>(z: &ArrayBase<S, Ix2>) -> Array2<f64>
where
    S: Data<Elem = f64>,
{
    z.mapv(f64::tanh)
}

/// Applies a row-wise softmax: each entry is exponentiated, then divided by its row's sum.
///
/// The exponentiation is applied directly, without subtracting the row maximum
/// first, so rows containing very large values can overflow to infinity. Inputs
/// are expected to stay in the range produced by the gated recurrence.
///
/// # Parameters
///
/// - `z` - Logit values stored in a 2D array, one distribution per row
///
/// # Returns
///
/// - `Array2<f64>` - Array of the same shape whose rows each sum to 1
///
/// # Examples
/// ```rust
/// use rustyrnn::math::softmax;
/// use ndarray::array;
///
/// let distribution = softmax(&array![[1.0, 2.0, 3.0]]);
/// assert!((distribution.sum() - 1.0).abs() < 1e-9);
/// assert!(distribution[[0, 2]] > distribution[[0, 0]]);
/// ```
pub fn softmax<S>(z: &ArrayBase<S, Ix2>) -> Array2<f64>
where
    S: Data<Elem = f64>,
{
    let mut exponentiated = z.mapv(f64::exp);
    for mut row in exponentiated.rows_mut() {
        let sum = row.sum();
        row.mapv_inplace(|v| v / sum);
    }
    exponentiated
}

/// Derivative of the logistic function expressed in terms of the activated value: `a * (1 - a)`.
///
/// # Parameters
///
/// - `activated` - Values already passed through `logistic`
///
/// # Returns
///
/// - `Array2<f64>` - Elementwise derivative of the same shape
#[inline]
pub fn logistic_derivative<S>(activated: &ArrayBase<S, Ix2>) -> Array2<f64>
where
    S: Data<Elem = f64>,
{
    activated.mapv(|a| a * (1.0 - a))
}

/// Derivative of tanh expressed in terms of the activated value: `1 - a^2`.
///
/// # Parameters
///
/// - `activated` - Values already passed through `tanh`
///
/// # Returns
///
/// - `Array2<f64>` - Elementwise derivative of the same shape
#[inline]
pub fn tanh_derivative<S>(activated: &ArrayBase<S, Ix2>) -> Array2<f64>
where
    S: Data<Elem = f64>,
{
    activated.mapv(|a| 1.0 - a * a)
}

/// Calculates the categorical cross-entropy `-sum(p * ln(q))` between two probability rows.
///
/// Entries of `q` that are exactly zero are floored to 1e-10 before the
/// logarithm so that a hard zero yields a large finite penalty instead of
/// infinity; small nonzero entries pass through untouched.
///
/// # Parameters
///
/// - `p` - Weighting distribution stored in a 1D array
/// - `q` - Distribution inside the logarithm, stored in a 1D array
///
/// # Returns
///
/// - `f64` - The cross-entropy value
///
/// # Examples
/// ```rust
/// use rustyrnn::math::categorical_cross_entropy;
/// use ndarray::array;
///
/// let loss = categorical_cross_entropy(&array![1.0, 0.0], &array![0.5, 0.5]);
/// assert!((loss - 0.6931471805599453).abs() < 1e-12);
/// ```
#[inline]
pub fn categorical_cross_entropy<S1, S2>(p: &ArrayBase<S1, Ix1>, q: &ArrayBase<S2, Ix1>) -> f64
where
    S1: Data<Elem = f64>,
    S2: Data<Elem = f64>,
{
    p.iter()
        .zip(q.iter())
        .map(|(p, q)| {
            let q = if *q == 0.0 { CROSS_ENTROPY_FLOOR } else { *q };
            -(p * q.ln())
        })
        .sum()
}

/// Calculates the categorical cross-entropy between two matrices, averaged over their rows.
///
/// # Parameters
///
/// - `p` - Weighting distributions, one per row
/// - `q` - Distributions inside the logarithm, one per row
///
/// # Returns
///
/// - `Ok(f64)` - The row-averaged cross-entropy
/// - `Err(ModelError::ShapeMismatch)` - If the two matrices disagree on shape
///
/// # Examples
/// ```rust
/// use rustyrnn::math::mean_categorical_cross_entropy;
/// use ndarray::array;
///
/// let loss = mean_categorical_cross_entropy(&array![[1.0, 0.0]], &array![[0.5, 0.5]]).unwrap();
/// assert!((loss - 0.6931471805599453).abs() < 1e-12);
///
/// let mismatched = mean_categorical_cross_entropy(&array![[1.0, 0.0]], &array![[0.5], [0.5]]);
/// assert!(mismatched.is_err());
/// ```
pub fn mean_categorical_cross_entropy<S1, S2>(
    p: &ArrayBase<S1, Ix2>,
    q: &ArrayBase<S2, Ix2>,
) -> Result<f64, ModelError>
where
    S1: Data<Elem = f64>,
    S2: Data<Elem = f64>,
{
    if p.dim() != q.dim() {
        return Err(ModelError::ShapeMismatch(format!(
            "prediction shape {:?} differs from label shape {:?}",
            p.dim(),
            q.dim()
        )));
    }

    let mut sum = 0.0;
    for (p_row, q_row) in p.rows().into_iter().zip(q.rows()) {
        sum += categorical_cross_entropy(&p_row, &q_row);
    }

    Ok(sum / p.nrows() as f64)
}
