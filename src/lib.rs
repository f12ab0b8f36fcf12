/// Error types that can occur during model operations
///
/// # Variants
///
/// - `InputValidationError` - indicates the input data or configuration provided does not meet the expected format, range, or validation rules
/// - `ShapeMismatch` - indicates that two matrices disagree on a dimension they must share; aborts the operation that detected it
/// - `ProcessingError` - indicates that there is something wrong while processing
#[derive(Debug, Clone, PartialEq)]
pub enum ModelError {
    InputValidationError(String),
    ShapeMismatch(String),
    ProcessingError(String),
}

impl std::fmt::Display for ModelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelError::InputValidationError(msg) => write!(f, "Input validation error: {}", msg),
            ModelError::ShapeMismatch(msg) => write!(f, "Shape mismatch: {}", msg),
            ModelError::ProcessingError(msg) => write!(f, "Processing error: {}", msg),
        }
    }
}

/// Implements the standard error trait for ModelError
impl std::error::Error for ModelError {}

/// A macro that generates a getter method for any field.
///
/// This macro creates a public getter method that returns the value or reference
/// of the specified field. The generated method includes appropriate documentation
/// describing the field being accessed.
///
/// # Parameters
///
/// - `$method_name` - The name of the getter method (e.g., get_learning_rate)
/// - `$field_name` - The name of the field to access (e.g., learning_rate)
/// - `$return_type` - The return type of the getter method
///
/// # Generated Method
///
/// The macro generates a method that returns the field value,
/// with documentation that describes what field is being accessed.
macro_rules! get_field {
    ($method_name:ident, $field_name:ident, $return_type:ty) => {
        #[doc = concat!("Gets the `", stringify!($field_name), "` field.\n\n")]
        #[doc = "# Returns\n\n"]
        #[doc = concat!("* `", stringify!($return_type), "` - The value of the `", stringify!($field_name), "` field")]
        pub fn $method_name(&self) -> $return_type {
            self.$field_name
        }
    };
}

/// Module `math` contains the mathematical building blocks shared by the recurrent cells.
///
/// This module provides the elementwise nonlinearities applied inside every gate,
/// their derivatives expressed in terms of the already-activated values (the form the
/// backward pass consumes), and the cross-entropy loss used to score next-symbol
/// predictions.
///
/// # Core Functions
///
/// ## Nonlinearities
/// - `logistic` - Elementwise logistic function, the squashing used by every sigmoid gate
/// - `tanh` - Elementwise hyperbolic tangent, used by candidate activations
/// - `softmax` - Row-wise softmax used by the decode step to form a distribution over symbols
///
/// ## Derivatives
/// - `logistic_derivative` - `a * (1 - a)` computed from an activated value
/// - `tanh_derivative` - `1 - a^2` computed from an activated value
///
/// ## Loss Functions
/// - `categorical_cross_entropy` - Negative log-likelihood of one distribution against another
/// - `mean_categorical_cross_entropy` - Row-averaged categorical cross-entropy
///
/// # Example
/// ```rust
/// use rustyrnn::math::{logistic, softmax, tanh_derivative};
/// use ndarray::array;
///
/// let gate = logistic(&array![[0.0, 2.0], [-2.0, 0.5]]);
/// assert!(gate.iter().all(|v| *v > 0.0 && *v < 1.0));
///
/// let distribution = softmax(&array![[1.0, 2.0, 3.0]]);
/// assert!((distribution.sum() - 1.0).abs() < 1e-9);
///
/// let slope = tanh_derivative(&array![[0.5]]);
/// assert!((slope[[0, 0]] - 0.75).abs() < 1e-12);
/// ```
pub mod math;

/// Module `recurrent` provides recurrent sequence models trained with backpropagation through time.
///
/// This module implements character-level sequence learning end to end: a sequence
/// encoder that turns raw text rows into one-hot vectors over a fixed vocabulary,
/// two gated recurrent cell variants, and the BPTT trainer that unrolls a cell over
/// each sequence, backpropagates through the unrolled timesteps, and applies
/// per-sequence gradient-descent updates in place.
///
/// # Core Components
///
/// ## Cells
/// - **LSTM**: additive-memory cell with input, forget, candidate, and output gates;
///   the input, forget, and output gates carry peephole connections to the memory vector
/// - **GRU**: gated-reset cell with reset, update, and candidate gates and no separate memory vector
/// - **RNN**: closed enum over the two variants, fixing the cell kind (and with it the
///   trainer specialization) at construction time
///
/// ## Training
/// - **BackPropagationThroughTime**: outer training loop over iterations and sequences,
///   per-variant reverse-time gradient recursion, and in-place weight updates
/// - **LstmCache** / **GruCache**: per-sequence arenas holding every forward activation
///   and backward delta, indexed by timestep
///
/// ## Supporting Types
/// - **SequenceEncoder**: symbol vocabulary and one-hot tables built from training rows
/// - **MatrixInitializer** / **WeightDistribution**: seeded uniform or Gaussian weight draws
///
/// # Example
/// ```rust
/// use rustyrnn::recurrent::*;
///
/// let rows = vec!["abab".to_string(), "baba".to_string()];
/// let encoder = SequenceEncoder::new(&rows);
///
/// let mut initializer = MatrixInitializer::new(
///     WeightDistribution::Uniform { scale: 0.1 },
///     Some(42),
/// )
/// .unwrap();
///
/// let lstm = LSTM::new(encoder.vocabulary_size(), 8, &mut initializer).unwrap();
/// let mut trainer = BackPropagationThroughTime::new(RNN::LSTM(lstm), 0.8).unwrap();
///
/// let errors = trainer.learn(&encoder, 5).unwrap();
/// assert_eq!(errors.len(), 5);
/// ```
pub mod recurrent;

/// A convenience module that re-exports the most commonly used types and functions from this crate.
///
/// This module provides a single import point for frequently used items from the library,
/// enabling quick access to essential components with a single `use` statement.
///
/// # Available Components
///
/// ## Recurrent Models and Training
/// - Cell variants (LSTM, GRU) and the RNN selector enum
/// - BackPropagationThroughTime trainer and the per-sequence caches
/// - SequenceEncoder, MatrixInitializer, WeightDistribution
///
/// ## Mathematical Functions
/// - Nonlinearities and their derivatives (logistic, tanh, softmax)
/// - Cross-entropy loss functions
///
/// # Examples
/// ```rust
/// use rustyrnn::prelude::recurrent_prelude::*;
///
/// let rows = vec!["abab".to_string()];
/// let encoder = SequenceEncoder::new(&rows);
/// assert_eq!(encoder.vocabulary_size(), 2);
/// ```
pub mod prelude;
