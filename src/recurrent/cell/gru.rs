use super::*;
use crate::math::{logistic, softmax, tanh};

/// Threshold for using parallel computation in the GRU cell.
/// When input_size * output_size < this value, sequential execution is used.
/// When input_size * output_size >= this value, the independent gate
/// pre-activations of one step are evaluated with rayon::join.
const GRU_PARALLEL_THRESHOLD: usize = 1024;

/// Gated-reset recurrent cell (GRU).
///
/// The cell keeps a single recurrent signal, the hidden vector `h_t`; there is
/// no separate memory vector. The reset gate controls how much of the previous
/// hidden state feeds the candidate, and the update gate interpolates between
/// the previous hidden state and the candidate.
///
/// # Mathematical Operations
///
/// For each timestep t (a zero vector feeds t = 0):
/// 1. r_t = σ(x_t·Wr_x + h_{t-1}·Wr_h + b_r)  (Reset gate)
/// 2. z_t = σ(x_t·Wz_x + h_{t-1}·Wz_h + b_z)  (Update gate)
/// 3. g_t = tanh(x_t·Wg_x + (r_t ⊙ h_{t-1})·Wg_h + b_g)  (Candidate)
/// 4. h_t = (1 − z_t) ⊙ h_{t-1} + z_t ⊙ g_t  (Hidden update)
///
/// Where σ is the logistic function and ⊙ is elementwise multiplication.
///
/// # Fields
///
/// - `input_size` - Vocabulary size (dimensionality of one-hot inputs)
/// - `output_size` - Hidden size (number of units)
/// - `reset_gate`, `update_gate`, `candidate_gate` - The three gates
/// - `output_weight` - Decode weight with shape (output_size, input_size)
/// - `output_bias` - Decode bias with shape (1, input_size)
///
/// # Example
/// ```rust
/// use rustyrnn::recurrent::*;
///
/// let mut initializer = MatrixInitializer::new(
///     WeightDistribution::Gaussian { mean: 0.0, sigma: 0.1 },
///     Some(42),
/// )
/// .unwrap();
/// let gru = GRU::new(2, 3, &mut initializer).unwrap();
///
/// let mut cache = GruCache::new(2, 3);
/// cache.push_input(ndarray::array![[0.0, 1.0]]);
/// gru.activate(0, &mut cache).unwrap();
///
/// let distribution = gru.decode(cache.hidden(0).unwrap());
/// assert!((distribution.sum() - 1.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone)]
pub struct GRU {
    input_size: usize,
    output_size: usize,

    pub reset_gate: Gate,
    pub update_gate: Gate,
    pub candidate_gate: Gate,

    pub output_weight: Matrix,
    pub output_bias: Matrix,
}

impl GRU {
    /// Creates a new GRU cell with weights drawn from the initializer.
    ///
    /// Kernels are sampled gate by gate in a fixed order, so a seeded
    /// initializer reproduces the same cell; biases start at zero.
    ///
    /// # Parameters
    ///
    /// - `input_size` - Vocabulary size
    /// - `output_size` - Hidden size
    /// - `initializer` - Seeded weight source
    ///
    /// # Returns
    ///
    /// - `Ok(Self)` - A ready cell
    /// - `Err(ModelError::InputValidationError)` - If either dimension is 0
    pub fn new(
        input_size: usize,
        output_size: usize,
        initializer: &mut MatrixInitializer,
    ) -> Result<Self, ModelError> {
        validate_cell_dimensions(input_size, output_size)?;

        Ok(Self {
            input_size,
            output_size,
            reset_gate: Gate::new(input_size, output_size, initializer),
            update_gate: Gate::new(input_size, output_size, initializer),
            candidate_gate: Gate::new(input_size, output_size, initializer),
            output_weight: initializer.sample(output_size, input_size),
            output_bias: Matrix::zeros((1, input_size)),
        })
    }

    /// Runs one forward step at `timestep`, appending every activation to the cache.
    ///
    /// Reads the input pushed for `timestep` and the previous timestep's hidden
    /// vector (a zero row when `timestep == 0`), computes the three gate
    /// activations and the new hidden vector, and appends all of them to the
    /// cache. Pure function of the inputs and the cell's current weights; all
    /// mutation goes through the cache parameter.
    ///
    /// # Parameters
    ///
    /// - `timestep` - Index of the step to execute; steps `0..timestep` must already be present
    /// - `cache` - Per-sequence arena receiving the activations
    ///
    /// # Returns
    ///
    /// - `Ok(())` - The cache now holds every timestep-`timestep` forward entry
    /// - `Err(ModelError::ProcessingError)` - If the cache does not hold exactly the input at `timestep` and forward entries for `0..timestep`
    pub fn activate(&self, timestep: usize, cache: &mut GruCache) -> Result<(), ModelError> {
        if cache.inputs.len() != timestep + 1 || cache.timesteps() != timestep {
            return Err(ModelError::ProcessingError(format!(
                "cache holds {} inputs and {} executed steps, cannot activate timestep {}",
                cache.inputs.len(),
                cache.timesteps(),
                timestep
            )));
        }

        let input = &cache.inputs[timestep];
        let previous_hidden = cache.previous_hidden(timestep);

        let use_parallel = self.input_size * self.output_size >= GRU_PARALLEL_THRESHOLD;

        // The candidate reads the reset gate, so only the reset and update
        // pre-activations are independent of each other.
        let (reset_value, update_value) = if use_parallel {
            rayon::join(
                || compute_gate_value(&self.reset_gate, input, previous_hidden),
                || compute_gate_value(&self.update_gate, input, previous_hidden),
            )
        } else {
            (
                compute_gate_value(&self.reset_gate, input, previous_hidden),
                compute_gate_value(&self.update_gate, input, previous_hidden),
            )
        };

        let reset_gate = logistic(&reset_value);
        let update_gate = logistic(&update_value);

        let candidate = tanh(
            &(input.dot(&self.candidate_gate.kernel)
                + (&reset_gate * previous_hidden).dot(&self.candidate_gate.recurrent_kernel)
                + &self.candidate_gate.bias),
        );
        let hidden =
            update_gate.mapv(|z| 1.0 - z) * previous_hidden + &update_gate * &candidate;

        cache.reset_gates.push(reset_gate);
        cache.update_gates.push(update_gate);
        cache.candidates.push(candidate);
        cache.hiddens.push(hidden);

        Ok(())
    }

    /// Decodes a hidden vector into a probability distribution over the vocabulary.
    ///
    /// Applies the affine map `hidden @ output_weight + output_bias` followed by
    /// a row-wise softmax. The softmax performs no row-max subtraction, so very
    /// large logits can overflow; see [`crate::math::softmax`].
    ///
    /// # Parameters
    ///
    /// - `hidden` - Hidden row vector with shape (1, output_size)
    ///
    /// # Returns
    ///
    /// - `Matrix` - Distribution over symbols with shape (1, input_size)
    pub fn decode(&self, hidden: &Matrix) -> Matrix {
        softmax(&(hidden.dot(&self.output_weight) + &self.output_bias))
    }

    get_field!(get_input_size, input_size, usize);

    get_field!(get_output_size, output_size, usize);
}
