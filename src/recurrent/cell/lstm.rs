use super::*;
use crate::math::{logistic, softmax, tanh};

/// Threshold for using parallel computation in the LSTM cell.
/// When input_size * output_size < this value, sequential execution is used.
/// When input_size * output_size >= this value, the independent gate
/// pre-activations of one step are evaluated with rayon::join.
const LSTM_PARALLEL_THRESHOLD: usize = 1024;

/// Additive-memory recurrent cell (LSTM with memory peepholes).
///
/// The cell keeps two recurrent signals: the memory vector `c_t`, updated by
/// gated accumulation, and the hidden vector `h_t` read by the decode step.
/// The input, forget, and output gates carry peephole kernels reading the
/// memory vector; the input and forget peepholes read the previous memory,
/// the output peephole reads the memory just computed at the current step.
///
/// # Mathematical Operations
///
/// For each timestep t (zero vectors feed t = 0):
/// 1. i_t = σ(x_t·Wi_x + h_{t-1}·Wi_h + c_{t-1}·Wi_c + b_i)  (Input gate)
/// 2. f_t = σ(x_t·Wf_x + h_{t-1}·Wf_h + c_{t-1}·Wf_c + b_f)  (Forget gate)
/// 3. g_t = tanh(x_t·Wg_x + h_{t-1}·Wg_h + b_g)  (Candidate, no memory term)
/// 4. c_t = f_t ⊙ c_{t-1} + i_t ⊙ g_t  (Memory update)
/// 5. o_t = σ(x_t·Wo_x + h_{t-1}·Wo_h + c_t·Wo_c + b_o)  (Output gate, current memory)
/// 6. h_t = o_t ⊙ tanh(c_t)  (Hidden update)
///
/// Where σ is the logistic function and ⊙ is elementwise multiplication.
///
/// # Fields
///
/// - `input_size` - Vocabulary size (dimensionality of one-hot inputs)
/// - `output_size` - Hidden size (number of units)
/// - `input_gate`, `forget_gate`, `output_gate` - Peephole gates
/// - `candidate_gate` - Candidate gate without a memory kernel
/// - `output_weight` - Decode weight with shape (output_size, input_size)
/// - `output_bias` - Decode bias with shape (1, input_size)
///
/// # Example
/// ```rust
/// use rustyrnn::recurrent::*;
///
/// let mut initializer = MatrixInitializer::new(
///     WeightDistribution::Uniform { scale: 0.1 },
///     Some(42),
/// )
/// .unwrap();
/// let lstm = LSTM::new(2, 3, &mut initializer).unwrap();
///
/// let mut cache = LstmCache::new(2, 3);
/// cache.push_input(ndarray::array![[1.0, 0.0]]);
/// lstm.activate(0, &mut cache).unwrap();
///
/// let distribution = lstm.decode(cache.hidden(0).unwrap());
/// assert!((distribution.sum() - 1.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone)]
pub struct LSTM {
    input_size: usize,
    output_size: usize,

    pub input_gate: PeepholeGate,
    pub forget_gate: PeepholeGate,
    pub candidate_gate: Gate,
    pub output_gate: PeepholeGate,

    pub output_weight: Matrix,
    pub output_bias: Matrix,
}

impl LSTM {
    /// Creates a new LSTM cell with weights drawn from the initializer.
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
            input_gate: PeepholeGate::new(input_size, output_size, initializer),
            forget_gate: PeepholeGate::new(input_size, output_size, initializer),
            candidate_gate: Gate::new(input_size, output_size, initializer),
            output_gate: PeepholeGate::new(input_size, output_size, initializer),
            output_weight: initializer.sample(output_size, input_size),
            output_bias: Matrix::zeros((1, input_size)),
        })
    }

    /// Runs one forward step at `timestep`, appending every activation to the cache.
    ///
    /// Reads the input pushed for `timestep` and the previous timestep's hidden
    /// and memory vectors (zero rows when `timestep == 0`), computes the four
    /// gate activations, the new memory vector, and the new hidden vector, and
    /// appends all of them to the cache. Pure function of the inputs and the
    /// cell's current weights; all mutation goes through the cache parameter.
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
    pub fn activate(&self, timestep: usize, cache: &mut LstmCache) -> Result<(), ModelError> {
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
        let previous_memory = cache.previous_memory(timestep);

        let use_parallel = self.input_size * self.output_size >= LSTM_PARALLEL_THRESHOLD;

        // The output gate reads the current memory, so only the other three
        // pre-activations are independent of each other.
        let (input_value, (forget_value, candidate_value)) = if use_parallel {
            rayon::join(
                || compute_peephole_gate_value(&self.input_gate, input, previous_hidden, previous_memory),
                || {
                    rayon::join(
                        || {
                            compute_peephole_gate_value(
                                &self.forget_gate,
                                input,
                                previous_hidden,
                                previous_memory,
                            )
                        },
                        || compute_gate_value(&self.candidate_gate, input, previous_hidden),
                    )
                },
            )
        } else {
            (
                compute_peephole_gate_value(&self.input_gate, input, previous_hidden, previous_memory),
                (
                    compute_peephole_gate_value(
                        &self.forget_gate,
                        input,
                        previous_hidden,
                        previous_memory,
                    ),
                    compute_gate_value(&self.candidate_gate, input, previous_hidden),
                ),
            )
        };

        let input_gate = logistic(&input_value);
        let forget_gate = logistic(&forget_value);
        let candidate = tanh(&candidate_value);

        let memory = &forget_gate * previous_memory + &input_gate * &candidate;
        let output_gate = logistic(&compute_peephole_gate_value(
            &self.output_gate,
            input,
            previous_hidden,
            &memory,
        ));
        let activated_memory = tanh(&memory);
        let hidden = &output_gate * &activated_memory;

        cache.input_gates.push(input_gate);
        cache.forget_gates.push(forget_gate);
        cache.candidates.push(candidate);
        cache.memories.push(memory);
        cache.activated_memories.push(activated_memory);
        cache.output_gates.push(output_gate);
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
