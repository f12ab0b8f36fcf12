use super::Matrix;

/// Per-sequence timestep arena for the additive-memory cell.
///
/// Every forward quantity and every backward delta of one unrolled sequence is
/// stored here as one array per quantity, indexed by timestep. The forward
/// arrays grow append-only while the sequence is unrolled: an entry at timestep
/// `t` exists only once the forward step for `t` has executed. The delta arrays
/// are sized in one go by `prepare_backward` and then written newest-to-oldest
/// by the backward recursion, which reads the forward entries at `t` and `t + 1`.
/// The cache lives for exactly one sequence and is discarded after the weight
/// update.
///
/// # Fields
///
/// - `inputs`, `targets` - One-hot input and next-symbol label per timestep
/// - `input_gates`, `forget_gates`, `candidates`, `output_gates` - Gate activations per timestep
/// - `memories`, `activated_memories` - Memory vector and its tanh per timestep
/// - `hiddens`, `predictions` - Hidden vector and decoded distribution per timestep
/// - delta arrays - One per gate plus result, hidden, and memory deltas, written by the backward pass
#[derive(Debug, Clone)]
pub struct LstmCache {
    input_size: usize,
    output_size: usize,
    zero_state: Matrix,
    pub(crate) inputs: Vec<Matrix>,
    pub(crate) input_gates: Vec<Matrix>,
    pub(crate) forget_gates: Vec<Matrix>,
    pub(crate) candidates: Vec<Matrix>,
    pub(crate) memories: Vec<Matrix>,
    pub(crate) activated_memories: Vec<Matrix>,
    pub(crate) output_gates: Vec<Matrix>,
    pub(crate) hiddens: Vec<Matrix>,
    pub(crate) predictions: Vec<Matrix>,
    pub(crate) targets: Vec<Matrix>,
    pub(crate) result_deltas: Vec<Matrix>,
    pub(crate) hidden_deltas: Vec<Matrix>,
    pub(crate) output_gate_deltas: Vec<Matrix>,
    pub(crate) memory_deltas: Vec<Matrix>,
    pub(crate) candidate_deltas: Vec<Matrix>,
    pub(crate) forget_gate_deltas: Vec<Matrix>,
    pub(crate) input_gate_deltas: Vec<Matrix>,
}

impl LstmCache {
    /// Creates an empty cache for a cell of the given dimensions.
    ///
    /// # Parameters
    ///
    /// - `input_size` - Vocabulary size of the cell this cache serves
    /// - `output_size` - Hidden size of the cell this cache serves
    pub fn new(input_size: usize, output_size: usize) -> Self {
        Self::with_capacity(input_size, output_size, 0)
    }

    /// Creates an empty cache with room reserved for a known number of timesteps.
    pub fn with_capacity(input_size: usize, output_size: usize, timesteps: usize) -> Self {
        Self {
            input_size,
            output_size,
            zero_state: Matrix::zeros((1, output_size)),
            inputs: Vec::with_capacity(timesteps),
            input_gates: Vec::with_capacity(timesteps),
            forget_gates: Vec::with_capacity(timesteps),
            candidates: Vec::with_capacity(timesteps),
            memories: Vec::with_capacity(timesteps),
            activated_memories: Vec::with_capacity(timesteps),
            output_gates: Vec::with_capacity(timesteps),
            hiddens: Vec::with_capacity(timesteps),
            predictions: Vec::with_capacity(timesteps),
            targets: Vec::with_capacity(timesteps),
            result_deltas: Vec::new(),
            hidden_deltas: Vec::new(),
            output_gate_deltas: Vec::new(),
            memory_deltas: Vec::new(),
            candidate_deltas: Vec::new(),
            forget_gate_deltas: Vec::new(),
            input_gate_deltas: Vec::new(),
        }
    }

    /// Appends the one-hot input for the next timestep.
    pub fn push_input(&mut self, input: Matrix) {
        self.inputs.push(input);
    }

    /// Gets the number of fully executed forward steps.
    ///
    /// # Returns
    ///
    /// - `usize` - Count of timesteps whose activations are present
    pub fn timesteps(&self) -> usize {
        self.hiddens.len()
    }

    /// Gets the input pushed for a timestep.
    pub fn input(&self, timestep: usize) -> Option<&Matrix> {
        self.inputs.get(timestep)
    }

    /// Gets the hidden vector produced at a timestep.
    pub fn hidden(&self, timestep: usize) -> Option<&Matrix> {
        self.hiddens.get(timestep)
    }

    /// Gets the memory vector produced at a timestep.
    pub fn memory(&self, timestep: usize) -> Option<&Matrix> {
        self.memories.get(timestep)
    }

    /// Gets the decoded distribution stored for a timestep.
    pub fn prediction(&self, timestep: usize) -> Option<&Matrix> {
        self.predictions.get(timestep)
    }

    /// Gets the next-symbol label stored for a timestep.
    pub fn target(&self, timestep: usize) -> Option<&Matrix> {
        self.targets.get(timestep)
    }

    get_field!(get_input_size, input_size, usize);

    get_field!(get_output_size, output_size, usize);

    /// Hidden vector feeding timestep `timestep`: a zero row at the sequence start.
    pub(crate) fn previous_hidden(&self, timestep: usize) -> &Matrix {
        if timestep == 0 {
            &self.zero_state
        } else {
            &self.hiddens[timestep - 1]
        }
    }

    /// Memory vector feeding timestep `timestep`: a zero row at the sequence start.
    pub(crate) fn previous_memory(&self, timestep: usize) -> &Matrix {
        if timestep == 0 {
            &self.zero_state
        } else {
            &self.memories[timestep - 1]
        }
    }

    /// Sizes every delta array with zero rows so the backward recursion can
    /// assign them in reverse timestep order.
    pub(crate) fn prepare_backward(&mut self, timesteps: usize) {
        self.result_deltas = vec![Matrix::zeros((1, self.input_size)); timesteps];
        self.hidden_deltas = vec![Matrix::zeros((1, self.output_size)); timesteps];
        self.output_gate_deltas = vec![Matrix::zeros((1, self.output_size)); timesteps];
        self.memory_deltas = vec![Matrix::zeros((1, self.output_size)); timesteps];
        self.candidate_deltas = vec![Matrix::zeros((1, self.output_size)); timesteps];
        self.forget_gate_deltas = vec![Matrix::zeros((1, self.output_size)); timesteps];
        self.input_gate_deltas = vec![Matrix::zeros((1, self.output_size)); timesteps];
    }
}

/// Per-sequence timestep arena for the gated-reset cell.
///
/// Same layout discipline as [`LstmCache`], with the gated-reset field set:
/// reset and update gates instead of the four-gate family, and no memory
/// arrays because the variant keeps no separate memory vector.
///
/// # Fields
///
/// - `inputs`, `targets` - One-hot input and next-symbol label per timestep
/// - `reset_gates`, `update_gates`, `candidates` - Gate activations per timestep
/// - `hiddens`, `predictions` - Hidden vector and decoded distribution per timestep
/// - delta arrays - One per gate plus result and hidden deltas, written by the backward pass
#[derive(Debug, Clone)]
pub struct GruCache {
    input_size: usize,
    output_size: usize,
    zero_state: Matrix,
    pub(crate) inputs: Vec<Matrix>,
    pub(crate) reset_gates: Vec<Matrix>,
    pub(crate) update_gates: Vec<Matrix>,
    pub(crate) candidates: Vec<Matrix>,
    pub(crate) hiddens: Vec<Matrix>,
    pub(crate) predictions: Vec<Matrix>,
    pub(crate) targets: Vec<Matrix>,
    pub(crate) result_deltas: Vec<Matrix>,
    pub(crate) hidden_deltas: Vec<Matrix>,
    pub(crate) candidate_deltas: Vec<Matrix>,
    pub(crate) reset_gate_deltas: Vec<Matrix>,
    pub(crate) update_gate_deltas: Vec<Matrix>,
}

impl GruCache {
    /// Creates an empty cache for a cell of the given dimensions.
    ///
    /// # Parameters
    ///
    /// - `input_size` - Vocabulary size of the cell this cache serves
    /// - `output_size` - Hidden size of the cell this cache serves
    pub fn new(input_size: usize, output_size: usize) -> Self {
        Self::with_capacity(input_size, output_size, 0)
    }

    /// Creates an empty cache with room reserved for a known number of timesteps.
    pub fn with_capacity(input_size: usize, output_size: usize, timesteps: usize) -> Self {
        Self {
            input_size,
            output_size,
            zero_state: Matrix::zeros((1, output_size)),
            inputs: Vec::with_capacity(timesteps),
            reset_gates: Vec::with_capacity(timesteps),
            update_gates: Vec::with_capacity(timesteps),
            candidates: Vec::with_capacity(timesteps),
            hiddens: Vec::with_capacity(timesteps),
            predictions: Vec::with_capacity(timesteps),
            targets: Vec::with_capacity(timesteps),
            result_deltas: Vec::new(),
            hidden_deltas: Vec::new(),
            candidate_deltas: Vec::new(),
            reset_gate_deltas: Vec::new(),
            update_gate_deltas: Vec::new(),
        }
    }

    /// Appends the one-hot input for the next timestep.
    pub fn push_input(&mut self, input: Matrix) {
        self.inputs.push(input);
    }

    /// Gets the number of fully executed forward steps.
    ///
    /// # Returns
    ///
    /// - `usize` - Count of timesteps whose activations are present
    pub fn timesteps(&self) -> usize {
        self.hiddens.len()
    }

    /// Gets the input pushed for a timestep.
    pub fn input(&self, timestep: usize) -> Option<&Matrix> {
        self.inputs.get(timestep)
    }

    /// Gets the hidden vector produced at a timestep.
    pub fn hidden(&self, timestep: usize) -> Option<&Matrix> {
        self.hiddens.get(timestep)
    }

    /// Gets the decoded distribution stored for a timestep.
    pub fn prediction(&self, timestep: usize) -> Option<&Matrix> {
        self.predictions.get(timestep)
    }

    /// Gets the next-symbol label stored for a timestep.
    pub fn target(&self, timestep: usize) -> Option<&Matrix> {
        self.targets.get(timestep)
    }

    get_field!(get_input_size, input_size, usize);

    get_field!(get_output_size, output_size, usize);

    /// Hidden vector feeding timestep `timestep`: a zero row at the sequence start.
    pub(crate) fn previous_hidden(&self, timestep: usize) -> &Matrix {
        if timestep == 0 {
            &self.zero_state
        } else {
            &self.hiddens[timestep - 1]
        }
    }

    /// Sizes every delta array with zero rows so the backward recursion can
    /// assign them in reverse timestep order.
    pub(crate) fn prepare_backward(&mut self, timesteps: usize) {
        self.result_deltas = vec![Matrix::zeros((1, self.input_size)); timesteps];
        self.hidden_deltas = vec![Matrix::zeros((1, self.output_size)); timesteps];
        self.candidate_deltas = vec![Matrix::zeros((1, self.output_size)); timesteps];
        self.reset_gate_deltas = vec![Matrix::zeros((1, self.output_size)); timesteps];
        self.update_gate_deltas = vec![Matrix::zeros((1, self.output_size)); timesteps];
    }
}
