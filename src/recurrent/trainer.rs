use super::*;
use std::time::Instant;

/// BPTT specialization for the gated-reset cell
pub(crate) mod gru;
/// BPTT specialization for the additive-memory cell
pub(crate) mod lstm;

/// Trains a recurrent cell with backpropagation through time.
///
/// Owns the cell for the duration of a run and mutates its weights in place
/// after every sequence: the forward pass unrolls the cell over one sequence
/// while filling a timestep cache, the backward pass walks the same cache in
/// reverse deriving every gate delta, and the update subtracts the averaged
/// per-sequence gradients scaled by the learning rate. This is sequence-batched
/// gradient descent; gradients are never accumulated across sequences.
///
/// Training is single-threaded and strictly ordered: the forward pass of a
/// sequence completes before its backward pass begins. Parallel harnesses must
/// clone the whole trainer per worker instead of sharing one instance.
///
/// # Fields
///
/// - `network` - The cell variant being trained, selected once at construction
/// - `learning_rate` - Step size of the in-place weight updates
/// - `skipped_sequences` - Count of skip events for sequences shorter than 3 symbols
///
/// # Example
/// ```rust
/// use rustyrnn::recurrent::*;
///
/// let rows = vec!["abababab".to_string()];
/// let encoder = SequenceEncoder::new(&rows);
///
/// let mut initializer = MatrixInitializer::new(
///     WeightDistribution::Uniform { scale: 0.1 },
///     Some(42),
/// )
/// .unwrap();
/// let gru = GRU::new(encoder.vocabulary_size(), 8, &mut initializer).unwrap();
///
/// let mut trainer = BackPropagationThroughTime::new(RNN::GRU(gru), 0.8).unwrap();
/// let errors = trainer.learn(&encoder, 10).unwrap();
/// assert_eq!(errors.len(), 10);
/// ```
#[derive(Debug, Clone)]
pub struct BackPropagationThroughTime {
    network: RNN,
    learning_rate: f64,
    skipped_sequences: usize,
}

impl BackPropagationThroughTime {
    /// Creates a trainer for the given cell.
    ///
    /// # Parameters
    ///
    /// - `network` - The cell variant to train
    /// - `learning_rate` - Step size of the weight updates
    ///
    /// # Returns
    ///
    /// - `Ok(Self)` - A ready trainer
    /// - `Err(ModelError::InputValidationError)` - If `learning_rate` is not a positive finite number
    pub fn new(network: RNN, learning_rate: f64) -> Result<Self, ModelError> {
        if !learning_rate.is_finite() || learning_rate <= 0.0 {
            return Err(ModelError::InputValidationError(format!(
                "learning_rate must be a positive finite number, got {}",
                learning_rate
            )));
        }

        Ok(Self {
            network,
            learning_rate,
            skipped_sequences: 0,
        })
    }

    /// Runs the outer training loop over the encoder's sequences.
    ///
    /// Per iteration, every sequence of at least 3 symbols is unrolled forward,
    /// backpropagated, and applied as one weight update; shorter sequences are
    /// skipped silently (counted by `skipped_sequences`). The per-iteration
    /// mean loss divides the summed cross-entropy by the total character count
    /// of the processed sequences. Each iteration prints the line
    /// `Iteration = <n>, error = <meanLoss>, time = <seconds>s` to stdout;
    /// external log scraping relies on this exact format.
    ///
    /// # Parameters
    ///
    /// - `encoder` - Sequence source supplying the training sequences and one-hot vectors
    /// - `max_iterations` - Number of passes over the sequence list
    ///
    /// # Returns
    ///
    /// - `Ok(Vec<f64>)` - The mean loss of every iteration, in order
    /// - `Err(ModelError::ShapeMismatch)` - If prediction and label shapes disagree in the loss; aborts the run
    /// - `Err(ModelError::ProcessingError)` - If a sequence symbol is missing from the vocabulary
    pub fn learn(
        &mut self,
        encoder: &SequenceEncoder,
        max_iterations: usize,
    ) -> Result<Vec<f64>, ModelError> {
        let mut iteration_errors = Vec::with_capacity(max_iterations);

        for iteration in 0..max_iterations {
            let mut error = 0.0;
            let mut symbol_count = 0.0;
            let start = Instant::now();

            for sequence in encoder.sequences() {
                if sequence.chars().count() < 3 {
                    self.skipped_sequences += 1;
                    continue;
                }

                error += match &mut self.network {
                    RNN::LSTM(cell) => {
                        lstm::train_sequence(cell, encoder, sequence, self.learning_rate)?
                    }
                    RNN::GRU(cell) => {
                        gru::train_sequence(cell, encoder, sequence, self.learning_rate)?
                    }
                };
                symbol_count += sequence.chars().count() as f64;
            }

            let mean_error = error / symbol_count;
            let seconds = start.elapsed().as_millis() as f64 / 1000.0;
            println!(
                "Iteration = {}, error = {}, time = {}s",
                iteration + 1,
                mean_error,
                seconds
            );
            iteration_errors.push(mean_error);
        }

        Ok(iteration_errors)
    }

    /// Gets the cell being trained.
    ///
    /// # Returns
    ///
    /// - `&RNN` - The wrapped cell variant
    pub fn network(&self) -> &RNN {
        &self.network
    }

    /// Consumes the trainer and returns the trained cell.
    ///
    /// # Returns
    ///
    /// - `RNN` - The wrapped cell variant
    pub fn into_network(self) -> RNN {
        self.network
    }

    get_field!(get_learning_rate, learning_rate, f64);

    get_field!(get_skipped_sequences, skipped_sequences, usize);
}

/// Looks up a symbol's one-hot vector, surfacing vocabulary misses as a typed error.
fn symbol_vector(encoder: &SequenceEncoder, symbol: char) -> Result<&Matrix, ModelError> {
    encoder.symbol_vector(symbol).ok_or_else(|| {
        ModelError::ProcessingError(format!(
            "symbol {:?} is missing from the vocabulary",
            symbol
        ))
    })
}

/// Gradient accumulator for one plain gate, zeroed at the start of each update.
struct GateGradient {
    kernel: Matrix,
    recurrent_kernel: Matrix,
    bias: Matrix,
}

impl GateGradient {
    fn zeros(gate: &Gate) -> Self {
        Self {
            kernel: Matrix::zeros(gate.kernel.dim()),
            recurrent_kernel: Matrix::zeros(gate.recurrent_kernel.dim()),
            bias: Matrix::zeros(gate.bias.dim()),
        }
    }

    /// Applies the accumulated gradients in place, each under its own divisor.
    fn apply(
        self,
        gate: &mut Gate,
        kernel_divisor: f64,
        recurrent_divisor: f64,
        learning_rate: f64,
    ) {
        gate.kernel -= &(self.kernel / kernel_divisor * learning_rate);
        gate.recurrent_kernel -= &(self.recurrent_kernel / recurrent_divisor * learning_rate);
        gate.bias -= &(self.bias / kernel_divisor * learning_rate);
    }
}

/// Gradient accumulator for one peephole gate, zeroed at the start of each update.
struct PeepholeGradient {
    kernel: Matrix,
    recurrent_kernel: Matrix,
    memory_kernel: Matrix,
    bias: Matrix,
}

impl PeepholeGradient {
    fn zeros(gate: &PeepholeGate) -> Self {
        Self {
            kernel: Matrix::zeros(gate.kernel.dim()),
            recurrent_kernel: Matrix::zeros(gate.recurrent_kernel.dim()),
            memory_kernel: Matrix::zeros(gate.memory_kernel.dim()),
            bias: Matrix::zeros(gate.bias.dim()),
        }
    }

    /// Applies the accumulated gradients in place, each under its own divisor.
    fn apply(
        self,
        gate: &mut PeepholeGate,
        kernel_divisor: f64,
        recurrent_divisor: f64,
        memory_divisor: f64,
        learning_rate: f64,
    ) {
        gate.kernel -= &(self.kernel / kernel_divisor * learning_rate);
        gate.recurrent_kernel -= &(self.recurrent_kernel / recurrent_divisor * learning_rate);
        gate.memory_kernel -= &(self.memory_kernel / memory_divisor * learning_rate);
        gate.bias -= &(self.bias / kernel_divisor * learning_rate);
    }
}

/// Divisor for gradients of current-timestep quantities: every timestep contributes.
fn full_divisor(last_timestep: usize) -> f64 {
    last_timestep as f64
}

/// Divisor for gradients of consecutive-timestep quantities, which have one
/// fewer contributing timestep. Preserved per matrix exactly as found; not
/// unified with the full divisor.
fn recurrent_divisor(last_timestep: usize) -> f64 {
    if last_timestep < 2 {
        1.0
    } else {
        (last_timestep - 1) as f64
    }
}
