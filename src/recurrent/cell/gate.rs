use super::*;

/// Weight aggregate for one gate of a recurrent cell.
///
/// Kernels are drawn from the cell's initializer at construction; the bias
/// starts at zero. Shapes are fixed at construction and never resized.
///
/// # Fields
///
/// - `kernel` - Weight matrix for input connections with shape (input_size, output_size)
/// - `recurrent_kernel` - Weight matrix for previous-hidden connections with shape (output_size, output_size)
/// - `bias` - Bias vector with shape (1, output_size)
#[derive(Debug, Clone)]
pub struct Gate {
    pub kernel: Matrix,
    pub recurrent_kernel: Matrix,
    pub bias: Matrix,
}

impl Gate {
    /// Creates a gate with kernels sampled from the initializer and a zero bias.
    ///
    /// # Parameters
    ///
    /// - `input_size` - Dimensionality of the input features
    /// - `output_size` - Number of units in this gate
    /// - `initializer` - Seeded weight source the kernels are drawn from
    ///
    /// # Returns
    ///
    /// - `Self` - A new gate with freshly sampled kernels
    pub fn new(input_size: usize, output_size: usize, initializer: &mut MatrixInitializer) -> Self {
        Self {
            kernel: initializer.sample(input_size, output_size),
            recurrent_kernel: initializer.sample(output_size, output_size),
            bias: Matrix::zeros((1, output_size)),
        }
    }
}

/// Weight aggregate for a gate that also reads the memory vector.
///
/// The additive-memory cell's input, forget, and output gates carry this extra
/// peephole kernel; the candidate gate does not.
///
/// # Fields
///
/// - `kernel` - Weight matrix for input connections with shape (input_size, output_size)
/// - `recurrent_kernel` - Weight matrix for previous-hidden connections with shape (output_size, output_size)
/// - `memory_kernel` - Peephole weight matrix for memory connections with shape (output_size, output_size)
/// - `bias` - Bias vector with shape (1, output_size)
#[derive(Debug, Clone)]
pub struct PeepholeGate {
    pub kernel: Matrix,
    pub recurrent_kernel: Matrix,
    pub memory_kernel: Matrix,
    pub bias: Matrix,
}

impl PeepholeGate {
    /// Creates a peephole gate with kernels sampled from the initializer and a zero bias.
    ///
    /// # Parameters
    ///
    /// - `input_size` - Dimensionality of the input features
    /// - `output_size` - Number of units in this gate
    /// - `initializer` - Seeded weight source the kernels are drawn from
    ///
    /// # Returns
    ///
    /// - `Self` - A new gate with freshly sampled kernels
    pub fn new(input_size: usize, output_size: usize, initializer: &mut MatrixInitializer) -> Self {
        Self {
            kernel: initializer.sample(input_size, output_size),
            recurrent_kernel: initializer.sample(output_size, output_size),
            memory_kernel: initializer.sample(output_size, output_size),
            bias: Matrix::zeros((1, output_size)),
        }
    }
}

/// Computes a gate pre-activation: `x_t @ kernel + h_prev @ recurrent_kernel + bias`
///
/// # Parameters
///
/// - `gate` - Gate parameters used for the computation
/// - `x_t` - Input at the current timestep with shape (1, input_size)
/// - `h_prev` - Previous hidden state with shape (1, output_size)
///
/// # Returns
///
/// - `Matrix` - Pre-activation gate values with shape (1, output_size)
#[inline]
pub fn compute_gate_value(gate: &Gate, x_t: &Matrix, h_prev: &Matrix) -> Matrix {
    x_t.dot(&gate.kernel) + h_prev.dot(&gate.recurrent_kernel) + &gate.bias
}

/// Computes a peephole gate pre-activation, adding the memory term `memory @ memory_kernel`
///
/// # Parameters
///
/// - `gate` - Gate parameters used for the computation
/// - `x_t` - Input at the current timestep with shape (1, input_size)
/// - `h_prev` - Previous hidden state with shape (1, output_size)
/// - `memory` - Memory vector read by the peephole, shape (1, output_size)
///
/// # Returns
///
/// - `Matrix` - Pre-activation gate values with shape (1, output_size)
#[inline]
pub fn compute_peephole_gate_value(
    gate: &PeepholeGate,
    x_t: &Matrix,
    h_prev: &Matrix,
    memory: &Matrix,
) -> Matrix {
    x_t.dot(&gate.kernel)
        + h_prev.dot(&gate.recurrent_kernel)
        + memory.dot(&gate.memory_kernel)
        + &gate.bias
}
