use super::*;

/// Gate weight aggregates shared by both cell variants
pub mod gate;
/// The gated-reset (GRU) cell implementation
pub mod gru;
/// Input validation functions for recurrent cells
mod input_validation_function;
/// The additive-memory (LSTM) cell implementation
pub mod lstm;

pub use gate::*;
pub use gru::GRU;
pub use lstm::LSTM;

use input_validation_function::*;

/// Closed sum over the two recurrent cell variants.
///
/// The variant is selected once at construction and fixes the trainer
/// specialization paired with it; there is no runtime downcasting anywhere.
///
/// # Variants
///
/// - `LSTM` - Additive-memory cell with peephole connections to the memory vector
/// - `GRU` - Gated-reset cell without a separate memory vector
#[derive(Debug, Clone)]
pub enum RNN {
    LSTM(LSTM),
    GRU(GRU),
}

impl RNN {
    /// Gets the vocabulary size of the wrapped cell.
    ///
    /// # Returns
    ///
    /// - `usize` - The cell's input size
    pub fn get_input_size(&self) -> usize {
        match self {
            RNN::LSTM(lstm) => lstm.get_input_size(),
            RNN::GRU(gru) => gru.get_input_size(),
        }
    }

    /// Gets the hidden size of the wrapped cell.
    ///
    /// # Returns
    ///
    /// - `usize` - The cell's output size
    pub fn get_output_size(&self) -> usize {
        match self {
            RNN::LSTM(lstm) => lstm.get_output_size(),
            RNN::GRU(gru) => gru.get_output_size(),
        }
    }

    /// Decodes a hidden vector into a probability distribution over the vocabulary.
    ///
    /// # Parameters
    ///
    /// - `hidden` - Hidden row vector with shape (1, output_size)
    ///
    /// # Returns
    ///
    /// - `Matrix` - Softmax distribution with shape (1, input_size)
    pub fn decode(&self, hidden: &Matrix) -> Matrix {
        match self {
            RNN::LSTM(lstm) => lstm.decode(hidden),
            RNN::GRU(gru) => gru.decode(hidden),
        }
    }
}
