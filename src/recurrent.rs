/// Module that contains the per-sequence timestep caches consumed by training
pub mod cache;
/// Module that contains the recurrent cell implementations
pub mod cell;
/// Module that contains weight initialization distributions
pub mod initializer;
/// Module that contains the symbol vocabulary and one-hot sequence encoder
pub mod sequence;
/// Module that contains the backpropagation-through-time trainer
pub mod trainer;

pub use cache::*;
pub use cell::*;
pub use initializer::*;
pub use sequence::*;
pub use trainer::BackPropagationThroughTime;

use crate::ModelError;
use ndarray::Array2;

/// Type alias for the 2D arrays used as weight matrices and row vectors throughout the recurrent models
pub type Matrix = Array2<f64>;
