pub use crate::ModelError;
pub use crate::recurrent::Matrix;
pub use crate::recurrent::cache::{GruCache, LstmCache};
pub use crate::recurrent::cell::{GRU, LSTM, RNN};
pub use crate::recurrent::initializer::{MatrixInitializer, WeightDistribution};
pub use crate::recurrent::sequence::SequenceEncoder;
pub use crate::recurrent::trainer::BackPropagationThroughTime;
