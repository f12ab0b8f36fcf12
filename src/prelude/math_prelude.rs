pub use crate::math::{logistic, logistic_derivative, softmax, tanh, tanh_derivative};
pub use crate::math::{categorical_cross_entropy, mean_categorical_cross_entropy};
