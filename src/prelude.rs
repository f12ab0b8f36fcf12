/// Prelude module for the mathematical building blocks.
pub mod math_prelude;
/// Prelude module for the recurrent models and training.
pub mod recurrent_prelude;
