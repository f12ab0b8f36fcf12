use super::*;
use crate::math::{logistic_derivative, mean_categorical_cross_entropy, tanh_derivative};

/// Runs one sequence through the additive-memory cell: forward unroll,
/// backward recursion, in-place weight update.
///
/// # Parameters
///
/// - `lstm` - The cell being trained, updated in place
/// - `encoder` - One-hot vector source for the sequence's symbols
/// - `sequence` - Training sequence; the caller guarantees at least 3 symbols
/// - `learning_rate` - Step size of the weight update
///
/// # Returns
///
/// - `Ok(f64)` - The summed per-timestep mean cross-entropy of the forward unroll
/// - `Err(ModelError)` - On a loss shape mismatch or a vocabulary miss
pub(crate) fn train_sequence(
    lstm: &mut LSTM,
    encoder: &SequenceEncoder,
    sequence: &str,
    learning_rate: f64,
) -> Result<f64, ModelError> {
    let symbols: Vec<char> = sequence.chars().collect();
    let timesteps = symbols.len() - 1;
    let mut cache =
        LstmCache::with_capacity(lstm.get_input_size(), lstm.get_output_size(), timesteps);
    let mut error = 0.0;

    for timestep in 0..timesteps {
        let input = symbol_vector(encoder, symbols[timestep])?.clone();
        cache.push_input(input);
        lstm.activate(timestep, &mut cache)?;

        let prediction = lstm.decode(&cache.hiddens[timestep]);
        let target = symbol_vector(encoder, symbols[timestep + 1])?.clone();
        error += mean_categorical_cross_entropy(&prediction, &target)?;
        cache.predictions.push(prediction);
        cache.targets.push(target);
    }

    propagate(lstm, &mut cache, timesteps - 1, learning_rate);
    Ok(error)
}

/// Reverse-time gradient recursion for the additive-memory cell.
///
/// Walks from `last_timestep` down to 0, deriving the hidden, memory, and gate
/// deltas at each step from the forward activations and the deltas already
/// stored at `timestep + 1`, then hands the filled cache to the weight update.
/// The hidden delta carries the decode contribution at every step plus, before
/// the terminal step, the contributions of the next step's gate deltas through
/// each recurrent kernel; the memory delta analogously carries the next step's
/// forget-gated memory delta and the input/forget peephole contributions.
pub(crate) fn propagate(
    lstm: &mut LSTM,
    cache: &mut LstmCache,
    last_timestep: usize,
    learning_rate: f64,
) {
    cache.prepare_backward(last_timestep + 1);

    for timestep in (0..=last_timestep).rev() {
        let result_delta = &cache.predictions[timestep] - &cache.targets[timestep];

        let mut hidden_delta = result_delta.dot(&lstm.output_weight.t());
        if timestep < last_timestep {
            let late = timestep + 1;
            hidden_delta = hidden_delta
                + cache.candidate_deltas[late].dot(&lstm.candidate_gate.recurrent_kernel.t())
                + cache.input_gate_deltas[late].dot(&lstm.input_gate.recurrent_kernel.t())
                + cache.output_gate_deltas[late].dot(&lstm.output_gate.recurrent_kernel.t())
                + cache.forget_gate_deltas[late].dot(&lstm.forget_gate.recurrent_kernel.t());
        }

        let output_gate_delta = &hidden_delta
            * &cache.activated_memories[timestep]
            * logistic_derivative(&cache.output_gates[timestep]);

        let mut memory_delta = &hidden_delta
            * &cache.output_gates[timestep]
            * tanh_derivative(&cache.activated_memories[timestep])
            + output_gate_delta.dot(&lstm.output_gate.memory_kernel.t());
        if timestep < last_timestep {
            let late = timestep + 1;
            memory_delta = memory_delta
                + &cache.forget_gates[late] * &cache.memory_deltas[late]
                + cache.forget_gate_deltas[late].dot(&lstm.forget_gate.memory_kernel.t())
                + cache.input_gate_deltas[late].dot(&lstm.input_gate.memory_kernel.t());
        }

        let candidate_delta = &memory_delta
            * &cache.input_gates[timestep]
            * tanh_derivative(&cache.candidates[timestep]);
        let forget_gate_delta = &memory_delta
            * cache.previous_memory(timestep)
            * logistic_derivative(&cache.forget_gates[timestep]);
        let input_gate_delta = &memory_delta
            * &cache.candidates[timestep]
            * logistic_derivative(&cache.input_gates[timestep]);

        cache.result_deltas[timestep] = result_delta;
        cache.hidden_deltas[timestep] = hidden_delta;
        cache.output_gate_deltas[timestep] = output_gate_delta;
        cache.memory_deltas[timestep] = memory_delta;
        cache.candidate_deltas[timestep] = candidate_delta;
        cache.forget_gate_deltas[timestep] = forget_gate_delta;
        cache.input_gate_deltas[timestep] = input_gate_delta;
    }

    update_parameters(lstm, cache, last_timestep, learning_rate);
}

/// Per-sequence gradient-descent update for the additive-memory cell.
///
/// Sums the outer products of the forward vectors with the gate deltas into
/// fresh accumulators, then subtracts each averaged accumulator from its
/// weight in place. Recurrent and previous-memory products only contribute
/// for `timestep > 0`; the output-gate peephole accumulates against the
/// current memory at every timestep and takes the full divisor, while the
/// input/forget peepholes average like the recurrent kernels.
fn update_parameters(
    lstm: &mut LSTM,
    cache: &LstmCache,
    last_timestep: usize,
    learning_rate: f64,
) {
    let mut input_gate_grad = PeepholeGradient::zeros(&lstm.input_gate);
    let mut forget_gate_grad = PeepholeGradient::zeros(&lstm.forget_gate);
    let mut candidate_gate_grad = GateGradient::zeros(&lstm.candidate_gate);
    let mut output_gate_grad = PeepholeGradient::zeros(&lstm.output_gate);
    let mut output_weight_grad = Matrix::zeros(lstm.output_weight.dim());
    let mut output_bias_grad = Matrix::zeros(lstm.output_bias.dim());

    for timestep in 0..=last_timestep {
        let input = cache.inputs[timestep].t();
        input_gate_grad.kernel += &input.dot(&cache.input_gate_deltas[timestep]);
        forget_gate_grad.kernel += &input.dot(&cache.forget_gate_deltas[timestep]);
        candidate_gate_grad.kernel += &input.dot(&cache.candidate_deltas[timestep]);
        output_gate_grad.kernel += &input.dot(&cache.output_gate_deltas[timestep]);

        if timestep > 0 {
            let previous_hidden = cache.hiddens[timestep - 1].t();
            let previous_memory = cache.memories[timestep - 1].t();
            input_gate_grad.recurrent_kernel +=
                &previous_hidden.dot(&cache.input_gate_deltas[timestep]);
            forget_gate_grad.recurrent_kernel +=
                &previous_hidden.dot(&cache.forget_gate_deltas[timestep]);
            candidate_gate_grad.recurrent_kernel +=
                &previous_hidden.dot(&cache.candidate_deltas[timestep]);
            output_gate_grad.recurrent_kernel +=
                &previous_hidden.dot(&cache.output_gate_deltas[timestep]);
            input_gate_grad.memory_kernel +=
                &previous_memory.dot(&cache.input_gate_deltas[timestep]);
            forget_gate_grad.memory_kernel +=
                &previous_memory.dot(&cache.forget_gate_deltas[timestep]);
        }

        output_gate_grad.memory_kernel += &cache.memories[timestep]
            .t()
            .dot(&cache.output_gate_deltas[timestep]);
        output_weight_grad += &cache.hiddens[timestep]
            .t()
            .dot(&cache.result_deltas[timestep]);

        input_gate_grad.bias += &cache.input_gate_deltas[timestep];
        forget_gate_grad.bias += &cache.forget_gate_deltas[timestep];
        candidate_gate_grad.bias += &cache.candidate_deltas[timestep];
        output_gate_grad.bias += &cache.output_gate_deltas[timestep];
        output_bias_grad += &cache.result_deltas[timestep];
    }

    let full = full_divisor(last_timestep);
    let recurrent = recurrent_divisor(last_timestep);

    input_gate_grad.apply(&mut lstm.input_gate, full, recurrent, recurrent, learning_rate);
    forget_gate_grad.apply(&mut lstm.forget_gate, full, recurrent, recurrent, learning_rate);
    candidate_gate_grad.apply(&mut lstm.candidate_gate, full, recurrent, learning_rate);
    output_gate_grad.apply(&mut lstm.output_gate, full, recurrent, full, learning_rate);
    lstm.output_weight -= &(output_weight_grad / full * learning_rate);
    lstm.output_bias -= &(output_bias_grad / full * learning_rate);
}
