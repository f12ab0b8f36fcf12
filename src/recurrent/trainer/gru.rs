use super::*;
use crate::math::{logistic_derivative, mean_categorical_cross_entropy, tanh_derivative};

/// Runs one sequence through the gated-reset cell: forward unroll, backward
/// recursion, in-place weight update.
///
/// # Parameters
///
/// - `gru` - The cell being trained, updated in place
/// - `encoder` - One-hot vector source for the sequence's symbols
/// - `sequence` - Training sequence; the caller guarantees at least 3 symbols
/// - `learning_rate` - Step size of the weight update
///
/// # Returns
///
/// - `Ok(f64)` - The summed per-timestep mean cross-entropy of the forward unroll
/// - `Err(ModelError)` - On a loss shape mismatch or a vocabulary miss
pub(crate) fn train_sequence(
    gru: &mut GRU,
    encoder: &SequenceEncoder,
    sequence: &str,
    learning_rate: f64,
) -> Result<f64, ModelError> {
    let symbols: Vec<char> = sequence.chars().collect();
    let timesteps = symbols.len() - 1;
    let mut cache =
        GruCache::with_capacity(gru.get_input_size(), gru.get_output_size(), timesteps);
    let mut error = 0.0;

    for timestep in 0..timesteps {
        let input = symbol_vector(encoder, symbols[timestep])?.clone();
        cache.push_input(input);
        gru.activate(timestep, &mut cache)?;

        let prediction = gru.decode(&cache.hiddens[timestep]);
        let target = symbol_vector(encoder, symbols[timestep + 1])?.clone();
        error += mean_categorical_cross_entropy(&prediction, &target)?;
        cache.predictions.push(prediction);
        cache.targets.push(target);
    }

    propagate(gru, &mut cache, timesteps - 1, learning_rate);
    Ok(error)
}

/// Reverse-time gradient recursion for the gated-reset cell.
///
/// Walks from `last_timestep` down to 0. The hidden delta carries the decode
/// contribution at every step plus, before the terminal step, the next step's
/// reset and update deltas through their recurrent kernels, the next step's
/// candidate delta (reset-gated before the matmul) through the candidate
/// recurrent kernel, and the direct carry `hiddenDelta ⊙ (1 − updateGate)`
/// from the interpolated hidden update. The reset-gate delta multiplies the
/// candidate delta by the previous hidden state elementwise before the
/// recurrent-kernel matmul, matching the reference formulation.
pub(crate) fn propagate(
    gru: &mut GRU,
    cache: &mut GruCache,
    last_timestep: usize,
    learning_rate: f64,
) {
    cache.prepare_backward(last_timestep + 1);

    for timestep in (0..=last_timestep).rev() {
        let result_delta = &cache.predictions[timestep] - &cache.targets[timestep];

        let mut hidden_delta = result_delta.dot(&gru.output_weight.t());
        if timestep < last_timestep {
            let late = timestep + 1;
            hidden_delta = hidden_delta
                + cache.reset_gate_deltas[late].dot(&gru.reset_gate.recurrent_kernel.t())
                + cache.update_gate_deltas[late].dot(&gru.update_gate.recurrent_kernel.t())
                + (&cache.candidate_deltas[late] * &cache.reset_gates[late])
                    .dot(&gru.candidate_gate.recurrent_kernel.t())
                + &cache.hidden_deltas[late] * cache.update_gates[late].mapv(|z| 1.0 - z);
        }

        let candidate_delta = &hidden_delta
            * &cache.update_gates[timestep]
            * tanh_derivative(&cache.candidates[timestep]);

        let previous_hidden = cache.previous_hidden(timestep);
        let reset_gate_delta = (&candidate_delta * previous_hidden)
            .dot(&gru.candidate_gate.recurrent_kernel.t())
            * logistic_derivative(&cache.reset_gates[timestep]);
        let update_gate_delta = &hidden_delta
            * (&cache.candidates[timestep] - previous_hidden)
            * logistic_derivative(&cache.update_gates[timestep]);

        cache.result_deltas[timestep] = result_delta;
        cache.hidden_deltas[timestep] = hidden_delta;
        cache.candidate_deltas[timestep] = candidate_delta;
        cache.reset_gate_deltas[timestep] = reset_gate_delta;
        cache.update_gate_deltas[timestep] = update_gate_delta;
    }

    update_parameters(gru, cache, last_timestep, learning_rate);
}

/// Per-sequence gradient-descent update for the gated-reset cell.
///
/// Sums the outer products of the forward vectors with the gate deltas into
/// fresh accumulators, then subtracts each averaged accumulator from its
/// weight in place. Recurrent products only contribute for `timestep > 0`;
/// the candidate recurrent kernel accumulates against the reset-gated
/// previous hidden state, the vector the candidate actually read.
fn update_parameters(gru: &mut GRU, cache: &GruCache, last_timestep: usize, learning_rate: f64) {
    let mut reset_gate_grad = GateGradient::zeros(&gru.reset_gate);
    let mut update_gate_grad = GateGradient::zeros(&gru.update_gate);
    let mut candidate_gate_grad = GateGradient::zeros(&gru.candidate_gate);
    let mut output_weight_grad = Matrix::zeros(gru.output_weight.dim());
    let mut output_bias_grad = Matrix::zeros(gru.output_bias.dim());

    for timestep in 0..=last_timestep {
        let input = cache.inputs[timestep].t();
        reset_gate_grad.kernel += &input.dot(&cache.reset_gate_deltas[timestep]);
        update_gate_grad.kernel += &input.dot(&cache.update_gate_deltas[timestep]);
        candidate_gate_grad.kernel += &input.dot(&cache.candidate_deltas[timestep]);

        if timestep > 0 {
            let previous_hidden = cache.hiddens[timestep - 1].t();
            reset_gate_grad.recurrent_kernel +=
                &previous_hidden.dot(&cache.reset_gate_deltas[timestep]);
            update_gate_grad.recurrent_kernel +=
                &previous_hidden.dot(&cache.update_gate_deltas[timestep]);
            candidate_gate_grad.recurrent_kernel +=
                &(&cache.reset_gates[timestep] * &cache.hiddens[timestep - 1])
                    .t()
                    .dot(&cache.candidate_deltas[timestep]);
        }

        output_weight_grad += &cache.hiddens[timestep]
            .t()
            .dot(&cache.result_deltas[timestep]);

        reset_gate_grad.bias += &cache.reset_gate_deltas[timestep];
        update_gate_grad.bias += &cache.update_gate_deltas[timestep];
        candidate_gate_grad.bias += &cache.candidate_deltas[timestep];
        output_bias_grad += &cache.result_deltas[timestep];
    }

    let full = full_divisor(last_timestep);
    let recurrent = recurrent_divisor(last_timestep);

    reset_gate_grad.apply(&mut gru.reset_gate, full, recurrent, learning_rate);
    update_gate_grad.apply(&mut gru.update_gate, full, recurrent, learning_rate);
    candidate_gate_grad.apply(&mut gru.candidate_gate, full, recurrent, learning_rate);
    gru.output_weight -= &(output_weight_grad / full * learning_rate);
    gru.output_bias -= &(output_bias_grad / full * learning_rate);
}
