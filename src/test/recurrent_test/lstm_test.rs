use super::*;

#[test]
fn test_construction_validation() {
    let mut initializer = uniform_initializer(42);

    assert!(matches!(
        LSTM::new(0, 3, &mut initializer),
        Err(ModelError::InputValidationError(_))
    ));
    assert!(matches!(
        LSTM::new(2, 0, &mut initializer),
        Err(ModelError::InputValidationError(_))
    ));
}

#[test]
fn test_weight_shapes() {
    let mut initializer = uniform_initializer(42);
    let lstm = LSTM::new(2, 3, &mut initializer).unwrap();

    assert_eq!(lstm.get_input_size(), 2);
    assert_eq!(lstm.get_output_size(), 3);

    assert_eq!(lstm.input_gate.kernel.dim(), (2, 3));
    assert_eq!(lstm.input_gate.recurrent_kernel.dim(), (3, 3));
    assert_eq!(lstm.input_gate.memory_kernel.dim(), (3, 3));
    assert_eq!(lstm.input_gate.bias.dim(), (1, 3));
    assert_eq!(lstm.candidate_gate.kernel.dim(), (2, 3));
    assert_eq!(lstm.candidate_gate.recurrent_kernel.dim(), (3, 3));
    assert_eq!(lstm.output_weight.dim(), (3, 2));
    assert_eq!(lstm.output_bias.dim(), (1, 2));

    // biases start at zero
    assert!(lstm.input_gate.bias.iter().all(|b| *b == 0.0));
    assert!(lstm.output_bias.iter().all(|b| *b == 0.0));
}

#[test]
fn test_first_forward_step_fills_exactly_timestep_zero() {
    let encoder = binary_encoder(&["01"]);
    let mut initializer = uniform_initializer(42);
    let lstm = LSTM::new(encoder.vocabulary_size(), 3, &mut initializer).unwrap();

    let mut cache = LstmCache::new(2, 3);
    cache.push_input(encoder.symbol_vector('0').unwrap().clone());
    lstm.activate(0, &mut cache).unwrap();

    // exactly the timestep-0 entries for every named gate/activation
    assert_eq!(cache.timesteps(), 1);
    assert_eq!(cache.input_gates.len(), 1);
    assert_eq!(cache.forget_gates.len(), 1);
    assert_eq!(cache.candidates.len(), 1);
    assert_eq!(cache.memories.len(), 1);
    assert_eq!(cache.activated_memories.len(), 1);
    assert_eq!(cache.output_gates.len(), 1);
    assert_eq!(cache.hiddens.len(), 1);
    assert!(cache.input(0).is_some());
    assert!(cache.hidden(0).is_some());
    assert!(cache.memory(0).is_some());
    assert!(cache.input(1).is_none());
    assert!(cache.hidden(1).is_none());
    assert!(cache.memory(1).is_none());
    assert_eq!(cache.hidden(0).unwrap().dim(), (1, 3));
    assert_eq!(cache.memory(0).unwrap().dim(), (1, 3));
}

#[test]
fn test_gate_activation_ranges() {
    let encoder = binary_encoder(&["0101"]);
    let mut initializer = uniform_initializer(7);
    let lstm = LSTM::new(encoder.vocabulary_size(), 4, &mut initializer).unwrap();

    let mut cache = LstmCache::new(2, 4);
    for (timestep, symbol) in "010".chars().enumerate() {
        cache.push_input(encoder.symbol_vector(symbol).unwrap().clone());
        lstm.activate(timestep, &mut cache).unwrap();
    }

    for timestep in 0..3 {
        assert!(
            cache.input_gates[timestep]
                .iter()
                .chain(cache.forget_gates[timestep].iter())
                .chain(cache.output_gates[timestep].iter())
                .all(|v| *v > 0.0 && *v < 1.0)
        );
        assert!(
            cache.candidates[timestep]
                .iter()
                .all(|v| *v > -1.0 && *v < 1.0)
        );
    }
}

#[test]
fn test_gate_combination_identities() {
    let encoder = binary_encoder(&["01"]);
    let mut initializer = uniform_initializer(3);
    let lstm = LSTM::new(encoder.vocabulary_size(), 3, &mut initializer).unwrap();

    let mut cache = LstmCache::new(2, 3);
    cache.push_input(encoder.symbol_vector('1').unwrap().clone());
    lstm.activate(0, &mut cache).unwrap();

    // at the sequence start the previous memory is zero, so c_0 = i_0 ⊙ g_0
    let expected_memory = &cache.input_gates[0] * &cache.candidates[0];
    for (actual, expected) in cache.memories[0].iter().zip(expected_memory.iter()) {
        assert_abs_diff_eq!(*actual, *expected, epsilon = 1e-12);
    }

    // h_0 = o_0 ⊙ tanh(c_0)
    let expected_hidden = &cache.output_gates[0] * &cache.memories[0].mapv(f64::tanh);
    for (actual, expected) in cache.hiddens[0].iter().zip(expected_hidden.iter()) {
        assert_abs_diff_eq!(*actual, *expected, epsilon = 1e-12);
    }
}

#[test]
fn test_decode_rows_sum_to_one() {
    let mut initializer = uniform_initializer(42);
    let lstm = LSTM::new(4, 6, &mut initializer).unwrap();

    let hidden = array![[0.3, -0.8, 0.1, 0.9, -0.2, 0.5]];
    let distribution = lstm.decode(&hidden);

    assert_eq!(distribution.dim(), (1, 4));
    assert_abs_diff_eq!(distribution.sum(), 1.0, epsilon = 1e-9);
    assert!(distribution.iter().all(|p| *p > 0.0));
}

#[test]
fn test_activate_rejects_protocol_misuse() {
    let encoder = binary_encoder(&["01"]);
    let mut initializer = uniform_initializer(42);
    let lstm = LSTM::new(encoder.vocabulary_size(), 3, &mut initializer).unwrap();

    // no input pushed at all
    let mut cache = LstmCache::new(2, 3);
    assert!(matches!(
        lstm.activate(0, &mut cache),
        Err(ModelError::ProcessingError(_))
    ));

    // skipping ahead of the executed steps
    cache.push_input(encoder.symbol_vector('0').unwrap().clone());
    assert!(matches!(
        lstm.activate(1, &mut cache),
        Err(ModelError::ProcessingError(_))
    ));

    // re-running an already executed step
    lstm.activate(0, &mut cache).unwrap();
    assert!(matches!(
        lstm.activate(0, &mut cache),
        Err(ModelError::ProcessingError(_))
    ));
}

#[test]
fn test_seeded_construction_is_reproducible() {
    let mut first_initializer = uniform_initializer(42);
    let mut second_initializer = uniform_initializer(42);

    let first = LSTM::new(2, 3, &mut first_initializer).unwrap();
    let second = LSTM::new(2, 3, &mut second_initializer).unwrap();

    assert_eq!(first.input_gate.kernel, second.input_gate.kernel);
    assert_eq!(first.forget_gate.memory_kernel, second.forget_gate.memory_kernel);
    assert_eq!(first.output_weight, second.output_weight);
}
