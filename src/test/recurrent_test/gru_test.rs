use super::*;

#[test]
fn test_construction_validation() {
    let mut initializer = uniform_initializer(42);

    assert!(matches!(
        GRU::new(0, 3, &mut initializer),
        Err(ModelError::InputValidationError(_))
    ));
    assert!(matches!(
        GRU::new(2, 0, &mut initializer),
        Err(ModelError::InputValidationError(_))
    ));
}

#[test]
fn test_weight_shapes() {
    let mut initializer = uniform_initializer(42);
    let gru = GRU::new(2, 3, &mut initializer).unwrap();

    assert_eq!(gru.get_input_size(), 2);
    assert_eq!(gru.get_output_size(), 3);

    assert_eq!(gru.reset_gate.kernel.dim(), (2, 3));
    assert_eq!(gru.reset_gate.recurrent_kernel.dim(), (3, 3));
    assert_eq!(gru.reset_gate.bias.dim(), (1, 3));
    assert_eq!(gru.update_gate.kernel.dim(), (2, 3));
    assert_eq!(gru.candidate_gate.kernel.dim(), (2, 3));
    assert_eq!(gru.output_weight.dim(), (3, 2));
    assert_eq!(gru.output_bias.dim(), (1, 2));

    // biases start at zero
    assert!(gru.reset_gate.bias.iter().all(|b| *b == 0.0));
    assert!(gru.output_bias.iter().all(|b| *b == 0.0));
}

#[test]
fn test_first_forward_step_fills_exactly_timestep_zero() {
    let encoder = binary_encoder(&["01"]);
    let mut initializer = uniform_initializer(42);
    let gru = GRU::new(encoder.vocabulary_size(), 3, &mut initializer).unwrap();

    let mut cache = GruCache::new(2, 3);
    cache.push_input(encoder.symbol_vector('0').unwrap().clone());
    gru.activate(0, &mut cache).unwrap();

    // exactly the timestep-0 entries for every named gate/activation
    assert_eq!(cache.timesteps(), 1);
    assert_eq!(cache.reset_gates.len(), 1);
    assert_eq!(cache.update_gates.len(), 1);
    assert_eq!(cache.candidates.len(), 1);
    assert_eq!(cache.hiddens.len(), 1);
    assert!(cache.input(0).is_some());
    assert!(cache.hidden(0).is_some());
    assert!(cache.input(1).is_none());
    assert!(cache.hidden(1).is_none());
    assert_eq!(cache.hidden(0).unwrap().dim(), (1, 3));
}

#[test]
fn test_gate_activation_ranges() {
    let encoder = binary_encoder(&["0101"]);
    let mut initializer = uniform_initializer(7);
    let gru = GRU::new(encoder.vocabulary_size(), 4, &mut initializer).unwrap();

    let mut cache = GruCache::new(2, 4);
    for (timestep, symbol) in "010".chars().enumerate() {
        cache.push_input(encoder.symbol_vector(symbol).unwrap().clone());
        gru.activate(timestep, &mut cache).unwrap();
    }

    for timestep in 0..3 {
        assert!(
            cache.reset_gates[timestep]
                .iter()
                .chain(cache.update_gates[timestep].iter())
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
fn test_hidden_interpolation_identity() {
    let encoder = binary_encoder(&["01"]);
    let mut initializer = uniform_initializer(3);
    let gru = GRU::new(encoder.vocabulary_size(), 3, &mut initializer).unwrap();

    let mut cache = GruCache::new(2, 3);
    cache.push_input(encoder.symbol_vector('1').unwrap().clone());
    gru.activate(0, &mut cache).unwrap();

    // at the sequence start the previous hidden is zero, so h_0 = z_0 ⊙ g_0
    let expected_hidden = &cache.update_gates[0] * &cache.candidates[0];
    for (actual, expected) in cache.hiddens[0].iter().zip(expected_hidden.iter()) {
        assert_abs_diff_eq!(*actual, *expected, epsilon = 1e-12);
    }
}

#[test]
fn test_decode_rows_sum_to_one() {
    let mut initializer = uniform_initializer(42);
    let gru = GRU::new(5, 4, &mut initializer).unwrap();

    let hidden = array![[0.7, -0.4, 0.0, 1.2]];
    let distribution = gru.decode(&hidden);

    assert_eq!(distribution.dim(), (1, 5));
    assert_abs_diff_eq!(distribution.sum(), 1.0, epsilon = 1e-9);
    assert!(distribution.iter().all(|p| *p > 0.0));
}

#[test]
fn test_activate_rejects_protocol_misuse() {
    let encoder = binary_encoder(&["01"]);
    let mut initializer = uniform_initializer(42);
    let gru = GRU::new(encoder.vocabulary_size(), 3, &mut initializer).unwrap();

    let mut cache = GruCache::new(2, 3);
    assert!(matches!(
        gru.activate(0, &mut cache),
        Err(ModelError::ProcessingError(_))
    ));

    cache.push_input(encoder.symbol_vector('0').unwrap().clone());
    assert!(matches!(
        gru.activate(1, &mut cache),
        Err(ModelError::ProcessingError(_))
    ));

    gru.activate(0, &mut cache).unwrap();
    assert!(matches!(
        gru.activate(0, &mut cache),
        Err(ModelError::ProcessingError(_))
    ));
}
