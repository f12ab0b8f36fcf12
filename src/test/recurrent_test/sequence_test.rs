use super::*;

#[test]
fn test_vocabulary_built_in_first_appearance_order() {
    let encoder = binary_encoder(&["0110"]);

    assert_eq!(encoder.vocabulary_size(), 2);
    assert_eq!(encoder.symbol_index('0'), Some(0));
    assert_eq!(encoder.symbol_index('1'), Some(1));
    assert_eq!(encoder.index_symbol(0), Some('0'));
    assert_eq!(encoder.index_symbol(1), Some('1'));
    assert_eq!(encoder.index_symbol(2), None);
}

#[test]
fn test_one_hot_vectors() {
    let encoder = binary_encoder(&["01"]);

    let zero = encoder.symbol_vector('0').unwrap();
    assert_eq!(zero.dim(), (1, 2));
    assert_abs_diff_eq!(zero[[0, 0]], 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(zero[[0, 1]], 0.0, epsilon = 1e-12);

    let one = encoder.symbol_vector('1').unwrap();
    assert_abs_diff_eq!(one[[0, 0]], 0.0, epsilon = 1e-12);
    assert_abs_diff_eq!(one[[0, 1]], 1.0, epsilon = 1e-12);

    assert!(encoder.symbol_vector('x').is_none());
}

#[test]
fn test_rows_folded_to_lowercase() {
    let encoder = SequenceEncoder::new(&["AbA"]);

    assert_eq!(encoder.vocabulary_size(), 2);
    assert_eq!(encoder.sequences(), &["aba".to_string()]);
    assert_eq!(encoder.symbol_index('a'), Some(0));
    assert_eq!(encoder.symbol_index('A'), None);

    // every symbol of every stored sequence resolves to a one-hot vector
    for sequence in encoder.sequences() {
        for symbol in sequence.chars() {
            assert!(encoder.symbol_vector(symbol).is_some());
        }
    }
}

#[test]
fn test_vocabulary_spans_all_rows() {
    let encoder = SequenceEncoder::new(&["ab", "bc", "ca"]);

    assert_eq!(encoder.vocabulary_size(), 3);
    assert_eq!(encoder.sequences().len(), 3);
    assert_eq!(encoder.symbol_index('a'), Some(0));
    assert_eq!(encoder.symbol_index('b'), Some(1));
    assert_eq!(encoder.symbol_index('c'), Some(2));
}

#[test]
fn test_from_target_rows_concatenates_display_forms() {
    let encoder = SequenceEncoder::from_target_rows(&array![[1.0, 0.5]]);

    assert_eq!(encoder.sequences(), &["1.00.5".to_string()]);
    // symbols: '1', '.', '0', '5'
    assert_eq!(encoder.vocabulary_size(), 4);
    assert_eq!(encoder.symbol_index('1'), Some(0));
    assert_eq!(encoder.symbol_index('.'), Some(1));
    assert_eq!(encoder.symbol_index('0'), Some(2));
    assert_eq!(encoder.symbol_index('5'), Some(3));
}

#[test]
fn test_from_target_rows_one_sequence_per_row() {
    let encoder = SequenceEncoder::from_target_rows(&array![[1.0], [2.0], [1.0]]);

    assert_eq!(
        encoder.sequences(),
        &["1.0".to_string(), "2.0".to_string(), "1.0".to_string()]
    );
}
