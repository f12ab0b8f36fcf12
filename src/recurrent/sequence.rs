use super::Matrix;
use ahash::AHashMap;
use ndarray::{ArrayBase, Data, Ix2};

/// Symbol vocabulary and one-hot encoding built from raw training rows.
///
/// Each row becomes one training sequence. Rows are folded to lowercase when
/// ingested, so the vocabulary and the stored sequences always agree and every
/// symbol lookup over a stored sequence succeeds. Symbols are indexed in order
/// of first appearance across all rows.
///
/// # Fields
///
/// - `symbol_index` - Maps each symbol to its vocabulary index
/// - `index_symbol` - Maps each vocabulary index back to its symbol
/// - `symbol_vectors` - Maps each symbol to its `1 x vocabulary` one-hot row
/// - `sequences` - The training sequences, in input order
///
/// # Examples
/// ```rust
/// use rustyrnn::recurrent::SequenceEncoder;
///
/// let encoder = SequenceEncoder::new(&["0110".to_string()]);
/// assert_eq!(encoder.vocabulary_size(), 2);
/// assert_eq!(encoder.symbol_index('0'), Some(0));
/// assert_eq!(encoder.symbol_index('1'), Some(1));
///
/// let one_hot = encoder.symbol_vector('1').unwrap();
/// assert_eq!(one_hot[[0, 0]], 0.0);
/// assert_eq!(one_hot[[0, 1]], 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct SequenceEncoder {
    symbol_index: AHashMap<char, usize>,
    index_symbol: Vec<char>,
    symbol_vectors: AHashMap<char, Matrix>,
    sequences: Vec<String>,
}

impl SequenceEncoder {
    /// Builds the vocabulary and one-hot tables from text rows.
    ///
    /// # Parameters
    ///
    /// - `rows` - Training rows; each row becomes one sequence
    ///
    /// # Returns
    ///
    /// - `Self` - The encoder holding the vocabulary and the lowercased sequences
    pub fn new<S: AsRef<str>>(rows: &[S]) -> Self {
        let mut symbol_index = AHashMap::new();
        let mut index_symbol = Vec::new();
        let mut sequences = Vec::with_capacity(rows.len());

        for row in rows {
            let sequence = row.as_ref().to_lowercase();
            for symbol in sequence.chars() {
                if !symbol_index.contains_key(&symbol) {
                    symbol_index.insert(symbol, index_symbol.len());
                    index_symbol.push(symbol);
                }
            }
            sequences.push(sequence);
        }

        let vocabulary = index_symbol.len();
        let mut symbol_vectors = AHashMap::with_capacity(vocabulary);
        for (&symbol, &index) in &symbol_index {
            let mut one_hot = Matrix::zeros((1, vocabulary));
            one_hot[[0, index]] = 1.0;
            symbol_vectors.insert(symbol, one_hot);
        }

        Self {
            symbol_index,
            index_symbol,
            symbol_vectors,
            sequences,
        }
    }

    /// Builds an encoder from numeric target rows.
    ///
    /// Each row's values are formatted and concatenated character-by-character
    /// into one sequence, keeping the decimal point of whole numbers (`1.0`
    /// contributes the three symbols `1`, `.`, `0`).
    ///
    /// # Parameters
    ///
    /// - `targets` - Numeric targets, one training row per matrix row
    ///
    /// # Returns
    ///
    /// - `Self` - The encoder built from the formatted rows
    ///
    /// # Examples
    /// ```rust
    /// use rustyrnn::recurrent::SequenceEncoder;
    /// use ndarray::array;
    ///
    /// let encoder = SequenceEncoder::from_target_rows(&array![[1.0, 0.5]]);
    /// assert_eq!(encoder.sequences()[0], "1.00.5");
    /// ```
    pub fn from_target_rows<S>(targets: &ArrayBase<S, Ix2>) -> Self
    where
        S: Data<Elem = f64>,
    {
        let rows: Vec<String> = targets
            .rows()
            .into_iter()
            .map(|row| {
                let mut text = String::new();
                for value in row.iter() {
                    text.push_str(&format!("{:?}", value));
                }
                text
            })
            .collect();

        Self::new(&rows)
    }

    /// Gets the number of distinct symbols in the vocabulary.
    ///
    /// # Returns
    ///
    /// - `usize` - The vocabulary size
    pub fn vocabulary_size(&self) -> usize {
        self.index_symbol.len()
    }

    /// Gets the training sequences in input order.
    ///
    /// # Returns
    ///
    /// - `&[String]` - The lowercased sequences
    pub fn sequences(&self) -> &[String] {
        &self.sequences
    }

    /// Gets the vocabulary index of a symbol.
    ///
    /// # Returns
    ///
    /// - `Option<usize>` - The index, or `None` for symbols outside the vocabulary
    pub fn symbol_index(&self, symbol: char) -> Option<usize> {
        self.symbol_index.get(&symbol).copied()
    }

    /// Gets the symbol stored at a vocabulary index.
    ///
    /// # Returns
    ///
    /// - `Option<char>` - The symbol, or `None` for indices outside the vocabulary
    pub fn index_symbol(&self, index: usize) -> Option<char> {
        self.index_symbol.get(index).copied()
    }

    /// Gets the one-hot row vector of a symbol.
    ///
    /// # Returns
    ///
    /// - `Option<&Matrix>` - The `1 x vocabulary` one-hot row, or `None` for symbols outside the vocabulary
    pub fn symbol_vector(&self, symbol: char) -> Option<&Matrix> {
        self.symbol_vectors.get(&symbol)
    }
}
