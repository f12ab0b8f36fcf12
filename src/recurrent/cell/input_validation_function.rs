use crate::ModelError;

/// Validates that a cell dimension is greater than 0
///
/// # Parameters
///
/// - `value` - The dimension value to validate
/// - `name` - The name of the dimension for error messages
///
/// # Returns
///
/// * `Ok(())` if validation passes
/// * `Err(ModelError)` if validation fails
pub(super) fn validate_dimension_greater_than_zero(
    value: usize,
    name: &str,
) -> Result<(), ModelError> {
    if value == 0 {
        return Err(ModelError::InputValidationError(format!(
            "{} must be greater than 0",
            name
        )));
    }
    Ok(())
}

/// Validates the dimensions a recurrent cell is constructed with
///
/// # Parameters
///
/// - `input_size` - The vocabulary size to validate
/// - `output_size` - The hidden size to validate
///
/// # Returns
///
/// * `Ok(())` if validation passes
/// * `Err(ModelError)` if validation fails
pub(super) fn validate_cell_dimensions(
    input_size: usize,
    output_size: usize,
) -> Result<(), ModelError> {
    validate_dimension_greater_than_zero(input_size, "input_size")?;
    validate_dimension_greater_than_zero(output_size, "output_size")?;
    Ok(())
}
