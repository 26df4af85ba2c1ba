use meta_core::{MetaError, Result};

/// Reject blank required parameters before any request is made.
pub(crate) fn require(name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(MetaError::InvalidArgument(format!("{name} must not be empty")));
    }
    Ok(())
}
