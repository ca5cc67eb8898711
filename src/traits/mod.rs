/// Boundary validation for request bodies. Runs before any store access.
pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}

pub(crate) fn require_non_blank(field: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{field} must not be empty"));
    }
    Ok(())
}

pub(crate) fn require_max_len(field: &str, value: &str, max: usize) -> Result<(), String> {
    if value.chars().count() > max {
        return Err(format!("{field} must be at most {max} characters"));
    }
    Ok(())
}

impl<T: Validate> Validate for [T] {
    fn validate(&self) -> Result<(), String> {
        for (i, item) in self.iter().enumerate() {
            item.validate().map_err(|e| format!("item {i}: {e}"))?;
        }
        Ok(())
    }
}
