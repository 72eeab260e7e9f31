/// Message text must be strictly shorter than this many characters.
pub const MAX_MESSAGE_LEN: usize = 255;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub message_id: i32,
    pub posted_by: i32,
    pub message_text: String,
    pub time_posted_epoch: i64,
}

/// # Errors
/// Returns a reason when the text is blank or [`MAX_MESSAGE_LEN`] characters or longer.
pub fn validate_text(text: &str) -> Result<(), String> {
    if text.trim().is_empty() {
        return Err("Message text must not be blank".to_string());
    }
    if text.chars().count() >= MAX_MESSAGE_LEN {
        return Err(format!("Message text must be under {MAX_MESSAGE_LEN} characters"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_boundary() {
        assert!(validate_text(&"a".repeat(254)).is_ok());
        assert!(validate_text(&"a".repeat(255)).is_err());
    }

    #[test]
    fn test_blank_rejected() {
        assert!(validate_text("").is_err());
        assert!(validate_text(" \n\t").is_err());
        assert!(validate_text("x").is_ok());
    }
}
