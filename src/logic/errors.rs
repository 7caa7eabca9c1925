use anyhow::Error;

/// Format a collaborator error for display - show the root cause
///
/// Context layers added with `.context(..)` are for the debug log; the user
/// sees the deepest error in the chain, which is the one they can act on.
pub fn format_error_message(error: &Error) -> String {
    error.root_cause().to_string()
}

/// Toast text for a failed background operation
pub fn error_toast(error: &Error) -> String {
    format!("Error: {}", format_error_message(error))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_shows_root_cause() {
        let inner = anyhow::anyhow!("database is locked");
        let outer = inner.context("Failed to save accounts");
        assert_eq!(format_error_message(&outer), "database is locked");
    }

    #[test]
    fn test_format_preserves_simple_errors() {
        let err = anyhow::anyhow!("No accounts found");
        assert_eq!(format_error_message(&err), "No accounts found");
    }

    #[test]
    fn test_error_toast_prefix() {
        let err = anyhow::anyhow!("disk full");
        assert_eq!(error_toast(&err), "Error: disk full");
    }
}
