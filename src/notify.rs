//! User-facing error notification.
//!
//! Pages usually provide a shared "show response" popup. When one is
//! injected the controller uses it; otherwise it falls back to the
//! document's blocking alert.

use std::fmt;

/// A "show response" strategy.
pub trait Notifier {
    /// Show a message to the user.
    fn show_response(&self, message: &str);
}

impl<F> Notifier for F
where
    F: Fn(&str),
{
    fn show_response(&self, message: &str) {
        self(message)
    }
}

/// Format a failure for display: `"Error! {message}"`.
pub fn error_message(message: impl fmt::Display) -> String {
    format!("Error! {}", message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn test_error_message() {
        assert_eq!(error_message("network down"), "Error! network down");
    }

    #[test]
    fn test_closure_notifier() {
        let shown = RefCell::new(Vec::new());
        let notifier = |message: &str| shown.borrow_mut().push(message.to_string());
        notifier.show_response("hello");
        assert_eq!(*shown.borrow(), vec!["hello".to_string()]);
    }
}
