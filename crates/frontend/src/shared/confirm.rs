/// Blocking yes/no question to the user. Must be answered before any
/// mutating request that depends on it is issued.
pub trait Confirm {
    fn confirm(&self, message: &str) -> bool;
}

/// `window.confirm()`; without a window the answer is "no"
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserConfirm;

impl Confirm for BrowserConfirm {
    fn confirm(&self, message: &str) -> bool {
        web_sys::window()
            .and_then(|w| w.confirm_with_message(message).ok())
            .unwrap_or(false)
    }
}
