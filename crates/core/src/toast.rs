//! Transient notification state.
//!
//! Every [`ToastState::show`] bumps a generation and returns a ticket for the
//! delayed hide. Only the ticket from the latest show can hide the toast, so
//! a second copy action before the first timer fires supersedes it.

/// Default hide delay for the full page.
pub const DEFAULT_TOAST_MS: u32 = 2000;
/// Hide delay used by the minimal copy-only page.
pub const MINIMAL_TOAST_MS: u32 = 2200;
/// Default success message ("Copied!" in Romanian).
pub const DEFAULT_TOAST_MESSAGE: &str = "Copiat!";

/// Handle for one scheduled hide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToastTicket {
    generation: u64,
    delay_ms: u32,
}

impl ToastTicket {
    pub fn delay_ms(&self) -> u32 {
        self.delay_ms
    }
}

#[derive(Debug, Clone, Default)]
pub struct ToastState {
    message: String,
    visible: bool,
    generation: u64,
}

impl ToastState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shows `message` now and returns the ticket that hides it after
    /// `delay_ms`.
    pub fn show(&mut self, message: &str, delay_ms: u32) -> ToastTicket {
        self.generation += 1;
        self.message.clear();
        self.message.push_str(message);
        self.visible = true;
        ToastTicket {
            generation: self.generation,
            delay_ms,
        }
    }

    /// Hides the toast if `ticket` belongs to the latest show.
    ///
    /// Returns whether the toast was hidden.
    pub fn expire(&mut self, ticket: ToastTicket) -> bool {
        if ticket.generation != self.generation || !self.visible {
            return false;
        }
        self.visible = false;
        true
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
