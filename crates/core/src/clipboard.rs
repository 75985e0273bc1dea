//! Ordered clipboard strategies.
//!
//! A [`CopyChain`] tries each [`ClipboardStrategy`] in order and stops at the
//! first that delivers. Individual failures are logged and swallowed; only a
//! chain with every strategy failed reports an error.

use std::cell::RefCell;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;

use crate::error::UiError;

/// Text copied by the primary "copy domain" button.
pub const DOMAIN_TEXT: &str = "zettacars.ro";

/// Future returned by [`ClipboardStrategy::write`].
pub type CopyFuture<'a> = Pin<Box<dyn Future<Output = Result<CopyOutcome, UiError>> + 'a>>;

/// How a strategy delivered the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    /// The text is on the clipboard; confirm with a toast.
    Copied,
    /// The text was handed to another application (e.g. a mail composer);
    /// the page is navigating away, so no toast.
    HandedOff,
}

/// One way of getting text to the user.
pub trait ClipboardStrategy {
    /// Short identifier used in logs and errors.
    fn name(&self) -> &'static str;

    fn write<'a>(&'a self, text: &'a str) -> CopyFuture<'a>;
}

/// Successful result of a [`CopyChain::copy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delivery {
    pub strategy: &'static str,
    pub outcome: CopyOutcome,
    /// Strategies that failed before this one.
    pub failed_attempts: usize,
}

impl Delivery {
    pub fn should_toast(&self) -> bool {
        self.outcome == CopyOutcome::Copied
    }
}

#[derive(Default)]
pub struct CopyChain {
    strategies: Vec<Box<dyn ClipboardStrategy>>,
}

impl CopyChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a strategy tried after all previously added ones.
    pub fn with(mut self, strategy: impl ClipboardStrategy + 'static) -> Self {
        self.strategies.push(Box::new(strategy));
        self
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Tries every strategy in order until one succeeds.
    pub async fn copy(&self, text: &str) -> Result<Delivery, UiError> {
        for (failed_attempts, strategy) in self.strategies.iter().enumerate() {
            match strategy.write(text).await {
                Ok(outcome) => {
                    log::debug!("copied via {}", strategy.name());
                    return Ok(Delivery {
                        strategy: strategy.name(),
                        outcome,
                        failed_attempts,
                    });
                }
                Err(e) => log::debug!("{e}; trying next strategy"),
            }
        }
        log::warn!("copy failed: no clipboard strategy succeeded");
        Err(UiError::ClipboardExhausted {
            attempts: self.strategies.len(),
        })
    }
}

/// In-memory clipboard for tests and headless runs.
///
/// `failing(...)` builds one that always rejects, standing in for a denied
/// or missing platform API.
pub struct MemoryClipboard {
    name: &'static str,
    contents: Rc<RefCell<Option<String>>>,
    fail: bool,
}

impl MemoryClipboard {
    pub fn new(name: &'static str, contents: Rc<RefCell<Option<String>>>) -> Self {
        Self {
            name,
            contents,
            fail: false,
        }
    }

    pub fn failing(name: &'static str) -> Self {
        Self {
            name,
            contents: Default::default(),
            fail: true,
        }
    }
}

impl ClipboardStrategy for MemoryClipboard {
    fn name(&self) -> &'static str {
        self.name
    }

    fn write<'a>(&'a self, text: &'a str) -> CopyFuture<'a> {
        Box::pin(async move {
            if self.fail {
                return Err(UiError::Clipboard {
                    strategy: self.name,
                    reason: "NotAllowedError: write permission denied".to_string(),
                });
            }
            *self.contents.borrow_mut() = Some(text.to_string());
            Ok(CopyOutcome::Copied)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct HandOff;

    impl ClipboardStrategy for HandOff {
        fn name(&self) -> &'static str {
            "mailto"
        }

        fn write<'a>(&'a self, _text: &'a str) -> CopyFuture<'a> {
            Box::pin(async { Ok(CopyOutcome::HandedOff) })
        }
    }

    fn board() -> Rc<RefCell<Option<String>>> {
        Rc::new(RefCell::new(None))
    }

    #[test]
    fn primary_path_puts_domain_on_clipboard() {
        let contents = board();
        let chain = CopyChain::new()
            .with(MemoryClipboard::new("async-clipboard", Rc::clone(&contents)))
            .with(MemoryClipboard::failing("exec-command"));

        let delivery = pollster::block_on(chain.copy(DOMAIN_TEXT)).unwrap();
        assert_eq!(delivery.strategy, "async-clipboard");
        assert_eq!(delivery.failed_attempts, 0);
        assert!(delivery.should_toast());
        assert_eq!(contents.borrow().as_deref(), Some("zettacars.ro"));
    }

    #[test]
    fn fallback_path_still_copies_when_primary_fails() {
        let contents = board();
        let chain = CopyChain::new()
            .with(MemoryClipboard::failing("async-clipboard"))
            .with(MemoryClipboard::new("exec-command", Rc::clone(&contents)));

        let delivery = pollster::block_on(chain.copy(DOMAIN_TEXT)).unwrap();
        assert_eq!(delivery.strategy, "exec-command");
        assert_eq!(delivery.failed_attempts, 1);
        assert_eq!(contents.borrow().as_deref(), Some("zettacars.ro"));
    }

    #[test]
    fn later_strategies_are_not_tried_after_success() {
        let first = board();
        let second = board();
        let chain = CopyChain::new()
            .with(MemoryClipboard::new("a", Rc::clone(&first)))
            .with(MemoryClipboard::new("b", Rc::clone(&second)));

        pollster::block_on(chain.copy("x")).unwrap();
        assert!(second.borrow().is_none());
    }

    #[test]
    fn last_resort_hand_off_suppresses_toast() {
        let chain = CopyChain::new()
            .with(MemoryClipboard::failing("async-clipboard"))
            .with(MemoryClipboard::failing("exec-command"))
            .with(HandOff);

        let delivery = pollster::block_on(chain.copy("hello@zettacars.ro")).unwrap();
        assert_eq!(delivery.outcome, CopyOutcome::HandedOff);
        assert_eq!(delivery.failed_attempts, 2);
        assert!(!delivery.should_toast());
    }

    #[test]
    fn exhausted_chain_reports_attempts() {
        let chain = CopyChain::new()
            .with(MemoryClipboard::failing("a"))
            .with(MemoryClipboard::failing("b"));
        let err = pollster::block_on(chain.copy("x")).unwrap_err();
        assert!(matches!(err, UiError::ClipboardExhausted { attempts: 2 }));
    }

    #[test]
    fn empty_chain_is_exhausted_immediately() {
        let chain = CopyChain::new();
        assert!(chain.is_empty());
        let err = pollster::block_on(chain.copy("x")).unwrap_err();
        assert!(matches!(err, UiError::ClipboardExhausted { attempts: 0 }));
    }

    #[test]
    fn names_preserve_order() {
        let chain = CopyChain::new()
            .with(MemoryClipboard::failing("async-clipboard"))
            .with(HandOff);
        assert_eq!(chain.names(), vec!["async-clipboard", "mailto"]);
        assert_eq!(chain.len(), 2);
    }
}
