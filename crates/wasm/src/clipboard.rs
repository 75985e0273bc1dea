//! Browser clipboard strategies and the copy button wiring.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{Document, HtmlDocument, HtmlElement, HtmlTextAreaElement, Window};
use zettacars_ui_core::clipboard::CopyFuture;
use zettacars_ui_core::{ClipboardStrategy, CopyChain, CopyOutcome, PageConfig, UiError};

use crate::dom::{self, dom_err, Listener};
use crate::toast::ToastView;

/// `navigator.clipboard.writeText`.
pub struct AsyncClipboard {
    window: Window,
}

impl AsyncClipboard {
    const NAME: &'static str = "async-clipboard";

    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl ClipboardStrategy for AsyncClipboard {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn write<'a>(&'a self, text: &'a str) -> CopyFuture<'a> {
        Box::pin(async move {
            let navigator = self.window.navigator();
            // Insecure contexts expose no `clipboard` property at all.
            let present = js_sys::Reflect::get(&navigator, &JsValue::from_str("clipboard"))
                .map(|v| !v.is_undefined() && !v.is_null())
                .unwrap_or(false);
            if !present {
                return Err(failure(Self::NAME, "navigator.clipboard unavailable"));
            }
            JsFuture::from(navigator.clipboard().write_text(text))
                .await
                .map_err(|e| failure(Self::NAME, dom_err(e)))?;
            Ok(CopyOutcome::Copied)
        })
    }
}

/// Off-screen `<textarea>` plus `document.execCommand("copy")`.
pub struct ExecCommandCopy {
    document: Document,
}

impl ExecCommandCopy {
    const NAME: &'static str = "exec-command";

    pub fn new(document: Document) -> Self {
        Self { document }
    }

    fn copy_sync(&self, text: &str) -> Result<(), UiError> {
        let body = self
            .document
            .body()
            .ok_or_else(|| failure(Self::NAME, "document has no body"))?;
        let area = self
            .document
            .create_element("textarea")
            .map_err(|e| failure(Self::NAME, dom_err(e)))?
            .dyn_into::<HtmlTextAreaElement>()
            .map_err(|_| failure(Self::NAME, "textarea cast failed"))?;
        area.set_value(text);
        let _ = area.set_attribute("readonly", "");
        dom::set_style(&area, "position", "fixed");
        dom::set_style(&area, "left", "-9999px");
        body.append_child(&area)
            .map_err(|e| failure(Self::NAME, dom_err(e)))?;
        area.select();

        let copied = self
            .document
            .dyn_ref::<HtmlDocument>()
            .ok_or_else(|| failure(Self::NAME, "not an HTML document"))
            .and_then(|doc| {
                doc.exec_command("copy")
                    .map_err(|e| failure(Self::NAME, dom_err(e)))
            });
        let _ = body.remove_child(&area);

        match copied? {
            true => Ok(()),
            false => Err(failure(Self::NAME, "execCommand(\"copy\") returned false")),
        }
    }
}

impl ClipboardStrategy for ExecCommandCopy {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn write<'a>(&'a self, text: &'a str) -> CopyFuture<'a> {
        Box::pin(async move {
            self.copy_sync(text)?;
            Ok(CopyOutcome::Copied)
        })
    }
}

/// Opens a `mailto:` draft carrying the text. Nothing reaches the
/// clipboard, so the outcome is a hand-off.
pub struct MailtoComposer {
    window: Window,
    fallback_to: Option<String>,
}

impl MailtoComposer {
    const NAME: &'static str = "mailto";

    pub fn new(window: Window, fallback_to: Option<String>) -> Self {
        Self {
            window,
            fallback_to,
        }
    }
}

impl ClipboardStrategy for MailtoComposer {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn write<'a>(&'a self, text: &'a str) -> CopyFuture<'a> {
        Box::pin(async move {
            let href = mailto_href(text, self.fallback_to.as_deref(), |s| {
                String::from(js_sys::encode_uri_component(s))
            });
            self.window
                .location()
                .set_href(&href)
                .map_err(|e| failure(Self::NAME, dom_err(e)))?;
            Ok(CopyOutcome::HandedOff)
        })
    }
}

/// `mailto:` link for `text`. An address is used as the recipient;
/// anything else goes in the body, addressed to `fallback_to` if given.
fn mailto_href(text: &str, fallback_to: Option<&str>, encode: impl Fn(&str) -> String) -> String {
    let text = text.trim();
    if text.contains('@') && !text.contains(char::is_whitespace) {
        return format!("mailto:{}", encode(text));
    }
    let to = fallback_to.map(&encode).unwrap_or_default();
    format!("mailto:{to}?body={}", encode(text))
}

fn failure(strategy: &'static str, reason: impl ToString) -> UiError {
    UiError::Clipboard {
        strategy,
        reason: reason.to_string(),
    }
}

/// The strategy chain for `config`, in fallback order.
pub fn chain(window: &Window, document: &Document, config: &PageConfig) -> CopyChain {
    let chain = CopyChain::new()
        .with(AsyncClipboard::new(window.clone()))
        .with(ExecCommandCopy::new(document.clone()));
    if config.mailto_fallback {
        chain.with(MailtoComposer::new(window.clone(), config.mailto_to.clone()))
    } else {
        chain
    }
}

/// Where a copy button takes its text from.
pub enum CopySource {
    Fixed(String),
    /// The button's `data-copy` attribute. A missing or empty attribute
    /// makes the click a no-op.
    DataAttribute,
}

impl CopySource {
    fn resolve(&self, button: &HtmlElement) -> Option<String> {
        match self {
            CopySource::Fixed(text) => Some(text.clone()),
            CopySource::DataAttribute => button.get_attribute("data-copy").filter(|v| !v.is_empty()),
        }
    }
}

/// Copies on click and shows the toast once something reached the clipboard.
pub fn bind_button(
    button: &HtmlElement,
    source: CopySource,
    chain: Rc<CopyChain>,
    toast: Rc<RefCell<ToastView>>,
    message: String,
    delay_ms: u32,
) -> Result<Listener, UiError> {
    let target = button.clone();
    Listener::new(button.as_ref(), "click", move |_| {
        let Some(text) = source.resolve(&target) else {
            log::debug!("copy button without data-copy; ignored");
            return;
        };
        let chain = Rc::clone(&chain);
        let toast = Rc::clone(&toast);
        let message = message.clone();
        spawn_local(async move {
            match chain.copy(&text).await {
                Ok(delivery) if delivery.should_toast() => {
                    ToastView::show(&toast, &message, delay_ms);
                }
                Ok(delivery) => log::info!("copy handed off via {}", delivery.strategy),
                Err(e) => log::warn!("copy failed: {e}"),
            }
        });
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(s: &str) -> String {
        s.replace(' ', "%20").replace('@', "%40")
    }

    #[test]
    fn address_becomes_recipient() {
        assert_eq!(
            mailto_href("office@zettacars.ro", None, plain),
            "mailto:office%40zettacars.ro"
        );
    }

    #[test]
    fn plain_text_goes_in_body() {
        assert_eq!(
            mailto_href("zettacars.ro", Some("me@x.ro"), plain),
            "mailto:me%40x.ro?body=zettacars.ro"
        );
        assert_eq!(mailto_href("zettacars.ro", None, plain), "mailto:?body=zettacars.ro");
    }

    #[test]
    fn text_with_spaces_is_not_an_address() {
        assert_eq!(
            mailto_href("write to a@b.ro", None, plain),
            "mailto:?body=write%20to%20a%40b.ro"
        );
    }
}
