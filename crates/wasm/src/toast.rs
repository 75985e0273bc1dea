//! Toast element bound to [`ToastState`].

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use web_sys::HtmlElement;
use zettacars_ui_core::{ToastState, ToastTicket};

use crate::dom;

pub struct ToastView {
    element: Option<HtmlElement>,
    state: ToastState,
    /// Pending hide. Replacing it cancels the previous timer.
    timeout: Option<Timeout>,
}

impl ToastView {
    pub fn new(element: Option<HtmlElement>) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self {
            element,
            state: ToastState::new(),
            timeout: None,
        }))
    }

    /// Shows `message` and schedules the hide after `delay_ms`.
    pub fn show(view: &Rc<RefCell<Self>>, message: &str, delay_ms: u32) {
        let weak = Rc::downgrade(view);
        let mut this = view.borrow_mut();
        let ticket = this.state.show(message, delay_ms);
        if let Some(el) = &this.element {
            el.set_text_content(Some(message));
            el.set_hidden(false);
            dom::set_style(el, "opacity", "1");
        }
        this.timeout = Some(Timeout::new(ticket.delay_ms(), move || {
            if let Some(view) = weak.upgrade() {
                view.borrow_mut().expire(ticket);
            }
        }));
    }

    // Leaves `timeout` in place: it is the timer currently firing.
    fn expire(&mut self, ticket: ToastTicket) {
        if !self.state.expire(ticket) {
            return;
        }
        if let Some(el) = &self.element {
            dom::set_style(el, "opacity", "0");
            el.set_hidden(true);
        }
    }
}
