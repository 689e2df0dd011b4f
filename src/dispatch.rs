use std::collections::HashMap;

use tracing::{debug, trace};

use crate::page::{ElementId, Page};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    Input,
    Change,
    Submit,
}

/// Notification handed to a handler. Carries the triggering element's
/// identity and the capability to suppress the environment's default
/// reaction, which must be invoked before the handler returns to take
/// effect.
pub struct EventContext<'a> {
    pub target: ElementId,
    pub kind: EventKind,
    pub page: &'a mut Page,
    default_prevented: bool,
}

impl EventContext<'_> {
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// Write one demonstration line to the console sink.
    pub fn log(&mut self, line: impl Into<String>) {
        let line = line.into();
        debug!("{}: {}", self.target, line);
        self.page.console.log(line);
    }
}

pub type Handler = Box<dyn FnMut(&mut EventContext<'_>)>;

/// Maps (element, event kind) pairs to their registered handlers and runs
/// them one at a time, in registration order.
#[derive(Default)]
pub struct Dispatcher {
    listeners: HashMap<(ElementId, EventKind), Vec<Handler>>,
}

impl Dispatcher {
    pub fn add_listener(&mut self, target: ElementId, kind: EventKind, handler: Handler) {
        trace!("Registered {kind:?} listener on {target}");
        self.listeners.entry((target, kind)).or_default().push(handler);
    }

    /// Deliver one event. Handlers run to completion before the default
    /// reaction is considered; a submission whose default was not suppressed
    /// resets the whole page.
    pub fn dispatch(&mut self, page: &mut Page, target: ElementId, kind: EventKind) {
        trace!("Dispatch {kind:?} on {target}");
        let mut default_prevented = false;
        if let Some(handlers) = self.listeners.get_mut(&(target, kind)) {
            for handler in handlers.iter_mut() {
                let mut ctx = EventContext {
                    target,
                    kind,
                    page: &mut *page,
                    default_prevented: false,
                };
                handler(&mut ctx);
                default_prevented |= ctx.default_prevented;
            }
        }
        if !default_prevented {
            Self::run_default(page, target, kind);
        }
    }

    fn run_default(page: &mut Page, target: ElementId, kind: EventKind) {
        match kind {
            EventKind::Submit => {
                debug!("Default submit reaction on {target}, resetting the page");
                page.reset();
            }
            EventKind::Click | EventKind::Input | EventKind::Change => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    fn setup() -> (Dispatcher, Page) {
        (Dispatcher::default(), Page::new(10))
    }

    #[test]
    fn handler_receives_the_triggering_element() {
        let (mut dispatcher, mut page) = setup();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        dispatcher.add_listener(
            ElementId::Btn2,
            EventKind::Click,
            Box::new(move |ctx| sink.borrow_mut().push(ctx.target)),
        );

        dispatcher.dispatch(&mut page, ElementId::Btn2, EventKind::Click);

        assert_eq!(*seen.borrow(), [ElementId::Btn2]);
    }

    #[test]
    fn handlers_only_fire_for_their_event_kind() {
        let (mut dispatcher, mut page) = setup();
        let calls = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&calls);
        dispatcher.add_listener(
            ElementId::Check1,
            EventKind::Change,
            Box::new(move |_ctx| *sink.borrow_mut() += 1),
        );

        dispatcher.dispatch(&mut page, ElementId::Check1, EventKind::Click);
        dispatcher.dispatch(&mut page, ElementId::Btn1, EventKind::Change);
        assert_eq!(*calls.borrow(), 0);

        dispatcher.dispatch(&mut page, ElementId::Check1, EventKind::Change);
        assert_eq!(*calls.borrow(), 1);
    }

    #[test]
    fn multiple_handlers_run_in_registration_order() {
        let (mut dispatcher, mut page) = setup();
        let order = Rc::new(RefCell::new(Vec::new()));
        for tag in ["one", "two", "three"] {
            let sink = Rc::clone(&order);
            dispatcher.add_listener(
                ElementId::Btn1,
                EventKind::Click,
                Box::new(move |_ctx| sink.borrow_mut().push(tag)),
            );
        }

        dispatcher.dispatch(&mut page, ElementId::Btn1, EventKind::Click);

        assert_eq!(*order.borrow(), ["one", "two", "three"]);
    }

    #[test]
    fn unhandled_submission_resets_the_page() {
        let (mut dispatcher, mut page) = setup();
        page.first.value = "Ada".to_string();
        page.console.log("about to be lost");

        dispatcher.dispatch(&mut page, ElementId::NameForm, EventKind::Submit);

        assert!(page.first.value.is_empty());
        assert_eq!(page.console.last(), None);
    }

    #[test]
    fn prevent_default_keeps_the_page_state() {
        let (mut dispatcher, mut page) = setup();
        page.first.value = "Ada".to_string();
        dispatcher.add_listener(
            ElementId::NameForm,
            EventKind::Submit,
            Box::new(|ctx| ctx.prevent_default()),
        );

        dispatcher.dispatch(&mut page, ElementId::NameForm, EventKind::Submit);

        assert_eq!(page.first.value, "Ada");
    }

    #[test]
    fn clicks_have_no_default_reaction() {
        let (mut dispatcher, mut page) = setup();
        page.input1.value = "kept".to_string();

        dispatcher.dispatch(&mut page, ElementId::Btn1, EventKind::Click);
        dispatcher.dispatch(&mut page, ElementId::Input1, EventKind::Input);
        dispatcher.dispatch(&mut page, ElementId::Drop1, EventKind::Change);

        assert_eq!(page.input1.value, "kept");
    }

    #[test]
    fn context_log_reaches_the_console() {
        let (mut dispatcher, mut page) = setup();
        dispatcher.add_listener(
            ElementId::Btn1,
            EventKind::Click,
            Box::new(|ctx| ctx.log("I was clicked")),
        );

        dispatcher.dispatch(&mut page, ElementId::Btn1, EventKind::Click);

        assert_eq!(page.console.last(), Some("I was clicked"));
    }
}
