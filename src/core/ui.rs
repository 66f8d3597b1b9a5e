use crate::domain::model::Severity;
use crate::domain::ports::Notifier;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, Mutex, MutexGuard};

pub const SEARCH_INPUT_ID: &str = "search";
pub const REQUEST_SUCCEEDED_MESSAGE: &str = "Operation completed successfully!";
pub const REQUEST_FAILED_MESSAGE: &str = "An error occurred. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModalState {
    pub hidden: bool,
    /// Set while the open animation applies.
    pub entering: bool,
}

impl Default for ModalState {
    fn default() -> Self {
        Self {
            hidden: true,
            entering: false,
        }
    }
}

/// Visibility of the page's modals, keyed by element id.
#[derive(Debug, Clone, Default)]
pub struct ModalSet {
    modals: BTreeMap<String, ModalState>,
}

impl ModalSet {
    pub fn register(&mut self, id: impl Into<String>) {
        self.modals.entry(id.into()).or_default();
    }

    pub fn state(&self, id: &str) -> Option<ModalState> {
        self.modals.get(id).copied()
    }

    pub fn is_open(&self, id: &str) -> bool {
        self.state(id).is_some_and(|state| !state.hidden)
    }

    /// Returns `false` for an unknown id.
    pub fn show(&mut self, id: &str) -> bool {
        match self.modals.get_mut(id) {
            Some(state) => {
                state.hidden = false;
                state.entering = true;
                true
            }
            None => false,
        }
    }

    /// Returns `false` for an unknown id.
    pub fn hide(&mut self, id: &str) -> bool {
        match self.modals.get_mut(id) {
            Some(state) => {
                state.hidden = true;
                state.entering = false;
                true
            }
            None => false,
        }
    }

    /// Hides every open modal and returns how many were open.
    pub fn close_all(&mut self) -> usize {
        let mut closed = 0;
        for state in self.modals.values_mut().filter(|state| !state.hidden) {
            state.hidden = true;
            state.entering = false;
            closed += 1;
        }
        closed
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPress {
    pub key: String,
    pub ctrl: bool,
    pub meta: bool,
}

impl KeyPress {
    pub fn plain(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ctrl: false,
            meta: false,
        }
    }

    pub fn ctrl(key: impl Into<String>) -> Self {
        Self {
            ctrl: true,
            ..Self::plain(key)
        }
    }

    pub fn meta(key: impl Into<String>) -> Self {
        Self {
            meta: true,
            ..Self::plain(key)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    /// Ctrl/Cmd + K. The browser default is suppressed.
    FocusSearch,
    /// Escape.
    CloseModals,
}

impl Shortcut {
    pub fn from_key(press: &KeyPress) -> Option<Self> {
        if (press.ctrl || press.meta) && press.key == "k" {
            Some(Shortcut::FocusSearch)
        } else if press.key == "Escape" {
            Some(Shortcut::CloseModals)
        } else {
            None
        }
    }

    pub fn prevents_default(&self) -> bool {
        matches!(self, Shortcut::FocusSearch)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    Key(KeyPress),
    BackdropClick { modal_id: String },
    /// `tracked` marks elements that show a spinner and report the result.
    RequestStarted { element_id: String, tracked: bool },
    RequestCompleted {
        element_id: String,
        tracked: bool,
        successful: bool,
    },
}

type Handler<E> = Box<dyn FnMut(&E) + Send>;

/// Typed publish/subscribe with explicit registration.
pub struct EventBus<E> {
    handlers: Vec<Handler<E>>,
}

impl<E> EventBus<E> {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, handler: impl FnMut(&E) + Send + 'static) {
        self.handlers.push(Box::new(handler));
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Runs every handler in registration order; returns how many ran.
    pub fn emit(&mut self, event: &E) -> usize {
        for handler in self.handlers.iter_mut() {
            handler(event);
        }
        self.handlers.len()
    }
}

impl<E> Default for EventBus<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Default)]
pub struct UiState {
    pub modals: ModalSet,
    pub focused: Option<String>,
    pub busy: BTreeSet<String>,
}

/// Default page behaviour: shortcuts, modal dismissal and request feedback.
#[derive(Clone)]
pub struct UiController {
    state: Arc<Mutex<UiState>>,
    notifier: Arc<dyn Notifier>,
}

impl UiController {
    pub fn new(state: UiState, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            state: Arc::new(Mutex::new(state)),
            notifier,
        }
    }

    pub fn state(&self) -> MutexGuard<'_, UiState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn attach(&self, bus: &mut EventBus<UiEvent>) {
        let controller = self.clone();
        bus.subscribe(move |event| controller.handle(event));
    }

    pub fn handle(&self, event: &UiEvent) {
        match event {
            UiEvent::Key(press) => self.on_key(press),
            UiEvent::BackdropClick { modal_id } => {
                self.state().modals.hide(modal_id);
            }
            UiEvent::RequestStarted {
                element_id,
                tracked,
            } => {
                if *tracked {
                    self.state().busy.insert(element_id.clone());
                }
            }
            UiEvent::RequestCompleted {
                element_id,
                tracked,
                successful,
            } => {
                if !*tracked {
                    return;
                }
                self.state().busy.remove(element_id);
                if *successful {
                    self.notifier
                        .notify(REQUEST_SUCCEEDED_MESSAGE, Severity::Success);
                } else {
                    self.notifier.notify(REQUEST_FAILED_MESSAGE, Severity::Error);
                }
            }
        }
    }

    fn on_key(&self, press: &KeyPress) {
        let Some(shortcut) = Shortcut::from_key(press) else {
            return;
        };
        tracing::debug!(?shortcut, "keyboard shortcut");
        let mut state = self.state();
        match shortcut {
            Shortcut::FocusSearch => state.focused = Some(SEARCH_INPUT_ID.to_string()),
            Shortcut::CloseModals => {
                state.modals.close_all();
            }
        }
    }
}
