use std::sync::Arc;
use tokio::sync::watch;

/// Lifecycle of one published value on a screen
#[derive(Debug, Clone, PartialEq)]
pub enum UiState<T> {
    Loading,
    Success(T),
    Error(String),
}

impl<T> Default for UiState<T> {
    fn default() -> Self {
        UiState::Loading
    }
}

impl<T> UiState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, UiState::Loading)
    }

    pub fn success(&self) -> Option<&T> {
        match self {
            UiState::Success(value) => Some(value),
            UiState::Loading | UiState::Error(_) => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            UiState::Error(message) => Some(message),
            UiState::Loading | UiState::Success(_) => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> UiState<U> {
        match self {
            UiState::Loading => UiState::Loading,
            UiState::Success(value) => UiState::Success(f(value)),
            UiState::Error(message) => UiState::Error(message),
        }
    }
}

/// One published state slot of a controller. Only the owning controller
/// writes; views hold receivers.
#[derive(Debug)]
pub struct Slot<T> {
    tx: Arc<watch::Sender<UiState<T>>>,
}

impl<T> Clone for Slot<T> {
    fn clone(&self) -> Self {
        Self { tx: Arc::clone(&self.tx) }
    }
}

impl<T: Clone> Slot<T> {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(UiState::Loading);
        Self { tx: Arc::new(tx) }
    }

    pub fn subscribe(&self) -> watch::Receiver<UiState<T>> {
        self.tx.subscribe()
    }

    pub fn current(&self) -> UiState<T> {
        self.tx.borrow().clone()
    }

    pub(crate) fn set(&self, state: UiState<T>) {
        self.tx.send_replace(state);
    }

    pub(crate) fn loading(&self) {
        self.set(UiState::Loading);
    }
}

impl<T: Clone> Default for Slot<T> {
    fn default() -> Self {
        Self::new()
    }
}
