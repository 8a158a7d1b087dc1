//! User notifications
//!
//! Network and validation code reports through the [`Notifier`] trait rather
//! than a global: the app root provides a [`ToastService`], tests substitute
//! a collecting implementation.

mod toast;

pub use toast::{Toast, ToastHost, ToastKind, ToastService};

pub trait Notifier: Send + Sync {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}

/// Discards every notification
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn success(&self, _message: &str) {}
    fn error(&self, _message: &str) {}
}

#[cfg(test)]
pub mod testing {
    use super::{Notifier, ToastKind};
    use std::sync::Mutex;

    /// Records notifications in order
    #[derive(Debug, Default)]
    pub struct CollectingNotifier {
        events: Mutex<Vec<(ToastKind, String)>>,
    }

    impl CollectingNotifier {
        pub fn events(&self) -> Vec<(ToastKind, String)> {
            self.events.lock().map(|e| e.clone()).unwrap_or_default()
        }

        pub fn errors(&self) -> Vec<String> {
            self.of_kind(ToastKind::Error)
        }

        pub fn successes(&self) -> Vec<String> {
            self.of_kind(ToastKind::Success)
        }

        fn of_kind(&self, kind: ToastKind) -> Vec<String> {
            self.events()
                .into_iter()
                .filter(|(k, _)| *k == kind)
                .map(|(_, m)| m)
                .collect()
        }

        fn push(&self, kind: ToastKind, message: &str) {
            if let Ok(mut events) = self.events.lock() {
                events.push((kind, message.to_string()));
            }
        }
    }

    impl Notifier for CollectingNotifier {
        fn success(&self, message: &str) {
            self.push(ToastKind::Success, message);
        }

        fn error(&self, message: &str) {
            self.push(ToastKind::Error, message);
        }
    }
}
