//! Transient toast notifications.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Maximum number of toasts kept at once; older ones are dropped first.
const MAX_TOASTS: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

impl ToastKind {
    /// Leading glyph shown before the message
    pub fn icon(&self) -> &'static str {
        match self {
            ToastKind::Success => "✔",
            ToastKind::Error => "✖",
            ToastKind::Info => "ℹ",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
    pub created: Instant,
}

/// Queue of live toasts
#[derive(Debug)]
pub struct Notifications {
    toasts: VecDeque<Toast>,
    lifetime: Duration,
}

impl Notifications {
    pub fn new(lifetime: Duration) -> Self {
        Self {
            toasts: VecDeque::new(),
            lifetime,
        }
    }

    pub fn push(&mut self, kind: ToastKind, message: impl Into<String>) {
        self.push_at(kind, message, Instant::now());
    }

    pub fn push_at(&mut self, kind: ToastKind, message: impl Into<String>, now: Instant) {
        let message = message.into();
        tracing::debug!("Toast ({:?}): {}", kind, message);
        if self.toasts.len() >= MAX_TOASTS {
            self.toasts.pop_front();
        }
        self.toasts.push_back(Toast {
            kind,
            message,
            created: now,
        });
    }

    /// Drop expired toasts
    pub fn prune(&mut self, now: Instant) {
        let lifetime = self.lifetime;
        self.toasts
            .retain(|t| now.saturating_duration_since(t.created) < lifetime);
    }

    /// Time until the next toast expires, used to schedule a repaint
    pub fn next_expiry(&self, now: Instant) -> Option<Duration> {
        self.toasts
            .iter()
            .map(|t| (t.created + self.lifetime).saturating_duration_since(now))
            .min()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter()
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    pub fn last(&self) -> Option<&Toast> {
        self.toasts.back()
    }
}
