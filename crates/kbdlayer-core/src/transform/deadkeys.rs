use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::layout::Layout;
use crate::transform::{TransformNode, TransformTable};

/// Result of feeding one resolved value through the dead-key session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A dead key was armed or advanced; nothing to commit yet
    Suppressed,
    /// A composition finished (or was abandoned) with this string
    Composed(String),
    /// No dead-key involvement, commit the raw value
    Passthrough(String),
}

impl Outcome {
    /// The string to commit, if any
    pub fn into_output(self) -> Option<String> {
        match self {
            Outcome::Suppressed => None,
            Outcome::Composed(text) | Outcome::Passthrough(text) => Some(text),
        }
    }
}

#[derive(Debug, Clone)]
struct ActiveDeadKey {
    /// Value that armed the sequence, committed when nothing else fits
    trigger: String,
    node: Arc<TransformTable>,
    activated_at: Instant,
}

/// Pending dead-key sequence of one input session.
///
/// Holds at most one armed sequence. While armed, every value is consumed
/// as a continuation, including values that would otherwise be dead keys.
#[derive(Debug, Clone, Default)]
pub struct DeadKeyState {
    active: Option<ActiveDeadKey>,
    timeout: Option<Duration>,
}

impl DeadKeyState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop a pending sequence once it is older than `timeout`
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            active: None,
            timeout: Some(timeout),
        }
    }

    pub fn set_timeout(&mut self, timeout: Option<Duration>) {
        self.timeout = timeout;
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Trigger of the pending sequence
    pub fn pending_trigger(&self) -> Option<&str> {
        self.active.as_ref().map(|a| a.trigger.as_str())
    }

    pub fn clear(&mut self) {
        self.active = None;
    }

    /// Feed a value produced by the resolver for `layer`.
    pub fn resolve(&mut self, layout: &Layout, raw: &str, layer: &str) -> Outcome {
        self.expire_stale();

        let Some(active) = self.active.take() else {
            return self.detect(layout, raw, layer);
        };

        match active.node.get(raw) {
            Some(TransformNode::Terminal(composed)) => {
                log::debug!("Dead key '{}' + '{}' -> '{}'", active.trigger, raw, composed);
                Outcome::Composed(composed.clone())
            }
            Some(TransformNode::Continuation(next)) => {
                log::debug!("Dead key '{}' + '{}' continues", active.trigger, raw);
                self.active = Some(ActiveDeadKey {
                    node: Arc::clone(next),
                    activated_at: Instant::now(),
                    ..active
                });
                Outcome::Suppressed
            }
            None => match active.node.fallback() {
                Some(fallback) => {
                    log::debug!(
                        "Dead key '{}' has no entry for '{}', committing '{}'",
                        active.trigger,
                        raw,
                        fallback
                    );
                    Outcome::Composed(fallback.to_string())
                }
                None => {
                    log::warn!(
                        "Dead key '{}' has no entry for '{}' and no space fallback",
                        active.trigger,
                        raw
                    );
                    Outcome::Composed(active.trigger)
                }
            },
        }
    }

    fn detect(&mut self, layout: &Layout, raw: &str, layer: &str) -> Outcome {
        if !layout.is_dead_key(layer, raw) {
            return Outcome::Passthrough(raw.to_string());
        }

        match layout.transform(raw) {
            Some(table) => {
                log::debug!("Dead key '{}' armed on layer '{}'", raw, layer);
                self.active = Some(ActiveDeadKey {
                    trigger: raw.to_string(),
                    node: Arc::clone(table),
                    activated_at: Instant::now(),
                });
                Outcome::Suppressed
            }
            None => {
                log::warn!("Dead key '{}' has no transform table", raw);
                Outcome::Passthrough(raw.to_string())
            }
        }
    }

    fn expire_stale(&mut self) {
        let (Some(active), Some(timeout)) = (&self.active, self.timeout) else {
            return;
        };
        if active.activated_at.elapsed() > timeout {
            log::debug!("Dead key '{}' timed out", active.trigger);
            self.clear();
        }
    }
}
