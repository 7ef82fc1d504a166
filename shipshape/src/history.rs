//! Snapshot-based undo/redo over any serializable state.
//!
//! Every state is stored as a `serde_json::Value` document: recording
//! serializes, restoring deserializes. Stack entries therefore never alias
//! the live state and a snapshot carries only what the state type chooses to
//! serialize.

use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::marker::PhantomData;
use tracing::debug;

/// One history entry: the state *before* the described change.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Change {
    pub timestamp: DateTime<Utc>,
    pub description: String,
    pub state: Value,
}

pub type SubscriptionId = u64;

type Listener<S> = Box<dyn FnMut(&S)>;

pub struct StateHistory<S> {
    current: Value,
    undo_stack: Vec<Change>,
    redo_stack: Vec<Change>,
    /// 0 = unlimited
    max_depth: usize,
    listeners: Vec<(SubscriptionId, Listener<S>)>,
    next_subscription: SubscriptionId,
    _state: PhantomData<fn() -> S>,
}

impl<S> fmt::Debug for StateHistory<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateHistory")
            .field("undo", &self.undo_stack.len())
            .field("redo", &self.redo_stack.len())
            .field("max_depth", &self.max_depth)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl<S: Serialize + DeserializeOwned> StateHistory<S> {
    /// Unbounded history.
    pub fn new(initial: &S) -> Result<Self> {
        Self::with_depth(initial, 0)
    }

    /// History keeping at most `max_depth` undo entries (0 keeps all).
    pub fn with_depth(initial: &S, max_depth: usize) -> Result<Self> {
        Ok(Self {
            current: serde_json::to_value(initial)?,
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_depth,
            listeners: Vec::new(),
            next_subscription: 0,
            _state: PhantomData,
        })
    }

    /// An independent copy of the current state.
    pub fn current(&self) -> Result<S> {
        Ok(serde_json::from_value(self.current.clone())?)
    }

    pub fn undo_stack(&self) -> &[Change] {
        &self.undo_stack
    }

    pub fn redo_stack(&self) -> &[Change] {
        &self.redo_stack
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Calls `listener` with the new state whenever the current state is
    /// replaced by a record, undo or redo.
    pub fn subscribe(&mut self, listener: impl FnMut(&S) + 'static) -> SubscriptionId {
        let id = self.next_subscription;
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    fn replace_current(&mut self, next: Value) -> Result<()> {
        self.current = next;
        if self.listeners.is_empty() {
            return Ok(());
        }
        let state: S = serde_json::from_value(self.current.clone())?;
        for (_, listener) in self.listeners.iter_mut() {
            listener(&state);
        }
        Ok(())
    }

    /// Saves the current state under `description`, adopts `new_state` and
    /// forgets the redo future.
    pub fn record_change(&mut self, description: impl Into<String>, new_state: &S) -> Result<()> {
        let next = serde_json::to_value(new_state)?;
        let description = description.into();
        debug!(%description, undo = self.undo_stack.len() + 1, "history record");
        let previous = std::mem::replace(&mut self.current, Value::Null);
        self.undo_stack.push(Change {
            timestamp: Utc::now(),
            description,
            state: previous,
        });
        if self.max_depth > 0 && self.undo_stack.len() > self.max_depth {
            self.undo_stack.remove(0);
        }
        self.redo_stack.clear();
        self.replace_current(next)
    }

    fn step(&mut self, backward: bool) -> Result<Option<S>> {
        let (source, target) = if backward {
            (&mut self.undo_stack, &mut self.redo_stack)
        } else {
            (&mut self.redo_stack, &mut self.undo_stack)
        };
        // restore first so a bad snapshot leaves both stacks untouched
        let restored = match source.last() {
            Some(change) => S::deserialize(&change.state)?,
            None => return Ok(None),
        };
        let Some(Change {
            timestamp,
            description,
            state,
        }) = source.pop()
        else {
            return Ok(None);
        };
        debug!(%description, backward, "history step");
        let current = std::mem::replace(&mut self.current, Value::Null);
        target.push(Change {
            timestamp,
            description,
            state: current,
        });
        self.replace_current(state)?;
        Ok(Some(restored))
    }

    /// Steps back one change. Returns the restored state, or `None` when
    /// there is nothing to undo.
    pub fn undo(&mut self) -> Result<Option<S>> {
        self.step(true)
    }

    /// Re-applies the most recently undone change.
    pub fn redo(&mut self) -> Result<Option<S>> {
        self.step(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    struct Counter {
        n: i32,
        label: String,
    }

    fn c(n: i32) -> Counter {
        Counter {
            n,
            label: format!("#{}", n),
        }
    }

    #[test]
    fn undo_redo_walk() {
        let mut h = StateHistory::new(&c(0)).unwrap();
        assert!(!h.can_undo() && !h.can_redo());
        assert_eq!(h.undo().unwrap(), None);

        h.record_change("one", &c(1)).unwrap();
        h.record_change("two", &c(2)).unwrap();
        assert_eq!(h.undo_stack()[1].description, "two");

        assert_eq!(h.undo().unwrap(), Some(c(1)));
        assert_eq!(h.redo_stack()[0].description, "two");
        assert_eq!(h.undo().unwrap(), Some(c(0)));
        assert_eq!(h.undo().unwrap(), None);
        assert_eq!(h.current().unwrap(), c(0));

        assert_eq!(h.redo().unwrap(), Some(c(1)));
        assert_eq!(h.redo().unwrap(), Some(c(2)));
        assert_eq!(h.redo().unwrap(), None);
    }

    #[test]
    fn record_after_undo_drops_redo() {
        let mut h = StateHistory::new(&c(0)).unwrap();
        h.record_change("one", &c(1)).unwrap();
        h.undo().unwrap();
        assert!(h.can_redo());
        h.record_change("other", &c(5)).unwrap();
        assert!(!h.can_redo());
        assert_eq!(h.current().unwrap(), c(5));
    }

    #[test]
    fn snapshots_are_independent() {
        let mut live = c(0);
        let mut h = StateHistory::new(&live).unwrap();
        live.n = 1;
        h.record_change("bump", &live).unwrap();
        live.label.push_str("-mutated");
        let mut restored = h.undo().unwrap().unwrap();
        assert_eq!(restored, c(0));
        restored.n = 99;
        assert_eq!(
            h.redo().unwrap().unwrap(),
            Counter {
                n: 1,
                label: "#0".to_string()
            }
        );
        assert_eq!(h.undo().unwrap().unwrap(), c(0));
    }

    #[test]
    fn default_history_is_unbounded() {
        let mut h = StateHistory::new(&c(0)).unwrap();
        for i in 1..=250 {
            h.record_change(format!("step {}", i), &c(i)).unwrap();
        }
        assert_eq!(h.undo_stack().len(), 250);
        for _ in 0..250 {
            assert!(h.undo().unwrap().is_some());
        }
        assert_eq!(h.current().unwrap(), c(0));
        assert!(!h.can_undo());
    }

    #[test]
    fn depth_limit_drops_oldest() {
        let mut h = StateHistory::with_depth(&c(0), 2).unwrap();
        for i in 1..=4 {
            h.record_change(format!("step {}", i), &c(i)).unwrap();
        }
        assert_eq!(h.undo_stack().len(), 2);
        assert_eq!(h.undo().unwrap(), Some(c(3)));
        assert_eq!(h.undo().unwrap(), Some(c(2)));
        assert_eq!(h.undo().unwrap(), None);
    }

    #[test]
    fn listeners_see_every_replacement() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut h = StateHistory::new(&c(0)).unwrap();
        let sink = seen.clone();
        let id = h.subscribe(move |s: &Counter| sink.borrow_mut().push(s.n));
        h.record_change("one", &c(1)).unwrap();
        h.undo().unwrap();
        h.redo().unwrap();
        assert!(h.unsubscribe(id));
        assert!(!h.unsubscribe(id));
        h.record_change("two", &c(2)).unwrap();
        assert_eq!(*seen.borrow(), vec![1, 0, 1]);
    }
}
