use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Host-assigned identity of a layer in its tree.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct LayerId(pub u64);

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "layer#{}", self.0)
    }
}

/// The host's invalidation mechanism.
///
/// Layers call this whenever their content changed and a draw cycle is needed.
/// Calls happen on the host's drawing thread.
pub trait RedrawSink {
    fn request_redraw(&self, layer: LayerId);
}

impl<F: Fn(LayerId)> RedrawSink for F {
    #[inline]
    fn request_redraw(&self, layer: LayerId) {
        self(layer)
    }
}

/// Pending redraw requests, deduplicated, in first-request order.
///
/// Clones share the same queue, so a host keeps one handle and gives another
/// to each layer it attaches.
#[derive(Debug, Clone, Default)]
pub struct RedrawQueue {
    pending: Rc<RefCell<Vec<LayerId>>>,
}

impl RedrawQueue {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.pending.borrow().len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pending.borrow().is_empty()
    }

    /// Takes every pending request, leaving the queue empty.
    pub fn drain(&self) -> Vec<LayerId> {
        std::mem::take(&mut *self.pending.borrow_mut())
    }
}

impl RedrawSink for RedrawQueue {
    fn request_redraw(&self, layer: LayerId) {
        let mut pending = self.pending.borrow_mut();
        if !pending.contains(&layer) {
            pending.push(layer);
        }
    }
}
