//! One-shot tasks run on the host's idle tick.
//!
//! The host calls [`IdleQueue::tick`] from its update loop. Each task is
//! taken off the queue before it runs, so it runs exactly once and never has
//! to unsubscribe itself. Everything here is single-threaded.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

type Task = Box<dyn FnOnce()>;

#[derive(Default)]
struct QueueInner {
    next_id: u64,
    tasks: Vec<(u64, Task)>,
}

/// Queue of deferred one-shot tasks.
///
/// Cloning the queue yields another handle to the same tasks.
#[derive(Clone, Default)]
pub struct IdleQueue {
    inner: Rc<RefCell<QueueInner>>,
}

impl fmt::Debug for IdleQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdleQueue")
            .field("pending", &self.pending())
            .finish()
    }
}

impl IdleQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `task` to run on the next tick.
    pub fn schedule_once(&self, task: impl FnOnce() + 'static) -> TaskHandle {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.tasks.push((id, Box::new(task)));
        TaskHandle {
            id,
            queue: Rc::downgrade(&self.inner),
        }
    }

    /// Run every task registered before this call, returning how many ran.
    ///
    /// Tasks scheduled while the tick is running wait for the next tick.
    pub fn tick(&self) -> usize {
        let due = std::mem::take(&mut self.inner.borrow_mut().tasks);
        let ran = due.len();
        for (_, task) in due {
            task();
        }
        ran
    }

    /// Number of tasks waiting for the next tick.
    pub fn pending(&self) -> usize {
        self.inner.borrow().tasks.len()
    }

    /// Returns `true` if no tasks are waiting.
    pub fn is_idle(&self) -> bool {
        self.pending() == 0
    }

    /// A handle that does not keep the queue alive, for tasks that
    /// reschedule themselves.
    pub fn downgrade(&self) -> WeakIdleQueue {
        WeakIdleQueue {
            inner: Rc::downgrade(&self.inner),
        }
    }
}

/// Non-owning handle to an [`IdleQueue`].
#[derive(Clone, Debug)]
pub struct WeakIdleQueue {
    inner: Weak<RefCell<QueueInner>>,
}

impl WeakIdleQueue {
    /// The queue, if it still exists.
    pub fn upgrade(&self) -> Option<IdleQueue> {
        self.inner.upgrade().map(|inner| IdleQueue { inner })
    }
}

/// Handle to a task registered with [`IdleQueue::schedule_once`].
#[derive(Debug)]
pub struct TaskHandle {
    id: u64,
    queue: Weak<RefCell<QueueInner>>,
}

impl TaskHandle {
    /// Returns `true` while the task has neither run nor been cancelled.
    pub fn is_pending(&self) -> bool {
        self.queue
            .upgrade()
            .is_some_and(|q| q.borrow().tasks.iter().any(|(id, _)| *id == self.id))
    }

    /// Remove the task without running it. Returns `true` if it was pending.
    pub fn cancel(&self) -> bool {
        let Some(queue) = self.queue.upgrade() else {
            return false;
        };
        let mut inner = queue.borrow_mut();
        let before = inner.tasks.len();
        inner.tasks.retain(|(id, _)| *id != self.id);
        inner.tasks.len() != before
    }
}
