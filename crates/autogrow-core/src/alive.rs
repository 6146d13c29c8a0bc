use std::cell::Cell;
use std::rc::Rc;

/// Liveness flag owned by a mounted component.
///
/// Deferred work captures an [`AliveWatcher`] when it is scheduled and checks
/// it before touching the component. Once the owner calls
/// [`kill`](Self::kill) (or is dropped) every watcher reports dead.
#[derive(Debug)]
pub struct AliveFlag {
    alive: Rc<Cell<bool>>,
}

impl AliveFlag {
    pub fn new() -> Self {
        Self {
            alive: Rc::new(Cell::new(true)),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.alive.get()
    }

    pub fn watcher(&self) -> AliveWatcher {
        AliveWatcher {
            alive: Rc::clone(&self.alive),
        }
    }

    pub fn kill(&self) {
        self.alive.set(false);
    }
}

impl Default for AliveFlag {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for AliveFlag {
    fn drop(&mut self) {
        self.alive.set(false);
    }
}

/// Read-only view of an [`AliveFlag`].
#[derive(Debug, Clone)]
pub struct AliveWatcher {
    alive: Rc<Cell<bool>>,
}

impl AliveWatcher {
    pub fn is_alive(&self) -> bool {
        self.alive.get()
    }
}
