use std::{cell::RefCell, rc::Rc};

use crate::native::{SharedQueue, WinitQueue};

/// Owns the process event queue; windows are created against it.
///
/// Cloning shares the same queue. Everything stays on the thread that created it.
#[derive(Clone)]
pub struct Context {
    queue: Rc<RefCell<WinitQueue>>,
}
impl Context {
    pub fn new() -> eyre::Result<Self> {
        let queue = WinitQueue::new()?;
        log::info!("native event loop ready");
        Ok(Self {
            queue: Rc::new(RefCell::new(queue)),
        })
    }

    /// The queue every window pump and input query reads from
    pub fn queue(&self) -> SharedQueue {
        self.queue.clone()
    }

    pub(super) fn native(&self) -> &Rc<RefCell<WinitQueue>> {
        &self.queue
    }
}
