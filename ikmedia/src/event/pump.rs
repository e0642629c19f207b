use std::time::{Duration, Instant};

use eyre::WrapErr;

use super::{
    DecodeError, Event, EventCategory, EventKind, EventSupport, KeyboardEvent, MouseButtonEvent,
    MouseMotionEvent, MouseWheelEvent, QuitEvent, WindowEvent,
};
use crate::native::{codes, NativeEvent, SharedQueue};

/// Pulls events addressed to one window out of the shared native queue.
///
/// Records addressed to another window are discarded; records addressed to no
/// window at all (quit requests) go through to every pump.
pub struct EventPump {
    queue: SharedQueue,
    window_id: u32,
    support: EventSupport,
}
impl EventPump {
    pub fn new(queue: SharedQueue, window_id: u32, support: EventSupport) -> Self {
        Self {
            queue,
            window_id,
            support,
        }
    }

    pub fn window_id(&self) -> u32 {
        self.window_id
    }

    pub fn support(&self) -> EventSupport {
        self.support
    }

    /// Takes the next pending record without blocking.
    ///
    /// The event is empty if nothing is pending, the record is for another
    /// window, its category is disabled, or it couldn't be decoded.
    pub fn poll(&self) -> Event {
        let record = self.queue.borrow_mut().poll();
        match record {
            Some(record) if self.accepts(&record) => self.build(&record),
            Some(record) => {
                log::trace!(
                    "window {} skipped a record for window {}",
                    self.window_id,
                    record.window_id
                );
                Event::empty()
            }
            None => Event::empty(),
        }
    }

    /// Blocks until a record for this window arrives.
    ///
    /// Records for other windows are skipped without returning. The event can still be
    /// empty when the record's category is disabled or it couldn't be decoded.
    pub fn wait(&self) -> eyre::Result<Event> {
        loop {
            let record = self
                .queue
                .borrow_mut()
                .wait(None)
                .wrap_err("waiting for an event")?;

            match record {
                Some(record) if self.accepts(&record) => return Ok(self.build(&record)),
                Some(_) => continue,
                // Not supposed to happen without a timeout; ask again
                None => continue,
            }
        }
    }

    /// Like [`EventPump::wait`], but gives up with an empty event once `timeout` has elapsed
    pub fn wait_timeout(&self, timeout: Duration) -> eyre::Result<Event> {
        let deadline = Instant::now() + timeout;

        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            let record = self
                .queue
                .borrow_mut()
                .wait(Some(remaining))
                .wrap_err("waiting for an event")?;

            match record {
                Some(record) if self.accepts(&record) => return Ok(self.build(&record)),
                Some(_) if Instant::now() < deadline => continue,
                _ => return Ok(Event::empty()),
            }
        }
    }

    fn accepts(&self, record: &NativeEvent) -> bool {
        record.window_id == 0 || record.window_id == self.window_id
    }

    /// Decodes a record into the first enabled category whose type code matches
    fn build(&self, record: &NativeEvent) -> Event {
        match self.classify(record) {
            Ok(Some(kind)) => Event::new(kind),
            Ok(None) => {
                log::trace!("no enabled category for event type {:#x}", record.kind);
                Event::empty()
            }
            Err(error) => {
                log::warn!("dropping native event: {error}");
                Event::empty()
            }
        }
    }

    fn classify(&self, record: &NativeEvent) -> Result<Option<EventKind>, DecodeError> {
        let support = &self.support;
        let kind = record.kind;

        // Motion first, it's by far the most frequent
        if support.is_enabled(EventCategory::MouseMotion) && kind == codes::MOUSEMOTION {
            return MouseMotionEvent::decode(record).map(|event| Some(event.into()));
        }
        if support.is_enabled(EventCategory::MouseButton)
            && (kind == codes::MOUSEBUTTONDOWN || kind == codes::MOUSEBUTTONUP)
        {
            return MouseButtonEvent::decode(record).map(|event| Some(event.into()));
        }
        if support.is_enabled(EventCategory::Keyboard)
            && (kind == codes::KEYDOWN || kind == codes::KEYUP)
        {
            return KeyboardEvent::decode(record).map(|event| Some(event.into()));
        }
        if support.is_enabled(EventCategory::MouseWheel) && kind == codes::MOUSEWHEEL {
            return MouseWheelEvent::decode(record).map(|event| Some(event.into()));
        }
        if support.is_enabled(EventCategory::Window) && kind == codes::WINDOWEVENT {
            return WindowEvent::decode(record).map(|event| Some(event.into()));
        }
        if kind == codes::QUIT {
            return QuitEvent::decode(record).map(|event| Some(event.into()));
        }

        Ok(None)
    }
}
