use std::{collections::VecDeque, time::Duration};

use super::{codes, MouseState, NativeEvent, NativePayload, NativeQueue, QueueError};

/// In-memory queue fed by hand.
///
/// Used for headless runs and tests: records come out in the order they were pushed,
/// and the keyboard and mouse state follow the records as they are taken out.
#[derive(Debug, Default)]
pub struct ScriptedQueue {
    pending: VecDeque<NativeEvent>,
    fail_next_wait: Option<String>,
    keys: Vec<u32>,
    mouse: MouseState,
}
impl ScriptedQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: NativeEvent) {
        self.pending.push_back(event);
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// The next call to `wait` fails with this message, whatever is pending
    pub fn fail_next_wait(&mut self, message: impl Into<String>) {
        self.fail_next_wait = Some(message.into());
    }

    /// Keeps the input state in step with a record leaving the queue
    fn track(&mut self, event: &NativeEvent) {
        match (event.kind, &event.payload) {
            (codes::KEYDOWN, NativePayload::Keyboard(raw)) => {
                if !self.keys.contains(&raw.scancode) {
                    self.keys.push(raw.scancode);
                }
            }
            (codes::KEYUP, NativePayload::Keyboard(raw)) => {
                self.keys.retain(|&code| code != raw.scancode);
            }
            (codes::MOUSEMOTION, NativePayload::MouseMotion(raw)) => {
                self.mouse.x = raw.x;
                self.mouse.y = raw.y;
            }
            (codes::MOUSEBUTTONDOWN, NativePayload::MouseButton(raw)) => {
                if let Some(mask) = codes::button::mask(raw.button) {
                    self.mouse.buttons |= mask;
                }
            }
            (codes::MOUSEBUTTONUP, NativePayload::MouseButton(raw)) => {
                if let Some(mask) = codes::button::mask(raw.button) {
                    self.mouse.buttons &= !mask;
                }
            }
            _ => (),
        }
    }
}

impl NativeQueue for ScriptedQueue {
    fn poll(&mut self) -> Option<NativeEvent> {
        let event = self.pending.pop_front()?;
        self.track(&event);
        Some(event)
    }

    fn wait(&mut self, timeout: Option<Duration>) -> Result<Option<NativeEvent>, QueueError> {
        if let Some(message) = self.fail_next_wait.take() {
            return Err(QueueError::WaitFailed(message));
        }

        match self.poll() {
            Some(event) => Ok(Some(event)),
            // Nothing will ever be pushed while we block
            None if timeout.is_some() => Ok(None),
            None => Err(QueueError::WaitFailed(
                "waiting forever on an empty scripted queue".to_owned(),
            )),
        }
    }

    fn key_down(&mut self, scancode: u32) -> bool {
        self.keys.contains(&scancode)
    }

    fn mouse_state(&mut self) -> MouseState {
        self.mouse
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::native::{RawKeyboardEvent, RawMouseButtonEvent};

    #[test]
    fn records_come_out_in_order() {
        let mut queue = ScriptedQueue::new();
        queue.push(NativeEvent::quit());
        queue.push(NativeEvent::window(3, codes::window::SHOWN, 0, 0));

        assert_eq!(queue.poll().map(|e| e.kind), Some(codes::QUIT));
        assert_eq!(queue.poll().map(|e| e.kind), Some(codes::WINDOWEVENT));
        assert_eq!(queue.poll(), None);
    }

    #[test]
    fn wait_failure_is_reported_once() {
        let mut queue = ScriptedQueue::new();
        queue.push(NativeEvent::quit());
        queue.fail_next_wait("device lost");

        assert!(matches!(queue.wait(None), Err(QueueError::WaitFailed(_))));
        assert!(matches!(queue.wait(None), Ok(Some(_))));
        assert!(matches!(
            queue.wait(Some(Duration::from_millis(5))),
            Ok(None)
        ));
    }

    #[test]
    fn input_state_follows_taken_records() {
        let mut queue = ScriptedQueue::new();
        let key = RawKeyboardEvent {
            state: codes::PRESSED,
            scancode: codes::scancode::SPACE,
            keycode: codes::keycode::SPACE,
            ..Default::default()
        };
        queue.push(NativeEvent::keyboard(1, codes::KEYDOWN, key));
        queue.push(NativeEvent::mouse_button(
            1,
            codes::MOUSEBUTTONDOWN,
            RawMouseButtonEvent {
                button: codes::button::RIGHT,
                state: codes::PRESSED,
                clicks: 1,
                x: 4,
                y: 5,
            },
        ));
        queue.push(NativeEvent::keyboard(
            1,
            codes::KEYUP,
            RawKeyboardEvent {
                state: codes::RELEASED,
                ..key
            },
        ));

        // Nothing is taken yet
        assert!(!queue.key_down(codes::scancode::SPACE));

        queue.poll();
        assert!(queue.key_down(codes::scancode::SPACE));

        queue.poll();
        assert_eq!(
            queue.mouse_state().buttons,
            codes::button::mask(codes::button::RIGHT).unwrap_or_default()
        );

        queue.poll();
        assert!(!queue.key_down(codes::scancode::SPACE));
    }
}
