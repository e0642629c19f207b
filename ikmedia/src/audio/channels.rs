use std::sync::Arc;

use parking_lot::Mutex;

use super::Mixer;

#[derive(Debug, Clone, Copy, Default)]
struct Slot {
    reserved: bool,
    /// Bumped on every reservation, so a stale holder can tell its claim was reused
    generation: u32,
}

#[derive(Debug, Default)]
struct ChannelTable {
    slots: Vec<Slot>,
}

/// Hands out mixer channels to sounds, one at a time.
///
/// Cloning shares the same table. Every sound of an [`Audio`](super::Audio)
/// context reserves through it, and the mixer frees through it when a channel finishes.
#[derive(Debug, Clone, Default)]
pub struct Channels {
    table: Arc<Mutex<ChannelTable>>,
}
impl Channels {
    /// Channels added when every existing one is taken
    pub const GROWTH_STEP: usize = 2;

    /// A table of `count` free channels
    pub fn new(count: usize) -> Self {
        Self {
            table: Arc::new(Mutex::new(ChannelTable {
                slots: vec![Slot::default(); count],
            })),
        }
    }

    /// Sizes the table after the mixer and routes its finished channels back here
    pub fn attach(mixer: &dyn Mixer) -> Self {
        let channels = Self::new(mixer.channel_count());
        let finished = channels.clone();
        mixer.set_channel_finished(Box::new(move |channel| finished.free(channel)));
        channels
    }

    /// Reserves the lowest free channel.
    ///
    /// When all are taken the mixer grows by [`Channels::GROWTH_STEP`]; the first
    /// new channel is returned reserved and the others are left free.
    pub fn reserve(&self, mixer: &dyn Mixer) -> usize {
        self.reserve_claim(mixer).0
    }

    pub(super) fn reserve_claim(&self, mixer: &dyn Mixer) -> (usize, u32) {
        let mut table = self.table.lock();

        let channel = match table.slots.iter().position(|slot| !slot.reserved) {
            Some(channel) => channel,
            None => {
                let channel = table.slots.len();
                let count = mixer.allocate_channels(channel + Self::GROWTH_STEP);
                table.slots.resize(count.max(channel + 1), Slot::default());
                log::debug!("grew audio channels to {}", table.slots.len());
                channel
            }
        };

        let slot = &mut table.slots[channel];
        slot.reserved = true;
        slot.generation = slot.generation.wrapping_add(1);
        (channel, slot.generation)
    }

    /// Releases a channel; freeing a free or unknown channel does nothing
    pub fn free(&self, channel: usize) {
        if let Some(slot) = self.table.lock().slots.get_mut(channel) {
            slot.reserved = false;
        }
    }

    pub fn is_reserved(&self, channel: usize) -> bool {
        self.table
            .lock()
            .slots
            .get(channel)
            .is_some_and(|slot| slot.reserved)
    }

    /// `true` while the reservation identified by `generation` is still in force
    pub(super) fn holds(&self, channel: usize, generation: u32) -> bool {
        self.table
            .lock()
            .slots
            .get(channel)
            .is_some_and(|slot| slot.reserved && slot.generation == generation)
    }

    pub fn len(&self) -> usize {
        self.table.lock().slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::SilentMixer;

    #[test]
    fn freed_channel_is_reserved_again_first() {
        let mixer = SilentMixer::with_channels(4);
        let channels = Channels::attach(&mixer);

        assert_eq!(channels.reserve(&mixer), 0);
        assert_eq!(channels.reserve(&mixer), 1);
        channels.free(0);
        assert_eq!(channels.reserve(&mixer), 0);
        assert_eq!(channels.reserve(&mixer), 2);
    }

    #[test]
    fn exhausted_table_grows_by_the_step() {
        let mixer = SilentMixer::with_channels(1);
        let channels = Channels::attach(&mixer);

        assert_eq!(channels.reserve(&mixer), 0);
        assert_eq!(channels.reserve(&mixer), 1);
        assert_eq!(channels.len(), 1 + Channels::GROWTH_STEP);
        assert_eq!(mixer.channel_count(), channels.len());
        assert!(channels.is_reserved(1));
        assert!(!channels.is_reserved(2));

        assert_eq!(channels.reserve(&mixer), 2);
    }

    #[test]
    fn empty_table_grows_on_first_reservation() {
        let mixer = SilentMixer::with_channels(0);
        let channels = Channels::attach(&mixer);
        assert!(channels.is_empty());

        assert_eq!(channels.reserve(&mixer), 0);
        assert_eq!(channels.len(), 2);
    }

    #[test]
    fn freeing_is_idempotent_and_ignores_unknown_channels() {
        let mixer = SilentMixer::with_channels(2);
        let channels = Channels::attach(&mixer);
        channels.reserve(&mixer);

        channels.free(0);
        channels.free(0);
        channels.free(57);

        assert_eq!(channels.len(), 2);
        assert!(!channels.is_reserved(0));
        assert_eq!(channels.reserve(&mixer), 0);
    }

    #[test]
    fn finished_channels_come_back_through_the_mixer() {
        let mixer = SilentMixer::with_channels(2);
        let channels = Channels::attach(&mixer);
        let chunk = crate::audio::Chunk::from_bytes(vec![1u8]);

        let channel = channels.reserve(&mixer);
        mixer.play_channel(channel, &chunk, 0, None).unwrap();
        mixer.halt_channel(channel);

        assert!(!channels.is_reserved(channel));
    }

    #[test]
    fn reused_channel_invalidates_the_old_claim() {
        let mixer = SilentMixer::with_channels(1);
        let channels = Channels::attach(&mixer);

        let (channel, first) = channels.reserve_claim(&mixer);
        channels.free(channel);
        let (again, second) = channels.reserve_claim(&mixer);

        assert_eq!(channel, again);
        assert!(!channels.holds(channel, first));
        assert!(channels.holds(channel, second));
    }
}
