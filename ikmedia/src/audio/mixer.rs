use std::time::{Duration, Instant};

use parking_lot::Mutex;

use super::{Chunk, MAX_VOLUME};

/// Called with the index of a channel that stopped playing, whether it ran out or was halted
pub type ChannelFinished = Box<dyn Fn(usize) + Send + Sync>;

/// The audio backend: plays chunks on numbered channels plus one music stream.
///
/// `loops` follows the usual mixer convention. For channels it counts extra
/// repetitions (0 plays once) and for music it counts plays (0 and 1 both play once).
/// Any negative value repeats forever. Volumes go from 0 to [`MAX_VOLUME`].
pub trait Mixer: Send + Sync {
    fn channel_count(&self) -> usize;

    /// Resizes the channel set and returns the new count.
    ///
    /// Must never run the finished callback: the channel table holds its lock while growing.
    fn allocate_channels(&self, count: usize) -> usize;

    /// Rejects chunks the backend can't decode, so loading fails early
    fn probe(&self, _chunk: &Chunk) -> eyre::Result<()> {
        Ok(())
    }

    fn play_channel(
        &self,
        channel: usize,
        chunk: &Chunk,
        loops: i32,
        limit: Option<Duration>,
    ) -> eyre::Result<()>;
    fn halt_channel(&self, channel: usize);
    /// `None` pauses every channel
    fn pause(&self, channel: Option<usize>);
    /// `None` resumes every channel
    fn resume(&self, channel: Option<usize>);
    /// Paused channels still count as playing
    fn is_playing(&self, channel: usize) -> bool;
    fn is_paused(&self, channel: usize) -> bool;
    fn set_channel_volume(&self, channel: usize, volume: u8);

    fn play_music(&self, music: &Chunk, loops: i32) -> eyre::Result<()>;
    fn is_music_playing(&self) -> bool;
    fn is_music_paused(&self) -> bool;
    fn pause_music(&self);
    fn resume_music(&self);
    fn halt_music(&self);
    fn set_music_volume(&self, volume: u8);

    fn set_channel_finished(&self, callback: ChannelFinished);
}

#[derive(Debug, Clone, Copy)]
struct Playback {
    paused: bool,
    until: Option<Instant>,
}
impl Playback {
    fn new(limit: Option<Duration>) -> Self {
        Self {
            paused: false,
            until: limit.map(|limit| Instant::now() + limit),
        }
    }

    fn expired(&self, now: Instant) -> bool {
        self.until.is_some_and(|until| now >= until)
    }
}

struct SilentState {
    channels: Vec<Option<Playback>>,
    volumes: Vec<u8>,
    music: Option<Playback>,
    music_volume: u8,
}

/// A mixer without a device.
///
/// Keeps the bookkeeping of a real one: a channel plays until it is halted
/// or its time limit runs out, then it is reported as finished.
pub struct SilentMixer {
    state: Mutex<SilentState>,
    finished: Mutex<Option<ChannelFinished>>,
}
impl SilentMixer {
    pub const DEFAULT_CHANNELS: usize = 8;

    pub fn new() -> Self {
        Self::with_channels(Self::DEFAULT_CHANNELS)
    }

    pub fn with_channels(count: usize) -> Self {
        Self {
            state: Mutex::new(SilentState {
                channels: vec![None; count],
                volumes: vec![MAX_VOLUME; count],
                music: None,
                music_volume: MAX_VOLUME,
            }),
            finished: Mutex::new(None),
        }
    }

    fn notify(&self, channels: impl IntoIterator<Item = usize>) {
        let callback = self.finished.lock();
        if let Some(callback) = callback.as_ref() {
            channels.into_iter().for_each(|channel| callback(channel));
        }
    }

    /// Drops timed-out playbacks, then reports them once the state lock is released
    fn expire(&self) {
        let now = Instant::now();
        let expired: Vec<usize> = {
            let mut state = self.state.lock();
            if state.music.is_some_and(|music| music.expired(now)) {
                state.music = None;
            }
            state
                .channels
                .iter_mut()
                .enumerate()
                .filter(|(_, playback)| playback.is_some_and(|playback| playback.expired(now)))
                .map(|(channel, playback)| {
                    *playback = None;
                    channel
                })
                .collect()
        };
        self.notify(expired);
    }

    fn with_playback<R>(&self, channel: usize, f: impl FnOnce(&mut Option<Playback>) -> R) -> Option<R> {
        self.expire();
        let mut state = self.state.lock();
        state.channels.get_mut(channel).map(f)
    }
}
impl Default for SilentMixer {
    fn default() -> Self {
        Self::new()
    }
}

impl Mixer for SilentMixer {
    fn channel_count(&self) -> usize {
        self.state.lock().channels.len()
    }

    fn allocate_channels(&self, count: usize) -> usize {
        let mut state = self.state.lock();
        state.channels.resize(count, None);
        state.volumes.resize(count, MAX_VOLUME);
        count
    }

    fn play_channel(
        &self,
        channel: usize,
        _chunk: &Chunk,
        _loops: i32,
        limit: Option<Duration>,
    ) -> eyre::Result<()> {
        self.with_playback(channel, |playback| *playback = Some(Playback::new(limit)))
            .ok_or_else(|| eyre::eyre!("no audio channel {channel}"))
    }

    fn halt_channel(&self, channel: usize) {
        let halted = self.with_playback(channel, |playback| playback.take().is_some());
        if halted == Some(true) {
            self.notify([channel]);
        }
    }

    fn pause(&self, channel: Option<usize>) {
        set_paused(&mut self.state.lock().channels, channel, true);
    }

    fn resume(&self, channel: Option<usize>) {
        set_paused(&mut self.state.lock().channels, channel, false);
    }

    fn is_playing(&self, channel: usize) -> bool {
        self.with_playback(channel, |playback| playback.is_some())
            .unwrap_or(false)
    }

    fn is_paused(&self, channel: usize) -> bool {
        self.with_playback(channel, |playback| playback.is_some_and(|playback| playback.paused))
            .unwrap_or(false)
    }

    fn set_channel_volume(&self, channel: usize, volume: u8) {
        if let Some(slot) = self.state.lock().volumes.get_mut(channel) {
            *slot = volume.min(MAX_VOLUME);
        }
    }

    fn play_music(&self, _music: &Chunk, _loops: i32) -> eyre::Result<()> {
        self.state.lock().music = Some(Playback::new(None));
        Ok(())
    }

    fn is_music_playing(&self) -> bool {
        self.state.lock().music.is_some()
    }

    fn is_music_paused(&self) -> bool {
        self.state.lock().music.is_some_and(|music| music.paused)
    }

    fn pause_music(&self) {
        if let Some(music) = self.state.lock().music.as_mut() {
            music.paused = true;
        }
    }

    fn resume_music(&self) {
        if let Some(music) = self.state.lock().music.as_mut() {
            music.paused = false;
        }
    }

    fn halt_music(&self) {
        self.state.lock().music = None;
    }

    fn set_music_volume(&self, volume: u8) {
        self.state.lock().music_volume = volume.min(MAX_VOLUME);
    }

    fn set_channel_finished(&self, callback: ChannelFinished) {
        *self.finished.lock() = Some(callback);
    }
}

fn set_paused(channels: &mut [Option<Playback>], channel: Option<usize>, paused: bool) {
    let selected: Box<dyn Iterator<Item = &mut Option<Playback>>> = match channel {
        Some(channel) => Box::new(channels.get_mut(channel).into_iter()),
        None => Box::new(channels.iter_mut()),
    };
    selected
        .flatten()
        .for_each(|playback| playback.paused = paused);
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    fn chunk() -> Chunk {
        Chunk::from_bytes(vec![0u8; 4])
    }

    #[test]
    fn halting_reports_the_channel_once() {
        let mixer = SilentMixer::with_channels(2);
        let finished = Arc::new(Mutex::new(Vec::new()));
        let sink = finished.clone();
        mixer.set_channel_finished(Box::new(move |channel| sink.lock().push(channel)));

        mixer.play_channel(1, &chunk(), 0, None).unwrap();
        assert!(mixer.is_playing(1));

        mixer.halt_channel(1);
        mixer.halt_channel(1);
        assert!(!mixer.is_playing(1));
        assert_eq!(*finished.lock(), vec![1]);
    }

    #[test]
    fn timed_playback_runs_out() {
        let mixer = SilentMixer::new();
        mixer
            .play_channel(0, &chunk(), -1, Some(Duration::ZERO))
            .unwrap();
        assert!(!mixer.is_playing(0));
    }

    #[test]
    fn pause_without_a_channel_pauses_everything() {
        let mixer = SilentMixer::with_channels(3);
        mixer.play_channel(0, &chunk(), 0, None).unwrap();
        mixer.play_channel(2, &chunk(), 0, None).unwrap();

        mixer.pause(None);
        assert!(mixer.is_paused(0) && mixer.is_paused(2));
        assert!(!mixer.is_paused(1));

        mixer.resume(Some(2));
        assert!(mixer.is_paused(0));
        assert!(!mixer.is_paused(2));
        assert!(mixer.is_playing(2));
    }

    #[test]
    fn unknown_channel_is_an_error() {
        let mixer = SilentMixer::with_channels(1);
        assert!(mixer.play_channel(4, &chunk(), 0, None).is_err());
    }
}
