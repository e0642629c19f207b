use std::{path::Path, sync::Arc, time::Duration};

use super::{Audio, Chunk, MAX_VOLUME};

/// A short effect, played on a channel of its own each time.
///
/// Several sounds play together as long as the mixer has channels; it grows when they run out.
/// Dropping the sound halts what it is still playing.
pub struct Sound {
    audio: Audio,
    chunk: Chunk,
    volume: u8,
    claim: Option<(usize, u32)>,
}
impl Sound {
    /// Loads the sound from a file (WAV, OGG, MP3 or FLAC)
    pub fn load(audio: &Audio, path: impl AsRef<Path>) -> eyre::Result<Self> {
        Self::from_chunk(audio, Chunk::load(path)?)
    }

    pub fn from_bytes(audio: &Audio, bytes: impl Into<Arc<[u8]>>) -> eyre::Result<Self> {
        Self::from_chunk(audio, Chunk::from_bytes(bytes))
    }

    pub fn from_chunk(audio: &Audio, chunk: Chunk) -> eyre::Result<Self> {
        audio.mixer().probe(&chunk)?;
        Ok(Self {
            audio: audio.clone(),
            chunk,
            volume: MAX_VOLUME,
            claim: None,
        })
    }

    /// Plays on the first free channel; `loops` counts the extra repetitions, -1 repeats forever
    pub fn play(&mut self, loops: i32) -> eyre::Result<()> {
        self.start(loops, None)
    }

    /// Like [`Sound::play`], stopping after `time` at most
    pub fn play_timed(&mut self, time: Duration, loops: i32) -> eyre::Result<()> {
        self.start(loops, Some(time))
    }

    fn start(&mut self, loops: i32, limit: Option<Duration>) -> eyre::Result<()> {
        let mixer = self.audio.mixer();
        let channels = self.audio.channels();

        let (channel, generation) = channels.reserve_claim(mixer);
        mixer.set_channel_volume(channel, self.volume);
        if let Err(error) = mixer.play_channel(channel, &self.chunk, loops, limit) {
            channels.free(channel);
            return Err(error.wrap_err(format!("playing a sound on channel {channel}")));
        }

        self.claim = Some((channel, generation));
        Ok(())
    }

    /// The channel of the last play, unless it finished and was handed to someone else
    fn channel(&self) -> Option<usize> {
        let (channel, generation) = self.claim?;
        self.audio
            .channels()
            .holds(channel, generation)
            .then_some(channel)
    }

    pub fn pause(&self) {
        if let Some(channel) = self.channel() {
            self.audio.mixer().pause(Some(channel));
        }
    }

    pub fn resume(&self) {
        if let Some(channel) = self.channel() {
            self.audio.mixer().resume(Some(channel));
        }
    }

    /// From 0 to [`MAX_VOLUME`]; louder values are clamped
    pub fn set_volume(&mut self, volume: u8) {
        self.volume = volume.min(MAX_VOLUME);
        if let Some(channel) = self.channel() {
            self.audio.mixer().set_channel_volume(channel, self.volume);
        }
    }

    pub fn volume(&self) -> u8 {
        self.volume
    }

    pub fn is_playing(&self) -> bool {
        self.channel()
            .is_some_and(|channel| self.audio.mixer().is_playing(channel))
    }

    pub fn is_paused(&self) -> bool {
        self.channel()
            .is_some_and(|channel| self.audio.mixer().is_paused(channel))
    }

    /// Pauses every channel of the context, whoever plays on it
    pub fn pause_all(audio: &Audio) {
        audio.mixer().pause(None);
    }

    pub fn chunk(&self) -> &Chunk {
        &self.chunk
    }
}

impl Drop for Sound {
    fn drop(&mut self) {
        if let Some(channel) = self.channel() {
            self.audio.mixer().halt_channel(channel);
        }
    }
}

impl std::fmt::Debug for Sound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sound")
            .field("bytes", &self.chunk.len())
            .field("volume", &self.volume)
            .field("channel", &self.channel())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn playing_reserves_a_channel_until_halted() -> eyre::Result<()> {
        let audio = Audio::silent();
        let mut sound = Sound::from_bytes(&audio, vec![0u8; 8])?;
        assert!(!sound.is_playing());

        sound.play(0)?;
        assert!(sound.is_playing());
        assert!(audio.channels().is_reserved(0));

        drop(sound);
        assert!(!audio.channels().is_reserved(0));
        assert!(!audio.mixer().is_playing(0));
        Ok(())
    }

    #[test]
    fn two_sounds_take_two_channels() -> eyre::Result<()> {
        let audio = Audio::silent();
        let mut a = Sound::from_bytes(&audio, vec![0u8; 8])?;
        let mut b = Sound::from_bytes(&audio, vec![0u8; 8])?;

        a.play(0)?;
        b.play(-1)?;
        assert!(audio.channels().is_reserved(0));
        assert!(audio.channels().is_reserved(1));

        b.pause();
        assert!(b.is_paused());
        assert!(!a.is_paused());
        Ok(())
    }

    #[test]
    fn finished_sound_does_not_touch_a_reused_channel() -> eyre::Result<()> {
        let audio = Audio::silent();
        let mut first = Sound::from_bytes(&audio, vec![0u8; 8])?;
        let mut second = Sound::from_bytes(&audio, vec![0u8; 8])?;

        first.play_timed(Duration::ZERO, 0)?;
        assert!(!first.is_playing());

        second.play(0)?;
        assert!(second.is_playing());
        first.pause();
        drop(first);

        assert!(second.is_playing());
        assert!(!second.is_paused());
        Ok(())
    }

    #[test]
    fn volume_is_clamped() -> eyre::Result<()> {
        let audio = Audio::silent();
        let mut sound = Sound::from_bytes(&audio, vec![0u8; 8])?;
        sound.set_volume(200);
        assert_eq!(sound.volume(), MAX_VOLUME);
        Ok(())
    }
}
