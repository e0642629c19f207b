use std::{path::Path, sync::Arc};

use super::{Audio, Chunk, MAX_VOLUME};

/// A long track on the mixer's single music stream; playing one replaces the last.
pub struct Music {
    audio: Audio,
    chunk: Chunk,
}
impl Music {
    /// Play count for [`Music::play`] that never stops
    pub const FOREVER: i32 = -1;

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
        })
    }

    /// Plays the track `loops` times, or [`Music::FOREVER`]
    pub fn play(&self, loops: i32) -> eyre::Result<()> {
        self.audio.mixer().play_music(&self.chunk, loops)?;
        log::debug!("playing {} bytes of music, loops {loops}", self.chunk.len());
        Ok(())
    }

    pub fn is_any_playing(audio: &Audio) -> bool {
        audio.mixer().is_music_playing()
    }

    pub fn is_any_paused(audio: &Audio) -> bool {
        audio.mixer().is_music_paused()
    }

    pub fn pause(audio: &Audio) {
        audio.mixer().pause_music();
    }

    pub fn resume(audio: &Audio) {
        audio.mixer().resume_music();
    }

    pub fn halt(audio: &Audio) {
        audio.mixer().halt_music();
    }

    /// From 0 to [`MAX_VOLUME`]
    pub fn set_volume(audio: &Audio, volume: u8) {
        audio.mixer().set_music_volume(volume.min(MAX_VOLUME));
    }

    pub fn chunk(&self) -> &Chunk {
        &self.chunk
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn music_state_is_shared_by_the_context() -> eyre::Result<()> {
        let audio = Audio::silent();
        let music = Music::from_bytes(&audio, vec![0u8; 16])?;
        assert!(!Music::is_any_playing(&audio));

        music.play(Music::FOREVER)?;
        Music::pause(&audio);
        assert!(Music::is_any_playing(&audio));
        assert!(Music::is_any_paused(&audio));

        Music::halt(&audio);
        assert!(!Music::is_any_playing(&audio));
        Ok(())
    }
}
