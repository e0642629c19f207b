//! Sound effects and music over a pluggable mixer.

mod channels;
mod mixer;
mod music;
#[cfg(feature = "rodio")]
mod rodio_mixer;
mod sound;

pub use self::channels::Channels;
pub use self::mixer::{ChannelFinished, Mixer, SilentMixer};
pub use self::music::Music;
#[cfg(feature = "rodio")]
pub use self::rodio_mixer::RodioMixer;
pub use self::sound::Sound;

use std::{fmt, path::Path, sync::Arc};

use eyre::WrapErr;

/// Loudest volume a channel or the music can have
pub const MAX_VOLUME: u8 = 128;

/// The audio context: one mixer, and the channel table its sounds share.
///
/// Cheap to clone; clones drive the same mixer.
#[derive(Clone)]
pub struct Audio {
    mixer: Arc<dyn Mixer>,
    channels: Channels,
}
impl Audio {
    pub fn new<M: Mixer + 'static>(mixer: M) -> Self {
        let channels = Channels::attach(&mixer);
        log::info!("audio ready with {} channels", channels.len());
        Self {
            mixer: Arc::new(mixer),
            channels,
        }
    }

    /// A context that plays nothing, for headless runs
    pub fn silent() -> Self {
        Self::new(SilentMixer::new())
    }

    /// Opens the default output device
    #[cfg(feature = "rodio")]
    pub fn open() -> eyre::Result<Self> {
        Ok(Self::new(RodioMixer::new()?))
    }

    pub fn mixer(&self) -> &dyn Mixer {
        self.mixer.as_ref()
    }

    pub fn channels(&self) -> &Channels {
        &self.channels
    }
}
impl fmt::Debug for Audio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Audio")
            .field("channels", &self.channels.len())
            .finish_non_exhaustive()
    }
}

/// Encoded audio, shared without copying
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk(Arc<[u8]>);
impl Chunk {
    pub fn load(path: impl AsRef<Path>) -> eyre::Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .wrap_err_with(|| format!("loading audio from {}", path.display()))?;
        Ok(Self(bytes.into()))
    }

    pub fn from_bytes(bytes: impl Into<Arc<[u8]>>) -> Self {
        Self(bytes.into())
    }

    pub fn bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
impl AsRef<[u8]> for Chunk {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}
