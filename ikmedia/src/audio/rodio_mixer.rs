use std::{
    io::Cursor,
    sync::mpsc,
    thread::{self, JoinHandle},
    time::Duration,
};

use eyre::WrapErr;
use parking_lot::Mutex;
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};

use super::{ChannelFinished, Chunk, Mixer, MAX_VOLUME};

type BoxedSource = Box<dyn Source<Item = i16> + Send>;

struct RodioState {
    channels: Vec<Option<Sink>>,
    volumes: Vec<u8>,
    music: Option<Sink>,
    music_volume: u8,
}

/// Plays through the default output device with rodio.
///
/// The output stream can't leave the thread that opened it, so it lives on a thread
/// of its own until the mixer is dropped. Channels that ran out are noticed the next
/// time the mixer is asked about a channel, and reported then.
pub struct RodioMixer {
    output: OutputStreamHandle,
    state: Mutex<RodioState>,
    finished: Mutex<Option<ChannelFinished>>,
    shutdown: Option<mpsc::Sender<()>>,
    thread: Option<JoinHandle<()>>,
}
impl RodioMixer {
    pub const DEFAULT_CHANNELS: usize = 8;

    pub fn new() -> eyre::Result<Self> {
        let (ready_tx, ready_rx) = mpsc::channel();
        let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>();

        let thread = thread::Builder::new()
            .name("ikmedia-audio".to_string())
            .spawn(move || match OutputStream::try_default() {
                Ok((_stream, handle)) => {
                    let _ = ready_tx.send(Ok(handle));
                    // Returns once the sender is dropped
                    let _ = shutdown_rx.recv();
                    log::debug!("audio thread exiting");
                }
                Err(error) => {
                    let _ = ready_tx.send(Err(error.to_string()));
                }
            })
            .wrap_err("spawning the audio thread")?;

        let output = ready_rx
            .recv()
            .wrap_err("audio thread exited before opening the output")?
            .map_err(|error| eyre::eyre!("opening the audio output: {error}"))?;
        log::info!("opened the default audio output");

        Ok(Self {
            output,
            state: Mutex::new(RodioState {
                channels: (0..Self::DEFAULT_CHANNELS).map(|_| None).collect(),
                volumes: vec![MAX_VOLUME; Self::DEFAULT_CHANNELS],
                music: None,
                music_volume: MAX_VOLUME,
            }),
            finished: Mutex::new(None),
            shutdown: Some(shutdown_tx),
            thread: Some(thread),
        })
    }

    fn sink(&self, volume: u8) -> eyre::Result<Sink> {
        let sink = Sink::try_new(&self.output).wrap_err("creating an audio sink")?;
        sink.set_volume(gain(volume));
        Ok(sink)
    }

    /// Drops the sinks that ran dry, then reports their channels once the state lock is released
    fn collect_finished(&self) {
        let finished: Vec<usize> = {
            let mut state = self.state.lock();
            if state.music.as_ref().is_some_and(Sink::empty) {
                state.music = None;
            }
            state
                .channels
                .iter_mut()
                .enumerate()
                .filter(|(_, sink)| sink.as_ref().is_some_and(Sink::empty))
                .map(|(channel, sink)| {
                    *sink = None;
                    channel
                })
                .collect()
        };

        if finished.is_empty() {
            return;
        }
        if let Some(callback) = self.finished.lock().as_ref() {
            finished.into_iter().for_each(|channel| callback(channel));
        }
    }

    fn with_sink<R>(&self, channel: usize, f: impl FnOnce(&Sink) -> R) -> Option<R> {
        self.collect_finished();
        let state = self.state.lock();
        state.channels.get(channel)?.as_ref().map(f)
    }
}

impl Mixer for RodioMixer {
    fn channel_count(&self) -> usize {
        self.state.lock().channels.len()
    }

    fn allocate_channels(&self, count: usize) -> usize {
        let mut state = self.state.lock();
        state.channels.resize_with(count, || None);
        state.volumes.resize(count, MAX_VOLUME);
        count
    }

    fn probe(&self, chunk: &Chunk) -> eyre::Result<()> {
        Decoder::new(Cursor::new(chunk.clone())).wrap_err("unsupported audio data")?;
        Ok(())
    }

    fn play_channel(
        &self,
        channel: usize,
        chunk: &Chunk,
        loops: i32,
        limit: Option<Duration>,
    ) -> eyre::Result<()> {
        self.collect_finished();
        let volume = *self
            .state
            .lock()
            .volumes
            .get(channel)
            .ok_or_else(|| eyre::eyre!("no audio channel {channel}"))?;

        let source = decode(chunk, if loops < 0 { None } else { Some(loops as usize + 1) })?;
        let source: BoxedSource = match limit {
            Some(limit) => Box::new(source.take_duration(limit)),
            None => source,
        };
        let sink = self.sink(volume)?;
        sink.append(source);

        let previous = match self.state.lock().channels.get_mut(channel) {
            Some(slot) => slot.replace(sink),
            None => eyre::bail!("no audio channel {channel}"),
        };
        if let Some(previous) = previous {
            previous.stop();
        }
        Ok(())
    }

    fn halt_channel(&self, channel: usize) {
        let halted = self
            .state
            .lock()
            .channels
            .get_mut(channel)
            .and_then(Option::take);
        if let Some(sink) = halted {
            sink.stop();
            if let Some(callback) = self.finished.lock().as_ref() {
                callback(channel);
            }
        }
    }

    fn pause(&self, channel: Option<usize>) {
        let state = self.state.lock();
        match channel {
            Some(channel) => state
                .channels
                .get(channel)
                .and_then(Option::as_ref)
                .into_iter()
                .for_each(Sink::pause),
            None => state.channels.iter().flatten().for_each(Sink::pause),
        }
    }

    fn resume(&self, channel: Option<usize>) {
        let state = self.state.lock();
        match channel {
            Some(channel) => state
                .channels
                .get(channel)
                .and_then(Option::as_ref)
                .into_iter()
                .for_each(Sink::play),
            None => state.channels.iter().flatten().for_each(Sink::play),
        }
    }

    fn is_playing(&self, channel: usize) -> bool {
        self.with_sink(channel, |_| true).unwrap_or(false)
    }

    fn is_paused(&self, channel: usize) -> bool {
        self.with_sink(channel, Sink::is_paused).unwrap_or(false)
    }

    fn set_channel_volume(&self, channel: usize, volume: u8) {
        let mut state = self.state.lock();
        if let Some(slot) = state.volumes.get_mut(channel) {
            *slot = volume.min(MAX_VOLUME);
        }
        if let Some(Some(sink)) = state.channels.get(channel) {
            sink.set_volume(gain(volume));
        }
    }

    fn play_music(&self, music: &Chunk, loops: i32) -> eyre::Result<()> {
        let plays = match loops {
            loops if loops < 0 => None,
            0 => Some(1),
            loops => Some(loops as usize),
        };
        let source = decode(music, plays)?;
        let sink = self.sink(self.state.lock().music_volume)?;
        sink.append(source);

        if let Some(previous) = self.state.lock().music.replace(sink) {
            previous.stop();
        }
        Ok(())
    }

    fn is_music_playing(&self) -> bool {
        self.collect_finished();
        self.state.lock().music.is_some()
    }

    fn is_music_paused(&self) -> bool {
        self.state.lock().music.as_ref().is_some_and(Sink::is_paused)
    }

    fn pause_music(&self) {
        if let Some(music) = self.state.lock().music.as_ref() {
            music.pause();
        }
    }

    fn resume_music(&self) {
        if let Some(music) = self.state.lock().music.as_ref() {
            music.play();
        }
    }

    fn halt_music(&self) {
        if let Some(music) = self.state.lock().music.take() {
            music.stop();
        }
    }

    fn set_music_volume(&self, volume: u8) {
        let mut state = self.state.lock();
        state.music_volume = volume.min(MAX_VOLUME);
        if let Some(music) = state.music.as_ref() {
            music.set_volume(gain(volume));
        }
    }

    fn set_channel_finished(&self, callback: ChannelFinished) {
        *self.finished.lock() = Some(callback);
    }
}

impl Drop for RodioMixer {
    fn drop(&mut self) {
        {
            let mut state = self.state.lock();
            state.channels.iter().flatten().for_each(Sink::stop);
            if let Some(music) = state.music.take() {
                music.stop();
            }
        }

        drop(self.shutdown.take());
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                log::warn!("audio thread panicked");
            }
        }
    }
}

/// Decodes the chunk once and repeats it `plays` times, or forever
fn decode(chunk: &Chunk, plays: Option<usize>) -> eyre::Result<BoxedSource> {
    let decoded = Decoder::new(Cursor::new(chunk.clone()))
        .wrap_err("decoding audio")?
        .buffered();

    Ok(match plays {
        None => Box::new(decoded.repeat_infinite()),
        Some(plays) => Box::new(rodio::source::from_iter(
            std::iter::repeat(decoded).take(plays),
        )),
    })
}

fn gain(volume: u8) -> f32 {
    f32::from(volume.min(MAX_VOLUME)) / f32::from(MAX_VOLUME)
}
