//! Audio system
//!
//! Procedurally generated sound effects and music - no external files
//! needed. One-shot effects play on detached sinks; the background loop
//! owns a dedicated sink so the game-over path can stop it.

use std::error::Error;

use fundsp::hacker32 as dsp;
use rodio::buffer::SamplesBuffer;
use rodio::source::Source;
use rodio::{OutputStream, OutputStreamHandle, Sink};

const SAMPLE_RATE: u32 = 44_100;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Player left the ground
    Jump,
    /// Player hit the floor; the run is over
    Death,
}

/// Audio manager for the game
///
/// Construction acquires the output device and starts the music loop;
/// failure is fatal to the caller by design, since a run without its
/// collaborators is not worth starting.
pub struct AudioManager {
    _stream: OutputStream,
    handle: OutputStreamHandle,
    music: Sink,
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
}

impl AudioManager {
    pub fn new() -> Result<Self, Box<dyn Error>> {
        let (stream, handle) = OutputStream::try_default()?;
        let music = Sink::try_new(&handle)?;

        let manager = Self {
            _stream: stream,
            handle,
            music,
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,
        };

        let samples = generate_music_samples(SAMPLE_RATE);
        manager
            .music
            .append(SamplesBuffer::new(1, SAMPLE_RATE, samples).repeat_infinite());
        manager
            .music
            .set_volume(manager.master_volume * manager.music_volume);

        Ok(manager)
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
        self.music
            .set_volume(self.effective_music_volume());
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        self.music.set_volume(self.effective_music_volume());
    }

    fn effective_sfx_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    fn effective_music_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.music_volume
        }
    }

    /// Play a one-shot sound effect
    pub fn play(&self, effect: SoundEffect) {
        let vol = self.effective_sfx_volume();
        if vol <= 0.0 {
            return;
        }

        let samples = match effect {
            SoundEffect::Jump => generate_jump_samples(SAMPLE_RATE),
            SoundEffect::Death => generate_death_samples(SAMPLE_RATE),
        };

        if let Ok(sink) = Sink::try_new(&self.handle) {
            sink.set_volume(vol);
            sink.append(SamplesBuffer::new(1, SAMPLE_RATE, samples));
            sink.detach();
        }
    }

    /// Silence the background loop for good; there is no restart
    pub fn stop_music(&self) {
        self.music.stop();
    }
}

/// Rising sine sweep, short and snappy
fn generate_jump_samples(sample_rate: u32) -> Vec<f32> {
    let duration = 0.15;
    let mut node = (dsp::lfo(move |t: f32| dsp::xerp(300.0, 740.0, (t / duration).min(1.0)))
        >> dsp::sine())
        * dsp::lfo(move |t: f32| dsp::xerp(0.2, 0.002, (t / duration).min(1.0)));
    render_mono(&mut node, sample_rate, duration)
}

/// Falling saw sweep; the sad trombone of the floor
fn generate_death_samples(sample_rate: u32) -> Vec<f32> {
    let duration = 0.5;
    let mut node = (dsp::lfo(|t: f32| dsp::lerp(400.0, 80.0, (t / 0.4).min(1.0))) >> dsp::saw())
        * dsp::lfo(move |t: f32| dsp::lerp(0.15, 0.0, (t / duration).min(1.0)));
    render_mono(&mut node, sample_rate, duration)
}

/// A short arpeggio loop that reads as background music without grating
fn generate_music_samples(sample_rate: u32) -> Vec<f32> {
    const NOTES: [f32; 8] = [262.0, 330.0, 392.0, 523.0, 392.0, 330.0, 262.0, 196.0];
    let note_len = 0.24f32;

    let mut samples = Vec::with_capacity((sample_rate as f32 * note_len) as usize * NOTES.len());
    for freq in NOTES {
        let mut node = dsp::sine_hz(freq)
            * dsp::lfo(move |t: f32| dsp::xerp(0.12, 0.01, (t / note_len).min(1.0)));
        samples.extend(render_mono(&mut node, sample_rate, note_len));
    }
    samples
}

fn render_mono(node: &mut dyn dsp::AudioUnit, sample_rate: u32, duration: f32) -> Vec<f32> {
    node.set_sample_rate(sample_rate as f64);
    node.reset();

    let sample_count = (sample_rate as f32 * duration) as usize;
    let mut samples = Vec::with_capacity(sample_count);
    for _ in 0..sample_count {
        samples.push(node.get_mono());
    }
    samples
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effect_buffers_are_sane() {
        for samples in [
            generate_jump_samples(SAMPLE_RATE),
            generate_death_samples(SAMPLE_RATE),
            generate_music_samples(SAMPLE_RATE),
        ] {
            assert!(!samples.is_empty());
            assert!(samples.iter().all(|s| s.abs() <= 1.0));
            assert!(samples.iter().any(|s| s.abs() > 0.01), "buffer is silence");
        }
    }
}
