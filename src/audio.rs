use anyhow::Context;
use fundsp::prelude::*;
use rodio::{OutputStream, Sink, buffer::SamplesBuffer};
use tracing::{debug, info};

const SAMPLE_RATE: u32 = 44_100;

/// Fire-and-forget sound cues emitted by the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cue {
    Flap,
    Score,
    Hit,
}

pub trait CueSink {
    fn play(&mut self, cue: Cue);
}

impl<T: CueSink + ?Sized> CueSink for Box<T> {
    fn play(&mut self, cue: Cue) {
        (**self).play(cue);
    }
}

/// Discards every cue.
#[derive(Debug, Default)]
pub struct Muted;

impl CueSink for Muted {
    fn play(&mut self, cue: Cue) {
        debug!(?cue, "cue muted");
    }
}

/// Plays cues on the default output device.
///
/// Each cue is synthesized once at startup; playback just hands a copy of
/// the samples to a detached sink.
pub struct Speaker {
    stream: OutputStream,
    flap: Vec<f32>,
    score: Vec<f32>,
    hit: Vec<f32>,
}

impl Speaker {
    pub fn open() -> anyhow::Result<Self> {
        let mut stream = rodio::OutputStreamBuilder::open_default_stream()
            .context("failed to open the default audio output device")?;
        stream.log_on_drop(false);
        info!("audio output opened");
        Ok(Self {
            stream,
            flap: render(flap_voice(), 0.12),
            score: render(score_voice(), 0.25),
            hit: render(hit_voice(), 0.5),
        })
    }
}

impl CueSink for Speaker {
    fn play(&mut self, cue: Cue) {
        let samples = match cue {
            Cue::Flap => &self.flap,
            Cue::Score => &self.score,
            Cue::Hit => &self.hit,
        };
        let sink = Sink::connect_new(self.stream.mixer());
        sink.append(SamplesBuffer::new(1, SAMPLE_RATE, samples.clone()));
        sink.detach();
    }
}

// ── Voices ──────────────────────────────────────────────────────────────────

fn render(mut voice: impl AudioUnit, seconds: f32) -> Vec<f32> {
    voice.set_sample_rate(SAMPLE_RATE as f64);
    let len = (SAMPLE_RATE as f32 * seconds) as usize;
    (0..len).map(|_| voice.get_mono()).collect()
}

// Short upward chirp.
fn flap_voice() -> impl AudioUnit {
    let freq = lfo(|t: f32| lerp(320.0, 640.0, (t / 0.1).min(1.0)));
    let gain = lfo(|t: f32| lerp(0.12, 0.0, (t / 0.12).min(1.0)));
    (freq >> sine::<f32>()) * gain
}

// Two-note ding.
fn score_voice() -> impl AudioUnit {
    let freq = lfo(|t: f32| -> f32 {
        if t < 0.08 { 988.0 } else { 1319.0 }
    });
    let gain = lfo(|t: f32| lerp(0.15, 0.0, (t / 0.25).min(1.0)));
    (freq >> sine::<f32>()) * gain
}

// Falling sawtooth, 400Hz to 80Hz over 0.4s.
fn hit_voice() -> impl AudioUnit {
    let freq = lfo(|t: f32| lerp(400.0, 80.0, (t / 0.4).min(1.0)));
    let gain = lfo(|t: f32| lerp(0.15, 0.0, (t / 0.5).min(1.0)));
    (freq >> saw()) * gain
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn voices_render_audible_and_fade_out() {
        for (voice, seconds) in [
            (render(flap_voice(), 0.12), 0.12),
            (render(score_voice(), 0.25), 0.25),
            (render(hit_voice(), 0.5), 0.5),
        ] {
            assert_eq!(voice.len(), (SAMPLE_RATE as f32 * seconds) as usize);
            assert!(voice.iter().any(|s| s.abs() > 0.01));
            assert!(voice.iter().all(|s| s.abs() <= 1.0));
            let tail = &voice[voice.len() - 32..];
            assert!(tail.iter().all(|s| s.abs() < 0.01));
        }
    }
}
