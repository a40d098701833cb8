//! Sound cues for game events.
//!
//! Cues are short synthesized tones appended to detached rodio sinks, so
//! playback never blocks the game loop. Without an output device (or with
//! `--muted`) the player is silent.

use std::time::Duration;

use log::warn;
use rodio::{OutputStream, OutputStreamHandle, Sink};

/// Game events with an associated sound
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    PelletCollected,
    GameOver,
}

/// A linear frequency sweep with a decay envelope, mono f32 samples
#[derive(Debug, Clone)]
struct Tone {
    sample_rate: u32,
    start_freq: f32,
    end_freq: f32,
    gain: f32,
    total_frames: u32,
    frame: u32,
    phase: f32,
}

impl Tone {
    const SAMPLE_RATE: u32 = 44_100;

    fn new(start_freq: f32, end_freq: f32, duration_ms: u64, gain: f32) -> Self {
        let total_frames = (Self::SAMPLE_RATE as u64 * duration_ms / 1000) as u32;
        Self {
            sample_rate: Self::SAMPLE_RATE,
            start_freq,
            end_freq,
            gain,
            total_frames,
            frame: 0,
            phase: 0.0,
        }
    }

    fn for_cue(cue: SoundCue) -> Self {
        match cue {
            // short rising blip
            SoundCue::PelletCollected => Self::new(660.0, 990.0, 90, 0.25),
            // longer falling tone
            SoundCue::GameOver => Self::new(330.0, 110.0, 450, 0.30),
        }
    }

    fn duration(&self) -> Duration {
        Duration::from_secs_f64(self.total_frames as f64 / self.sample_rate as f64)
    }
}

impl Iterator for Tone {
    type Item = f32;

    fn next(&mut self) -> Option<f32> {
        if self.frame >= self.total_frames {
            return None;
        }

        let t = self.frame as f32 / self.total_frames as f32;
        let freq = self.start_freq + (self.end_freq - self.start_freq) * t;
        self.phase += 2.0 * std::f32::consts::PI * freq / self.sample_rate as f32;
        let envelope = 1.0 - t;
        self.frame += 1;

        Some(self.phase.sin() * envelope * self.gain)
    }
}

impl rodio::Source for Tone {
    fn current_frame_len(&self) -> Option<usize> {
        Some((self.total_frames - self.frame) as usize)
    }

    fn channels(&self) -> u16 {
        1
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn total_duration(&self) -> Option<Duration> {
        Some(self.duration())
    }
}

/// Fire-and-forget cue playback on the default output device
pub struct SoundPlayer {
    // keep the stream alive for as long as cues may play
    output: Option<(OutputStream, OutputStreamHandle)>,
}

impl SoundPlayer {
    /// Open the default output device. A missing device degrades to a
    /// silent player rather than failing startup.
    pub fn new(enabled: bool) -> Self {
        if !enabled {
            return Self { output: None };
        }

        match OutputStream::try_default() {
            Ok(output) => Self { output: Some(output) },
            Err(err) => {
                warn!("audio disabled: {err}");
                Self { output: None }
            }
        }
    }

    /// Silent player regardless of available devices
    pub fn muted() -> Self {
        Self { output: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.output.is_some()
    }

    /// Play a cue without waiting for it to finish
    pub fn play(&self, cue: SoundCue) {
        let Some((_, handle)) = &self.output else {
            return;
        };
        let Ok(sink) = Sink::try_new(handle) else {
            return;
        };
        sink.append(Tone::for_cue(cue));
        sink.detach();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rodio::Source;

    #[test]
    fn test_tone_sample_count_matches_duration() {
        let tone = Tone::new(440.0, 440.0, 100, 0.2);
        let expected = (Tone::SAMPLE_RATE as u64 / 10) as usize;
        assert_eq!(tone.clone().count(), expected);
        assert_eq!(tone.current_frame_len(), Some(expected));
    }

    #[test]
    fn test_tone_format() {
        let tone = Tone::for_cue(SoundCue::PelletCollected);
        assert_eq!(tone.channels(), 1);
        assert_eq!(tone.sample_rate(), 44_100);
        assert_eq!(tone.total_duration(), Some(Duration::from_millis(90)));
    }

    #[test]
    fn test_tone_amplitude_is_bounded() {
        let tone = Tone::for_cue(SoundCue::GameOver);
        let gain = tone.gain;
        for sample in tone {
            assert!(sample.abs() <= gain + f32::EPSILON);
        }
    }

    #[test]
    fn test_muted_player_swallows_cues() {
        let player = SoundPlayer::muted();
        assert!(!player.is_enabled());
        // must not panic or block
        player.play(SoundCue::PelletCollected);
        player.play(SoundCue::GameOver);
    }
}
