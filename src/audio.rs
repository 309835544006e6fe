//! Sound effects
//!
//! Three one-shot effects: a step, a hit and a level-clear jingle. Real
//! recordings are loaded from `assets/sounds/` when present; missing files
//! fall back to short square-wave blips synthesized straight into WAV
//! bytes, so the game is never mute.

use macroquad::audio::{load_sound_from_bytes, play_sound, PlaySoundParams, Sound};
use macroquad::file::load_file;

const DEFAULT_VOLUME: f32 = 0.5;
const HIT_VOLUME: f32 = 0.75;

pub struct Sounds {
    hit: Option<Sound>,
    step: Option<Sound>,
    success: Option<Sound>,
}

impl Sounds {
    pub async fn load() -> Self {
        Self {
            hit: load_one("assets/sounds/hit.wav", &[(196.0, 0.1)]).await,
            step: load_one("assets/sounds/step.wav", &[(140.0, 0.05)]).await,
            success: load_one("assets/sounds/success.wav", &[(523.0, 0.09), (784.0, 0.14)]).await,
        }
    }

    /// No audio at all; handy off the main loop.
    #[cfg(test)]
    pub fn silent() -> Self {
        Self {
            hit: None,
            step: None,
            success: None,
        }
    }

    pub fn hit(&self) {
        play(&self.hit, HIT_VOLUME);
    }

    pub fn step(&self) {
        play(&self.step, 1.0);
    }

    pub fn success(&self) {
        play(&self.success, 1.0);
    }
}

fn play(sound: &Option<Sound>, volume: f32) {
    if let Some(sound) = sound {
        play_sound(
            sound,
            PlaySoundParams {
                looped: false,
                volume: volume * DEFAULT_VOLUME,
            },
        );
    }
}

async fn load_one(path: &str, fallback_tones: &[(f32, f32)]) -> Option<Sound> {
    let bytes = match load_file(path).await {
        Ok(bytes) => bytes,
        Err(_) => tone_wav(fallback_tones),
    };
    match load_sound_from_bytes(&bytes).await {
        Ok(sound) => Some(sound),
        Err(error) => {
            println!("sound {path} unavailable: {error}");
            None
        }
    }
}

/// Renders a sequence of `(frequency, seconds)` square-wave tones as a
/// 16-bit mono WAV file in memory, with a linear fade per tone to avoid
/// clicks.
fn tone_wav(tones: &[(f32, f32)]) -> Vec<u8> {
    const SAMPLE_RATE: u32 = 22_050;

    let mut samples: Vec<i16> = Vec::new();
    for &(frequency, seconds) in tones {
        let count = (SAMPLE_RATE as f32 * seconds) as usize;
        for i in 0..count {
            let t = i as f32 / SAMPLE_RATE as f32;
            let fade = 1.0 - i as f32 / count as f32;
            let level = if (t * frequency).fract() < 0.5 { 1.0 } else { -1.0 };
            samples.push((level * fade * 0.25 * i16::MAX as f32) as i16);
        }
    }

    let data_len = (samples.len() * 2) as u32;
    let mut wav = Vec::with_capacity(44 + samples.len() * 2);
    wav.extend_from_slice(b"RIFF");
    wav.extend_from_slice(&(36 + data_len).to_le_bytes());
    wav.extend_from_slice(b"WAVE");
    wav.extend_from_slice(b"fmt ");
    wav.extend_from_slice(&16u32.to_le_bytes()); // fmt chunk size
    wav.extend_from_slice(&1u16.to_le_bytes()); // pcm
    wav.extend_from_slice(&1u16.to_le_bytes()); // mono
    wav.extend_from_slice(&SAMPLE_RATE.to_le_bytes());
    wav.extend_from_slice(&(SAMPLE_RATE * 2).to_le_bytes()); // byte rate
    wav.extend_from_slice(&2u16.to_le_bytes()); // block align
    wav.extend_from_slice(&16u16.to_le_bytes()); // bits per sample
    wav.extend_from_slice(b"data");
    wav.extend_from_slice(&data_len.to_le_bytes());
    for sample in samples {
        wav.extend_from_slice(&sample.to_le_bytes());
    }
    wav
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tone_wav_has_a_valid_header() {
        let wav = tone_wav(&[(440.0, 0.1)]);
        assert_eq!(&wav[0..4], b"RIFF");
        assert_eq!(&wav[8..12], b"WAVE");
        assert_eq!(&wav[12..16], b"fmt ");
        assert_eq!(&wav[36..40], b"data");

        let riff_len = u32::from_le_bytes(wav[4..8].try_into().unwrap());
        assert_eq!(riff_len as usize, wav.len() - 8);
        let data_len = u32::from_le_bytes(wav[40..44].try_into().unwrap());
        assert_eq!(data_len as usize, wav.len() - 44);
    }

    #[test]
    fn test_tone_wav_is_not_silence() {
        let wav = tone_wav(&[(200.0, 0.05)]);
        let loud = wav[44..]
            .chunks_exact(2)
            .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
            .any(|sample| sample.abs() > 1000);
        assert!(loud);
    }

    #[test]
    fn test_tone_lengths_add_up() {
        let wav = tone_wav(&[(300.0, 0.1), (500.0, 0.1)]);
        let data_len = u32::from_le_bytes(wav[40..44].try_into().unwrap());
        // Two tones of 0.1 s at 22050 Hz, two bytes per sample.
        assert_eq!(data_len, 2 * 2205 * 2);
    }
}
