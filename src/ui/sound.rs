/// Sound engine: procedural 8-bit style sound effects via rodio.
///
/// All sounds are generated as in-memory WAV buffers at init time.
/// Playback is fire-and-forget (non-blocking) via rodio's Sink.
/// The engine decides which event gets which sound; the core only ever
/// emits `GameEvent`s and knows nothing about audio or the mute setting.
///
/// Compile without the "sound" feature to disable audio entirely
/// (the stub SoundEngine does nothing).

#[cfg(not(feature = "sound"))]
use crate::sim::event::GameEvent;

#[cfg(feature = "sound")]
mod inner {
    use std::io::Cursor;
    use std::sync::Arc;

    use rodio::{OutputStream, OutputStreamHandle, Sink};

    use crate::sim::event::GameEvent;

    const SAMPLE_RATE: u32 = 22050;
    const TAU: f32 = 2.0 * std::f32::consts::PI;

    /// Pre-generated WAV buffers for each sound effect.
    pub struct SoundEngine {
        _stream: OutputStream,
        handle: OutputStreamHandle,
        sfx_roll: Arc<Vec<u8>>,
        sfx_fall: Arc<Vec<u8>>,
        sfx_switch: Arc<Vec<u8>>,
        sfx_crack: Arc<Vec<u8>>,
        sfx_lever: Arc<Vec<u8>>,
        sfx_win: Arc<Vec<u8>>,
        sfx_over: Arc<Vec<u8>>,
    }

    impl SoundEngine {
        pub fn new() -> Option<Self> {
            let (stream, handle) = OutputStream::try_default().ok()?;
            Some(SoundEngine {
                _stream: stream,
                handle,
                sfx_roll: Arc::new(make_wav(&gen_roll())),
                sfx_fall: Arc::new(make_wav(&gen_fall())),
                sfx_switch: Arc::new(make_wav(&gen_switch())),
                sfx_crack: Arc::new(make_wav(&gen_crack())),
                sfx_lever: Arc::new(make_wav(&gen_lever())),
                sfx_win: Arc::new(make_wav(&gen_win())),
                sfx_over: Arc::new(make_wav(&gen_over())),
            })
        }

        pub fn handle_event(&self, event: &GameEvent) {
            match event {
                GameEvent::Moved => self.play(&self.sfx_roll),
                GameEvent::Fell => self.play(&self.sfx_fall),
                GameEvent::SwitchToggled { .. } => self.play(&self.sfx_switch),
                GameEvent::TileCollapsed { .. } => self.play(&self.sfx_crack),
                GameEvent::LeverEntered => self.play(&self.sfx_lever),
                GameEvent::Won => self.play(&self.sfx_win),
                GameEvent::GameOver => self.play(&self.sfx_over),
            }
        }

        fn play(&self, buf: &Arc<Vec<u8>>) {
            if let Ok(sink) = Sink::try_new(&self.handle) {
                let cursor = Cursor::new(buf.as_ref().clone());
                if let Ok(src) = rodio::Decoder::new(cursor) {
                    sink.append(src);
                    sink.detach(); // fire-and-forget
                }
            }
        }
    }

    // ════════════════════════════════════════════════════════════
    //  Waveform generators — all produce Vec<f32> mono samples
    // ════════════════════════════════════════════════════════════

    /// One note with a hard attack and exponential-ish decay.
    fn push_note(samples: &mut Vec<f32>, freq: f32, dur: f32, vol: f32) {
        let n = (SAMPLE_RATE as f32 * dur) as usize;
        for i in 0..n {
            let t = i as f32 / SAMPLE_RATE as f32;
            let env = (1.0 - i as f32 / n as f32).powf(1.5);
            // Sine + a touch of 2nd harmonic for body.
            let wave = (t * freq * TAU).sin() * 0.8 + (t * freq * 2.0 * TAU).sin() * 0.2;
            samples.push(wave * env * vol);
        }
    }

    /// Roll: a woody knock — short low thud.
    fn gen_roll() -> Vec<f32> {
        let mut s = Vec::new();
        push_note(&mut s, 180.0, 0.05, 0.35);
        s
    }

    /// Fall: long descending glide into silence.
    fn gen_fall() -> Vec<f32> {
        let dur = 0.5;
        let n = (SAMPLE_RATE as f32 * dur) as usize;
        (0..n)
            .map(|i| {
                let t = i as f32 / n as f32;
                let freq = 500.0 * (1.0 - t * 0.8);
                let ti = i as f32 / SAMPLE_RATE as f32;
                (ti * freq * TAU).sin() * (1.0 - t).powf(1.2) * 0.3
            })
            .collect()
    }

    /// Switch: two quick alternating tones, like a relay clicking over.
    fn gen_switch() -> Vec<f32> {
        let mut s = Vec::new();
        push_note(&mut s, 740.0, 0.06, 0.3);
        push_note(&mut s, 988.0, 0.08, 0.3);
        s
    }

    /// Collapse: noise burst, glass giving way.
    fn gen_crack() -> Vec<f32> {
        let dur = 0.18;
        let n = (SAMPLE_RATE as f32 * dur) as usize;
        let mut rng: u32 = 0x2545_f491;
        (0..n)
            .map(|i| {
                let t = i as f32 / n as f32;
                rng ^= rng << 13;
                rng ^= rng >> 17;
                rng ^= rng << 5;
                let noise = (rng as f32 / u32::MAX as f32) * 2.0 - 1.0;
                noise * (1.0 - t).powf(2.0) * 0.35
            })
            .collect()
    }

    /// Lever: heavy metallic clunk, low fifth.
    fn gen_lever() -> Vec<f32> {
        let mut s = Vec::new();
        push_note(&mut s, 220.0, 0.09, 0.35);
        push_note(&mut s, 330.0, 0.12, 0.3);
        s
    }

    /// Win: rising major arpeggio with a sustained top note.
    fn gen_win() -> Vec<f32> {
        let mut s = Vec::new();
        for freq in [392.0, 494.0, 587.0] {
            push_note(&mut s, freq, 0.09, 0.3);
        }
        push_note(&mut s, 784.0, 0.3, 0.3);
        s
    }

    /// Game over: slow falling minor line.
    fn gen_over() -> Vec<f32> {
        let mut s = Vec::new();
        for freq in [440.0, 392.0, 330.0, 262.0] {
            push_note(&mut s, freq, 0.16, 0.3);
        }
        s
    }

    // ── WAV container (16-bit PCM mono) ──

    fn make_wav(samples: &[f32]) -> Vec<u8> {
        let data_len = (samples.len() * 2) as u32;
        let mut out = Vec::with_capacity(44 + data_len as usize);
        out.extend_from_slice(b"RIFF");
        out.extend_from_slice(&(36 + data_len).to_le_bytes());
        out.extend_from_slice(b"WAVE");
        out.extend_from_slice(b"fmt ");
        out.extend_from_slice(&16u32.to_le_bytes());
        out.extend_from_slice(&1u16.to_le_bytes()); // PCM
        out.extend_from_slice(&1u16.to_le_bytes()); // mono
        out.extend_from_slice(&SAMPLE_RATE.to_le_bytes());
        out.extend_from_slice(&(SAMPLE_RATE * 2).to_le_bytes()); // byte rate
        out.extend_from_slice(&2u16.to_le_bytes()); // block align
        out.extend_from_slice(&16u16.to_le_bytes()); // bits per sample
        out.extend_from_slice(b"data");
        out.extend_from_slice(&data_len.to_le_bytes());
        for &sample in samples {
            let v = (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
            out.extend_from_slice(&v.to_le_bytes());
        }
        out
    }
}

#[cfg(feature = "sound")]
pub use inner::SoundEngine;

#[cfg(not(feature = "sound"))]
pub struct SoundEngine;

#[cfg(not(feature = "sound"))]
impl SoundEngine {
    pub fn new() -> Option<Self> {
        None
    }

    pub fn handle_event(&self, _event: &GameEvent) {}
}
