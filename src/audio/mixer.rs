//! Summing mixer for overlapping speech buffers
//!
//! Every started buffer becomes an independent voice. The output callback
//! pulls one frame at a time from all live voices, so two payloads started
//! back to back are heard on top of each other.

/// One started buffer and its read position
#[derive(Debug, Clone)]
pub struct Voice {
    samples: Vec<f32>,
    position: usize,
}

impl Voice {
    pub fn new(samples: Vec<f32>) -> Self {
        Self {
            samples,
            position: 0,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.position >= self.samples.len()
    }

    pub fn remaining(&self) -> usize {
        self.samples.len().saturating_sub(self.position)
    }

    fn next_sample(&mut self) -> Option<f32> {
        let sample = self.samples.get(self.position).copied()?;
        self.position += 1;
        Some(sample)
    }
}

/// Fill an interleaved output buffer from the active voices.
///
/// Mono voices are copied to every channel; the sum is clamped to [-1, 1].
/// Finished voices are dropped.
pub fn mix_into(voices: &mut Vec<Voice>, output: &mut [f32], channels: usize) {
    let channels = channels.max(1);

    for frame in output.chunks_mut(channels) {
        let mut acc = 0.0f32;
        for voice in voices.iter_mut() {
            if let Some(sample) = voice.next_sample() {
                acc += sample;
            }
        }
        frame.fill(acc.clamp(-1.0, 1.0));
    }

    voices.retain(|v| !v.is_finished());
}
