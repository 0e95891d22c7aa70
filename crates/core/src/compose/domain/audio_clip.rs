use thiserror::Error;

#[derive(Error, Debug)]
#[error("slice [{start_ms:.0}ms, {end_ms:.0}ms) out of range for a {len_ms:.0}ms clip")]
pub struct SliceError {
    pub start_ms: f64,
    pub end_ms: f64,
    pub len_ms: f64,
}

/// A clip of decoded audio: mono f32 PCM normalized to [-1.0, 1.0].
///
/// All clips in one composition share a sample rate, so spans from
/// different sources can be concatenated and mixed sample-for-sample.
#[derive(Clone, Debug, PartialEq)]
pub struct AudioClip {
    samples: Vec<f32>,
    sample_rate: u32,
}

impl AudioClip {
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    pub fn empty(sample_rate: u32) -> Self {
        Self::new(Vec::new(), sample_rate)
    }

    pub fn silent(duration_ms: f64, sample_rate: u32) -> Self {
        let len = (duration_ms / 1000.0 * sample_rate as f64) as usize;
        Self::new(vec![0.0; len], sample_rate)
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn duration_ms(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64 * 1000.0
    }

    fn index_at_ms(&self, ms: f64) -> usize {
        (ms / 1000.0 * self.sample_rate as f64) as usize
    }

    /// Copy out the span `[start_ms, end_ms)`. The end is clamped to the
    /// clip length; a start at or past the end of the clip is an error.
    pub fn slice_ms(&self, start_ms: f64, end_ms: f64) -> Result<AudioClip, SliceError> {
        let start = self.index_at_ms(start_ms);
        let end = self.index_at_ms(end_ms).min(self.samples.len());
        if start >= end {
            return Err(SliceError {
                start_ms,
                end_ms,
                len_ms: self.duration_ms(),
            });
        }
        Ok(AudioClip::new(
            self.samples[start..end].to_vec(),
            self.sample_rate,
        ))
    }

    /// Append another clip, linearly crossfading over `crossfade_ms`: the
    /// tail of this clip fades out while the head of the other fades in.
    /// A crossfade of 0 is plain concatenation. The fade length is clamped
    /// to the shorter of the two clips.
    pub fn append(&mut self, other: &AudioClip, crossfade_ms: f64) {
        let fade = self
            .index_at_ms(crossfade_ms)
            .min(self.samples.len())
            .min(other.samples.len());

        if fade == 0 {
            self.samples.extend_from_slice(&other.samples);
            return;
        }

        let tail_start = self.samples.len() - fade;
        for k in 0..fade {
            let t = (k + 1) as f32 / (fade + 1) as f32;
            let mixed = self.samples[tail_start + k] * (1.0 - t) + other.samples[k] * t;
            self.samples[tail_start + k] = mixed;
        }
        self.samples.extend_from_slice(&other.samples[fade..]);
    }

    /// Mix another clip onto this one starting at time zero. Samples past
    /// the end of this clip are dropped, matching overlay-onto-canvas
    /// semantics: the canvas length wins.
    pub fn overlay(&mut self, other: &AudioClip) {
        let n = self.samples.len().min(other.samples.len());
        for k in 0..n {
            self.samples[k] += other.samples[k];
        }
    }

    pub fn push_silence(&mut self, duration_ms: f64) {
        let len = self.index_at_ms(duration_ms);
        self.samples.extend(std::iter::repeat(0.0).take(len));
    }
}
