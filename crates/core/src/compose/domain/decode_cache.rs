use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::audio_clip::AudioClip;
use super::audio_source::AudioSource;

/// Per-call decode cache: each distinct source file is decoded once per
/// composition. Owned by a single `compose` activation and dropped when it
/// returns; nothing is shared across calls.
pub struct DecodeCache<'a> {
    source: &'a dyn AudioSource,
    sample_rate: u32,
    clips: HashMap<PathBuf, AudioClip>,
}

impl<'a> DecodeCache<'a> {
    pub fn new(source: &'a dyn AudioSource, sample_rate: u32) -> Self {
        Self {
            source,
            sample_rate,
            clips: HashMap::new(),
        }
    }

    pub fn get(&mut self, path: &Path) -> Result<&AudioClip, Box<dyn std::error::Error>> {
        if !self.clips.contains_key(path) {
            let clip = self.source.decode(path, self.sample_rate)?;
            self.clips.insert(path.to_path_buf(), clip);
        }
        Ok(&self.clips[path])
    }
}
