use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use thiserror::Error;

use crate::search::domain::match_record::MatchRecord;
use crate::shared::constants::COMPOSE_SAMPLE_RATE;
use crate::transcript::domain::corpus::audio_path;

use super::audio_clip::AudioClip;
use super::audio_sink::AudioSink;
use super::audio_source::AudioSource;
use super::decode_cache::DecodeCache;

#[derive(Error, Debug)]
pub enum ComposeError {
    #[error("failed to export {path}: {message}")]
    Export { path: PathBuf, message: String },
    #[error("composition cancelled")]
    Cancelled,
}

#[derive(Clone, Copy, Debug)]
pub struct ComposeOptions {
    /// Silence appended after every clip, in milliseconds.
    pub padding_ms: f64,
    /// Overlap between consecutive clips, in milliseconds.
    pub crossfade_ms: f64,
    /// Overlay all clips at time zero instead of concatenating.
    pub layer: bool,
}

impl Default for ComposeOptions {
    fn default() -> Self {
        Self {
            padding_ms: 0.0,
            crossfade_ms: 0.0,
            layer: false,
        }
    }
}

/// Why one match record was left out of the rendered output.
#[derive(Clone, Debug)]
pub enum SkipReason {
    Decode(String),
    Slice(String),
}

#[derive(Clone, Debug)]
pub struct RenderedMatch {
    pub record: MatchRecord,
    /// Length of the clip actually cut from the source, in milliseconds.
    pub duration_ms: f64,
}

#[derive(Clone, Debug)]
pub struct SkippedMatch {
    pub record: MatchRecord,
    pub reason: SkipReason,
}

/// Outcome of one composition: which records made it into the output and
/// which were dropped, so callers can report what the supercut contains.
#[derive(Debug, Default)]
pub struct ComposeReport {
    pub rendered: Vec<RenderedMatch>,
    pub skipped: Vec<SkippedMatch>,
}

/// Splices match spans into a single output track.
///
/// Stateless across calls: each `compose` opens its own decode cache,
/// accumulates, exports, and drops everything.
pub struct Composer {
    source: Box<dyn AudioSource>,
    sink: Box<dyn AudioSink>,
    cancelled: Option<Arc<AtomicBool>>,
}

impl Composer {
    pub fn new(source: Box<dyn AudioSource>, sink: Box<dyn AudioSink>) -> Self {
        Self {
            source,
            sink,
            cancelled: None,
        }
    }

    /// Cancellation flag checked between records.
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancelled = Some(flag);
        self
    }

    /// Build the output track from the match records, in order.
    ///
    /// Sequential mode starts with the first record's clip and appends each
    /// following clip with the configured crossfade; padding silence goes
    /// after every clip. Layer mode starts from a silent canvas as long as
    /// the longest record and overlays every clip at time zero. A record
    /// whose decode or slice fails is skipped and the rest continue; the
    /// report says which records were rendered. An empty match list writes
    /// an empty track.
    pub fn compose(
        &self,
        matches: &[MatchRecord],
        output: &Path,
        options: &ComposeOptions,
    ) -> Result<ComposeReport, ComposeError> {
        let mut cache = DecodeCache::new(self.source.as_ref(), COMPOSE_SAMPLE_RATE);
        let mut report = ComposeReport::default();

        let mut track = if options.layer {
            let longest_ms = matches
                .iter()
                .map(|m| m.duration() * 1000.0)
                .fold(0.0, f64::max);
            AudioClip::silent(longest_ms, COMPOSE_SAMPLE_RATE)
        } else {
            AudioClip::empty(COMPOSE_SAMPLE_RATE)
        };

        for record in matches {
            if let Some(flag) = &self.cancelled {
                if flag.load(Ordering::Relaxed) {
                    return Err(ComposeError::Cancelled);
                }
            }

            let clip = match self.cut(&mut cache, record) {
                Ok(clip) => clip,
                Err(reason) => {
                    log::warn!("skipping match at {:.2}s: {reason:?}", record.start);
                    report.skipped.push(SkippedMatch {
                        record: record.clone(),
                        reason,
                    });
                    continue;
                }
            };

            let duration_ms = clip.duration_ms();
            if options.layer {
                track.overlay(&clip);
            } else if report.rendered.is_empty() {
                track.append(&clip, 0.0);
            } else {
                track.append(&clip, options.crossfade_ms);
            }
            if options.padding_ms > 0.0 {
                track.push_silence(options.padding_ms);
            }

            report.rendered.push(RenderedMatch {
                record: record.clone(),
                duration_ms,
            });
        }

        self.sink
            .export(output, &track)
            .map_err(|e| ComposeError::Export {
                path: output.to_path_buf(),
                message: e.to_string(),
            })?;

        log::info!(
            "composed {} of {} matches into {}",
            report.rendered.len(),
            matches.len(),
            output.display()
        );
        Ok(report)
    }

    fn cut(&self, cache: &mut DecodeCache, record: &MatchRecord) -> Result<AudioClip, SkipReason> {
        let source_path = audio_path(&record.file);
        let decoded = cache
            .get(&source_path)
            .map_err(|e| SkipReason::Decode(e.to_string()))?;
        decoded
            .slice_ms(record.start * 1000.0, record.end * 1000.0)
            .map_err(|e| SkipReason::Slice(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct StubSource {
        /// Clip length in ms handed out for every path, or None to fail.
        clip_ms: Option<f64>,
    }

    impl AudioSource for StubSource {
        fn decode(
            &self,
            _: &Path,
            sample_rate: u32,
        ) -> Result<AudioClip, Box<dyn std::error::Error>> {
            match self.clip_ms {
                Some(ms) => Ok(AudioClip::new(
                    vec![0.25; (ms / 1000.0 * sample_rate as f64) as usize],
                    sample_rate,
                )),
                None => Err("no such file".into()),
            }
        }
    }

    struct CapturingSink {
        exported: Rc<RefCell<Option<AudioClip>>>,
    }

    impl AudioSink for CapturingSink {
        fn export(&self, _: &Path, clip: &AudioClip) -> Result<(), Box<dyn std::error::Error>> {
            *self.exported.borrow_mut() = Some(clip.clone());
            Ok(())
        }
    }

    fn record(start: f64, end: f64) -> MatchRecord {
        MatchRecord {
            start,
            end,
            file: PathBuf::from("a.mp3.transcription.txt"),
            words: vec!["w".to_string()],
            confidence: None,
        }
    }

    fn composer(clip_ms: Option<f64>) -> (Composer, Rc<RefCell<Option<AudioClip>>>) {
        let exported = Rc::new(RefCell::new(None));
        let sink = CapturingSink {
            exported: exported.clone(),
        };
        (
            Composer::new(Box::new(StubSource { clip_ms }), Box::new(sink)),
            exported,
        )
    }

    #[test]
    fn test_empty_match_list_writes_empty_track() {
        let (composer, exported) = composer(Some(10_000.0));
        let report = composer
            .compose(&[], Path::new("out.mp3"), &ComposeOptions::default())
            .unwrap();
        assert!(report.rendered.is_empty());
        assert_eq!(exported.borrow().as_ref().unwrap().samples().len(), 0);
    }

    #[test]
    fn test_sequential_durations_add_up() {
        let (composer, exported) = composer(Some(10_000.0));
        let matches = vec![record(0.0, 1.0), record(2.0, 3.5)];
        let report = composer
            .compose(&matches, Path::new("out.mp3"), &ComposeOptions::default())
            .unwrap();
        assert_eq!(report.rendered.len(), 2);
        let track = exported.borrow();
        let got = track.as_ref().unwrap().duration_ms();
        assert!((got - 2500.0).abs() < 1.0, "got {got}ms");
    }

    #[test]
    fn test_padding_after_every_clip() {
        let (composer, exported) = composer(Some(10_000.0));
        let matches = vec![record(0.0, 1.0), record(0.0, 1.0)];
        let options = ComposeOptions {
            padding_ms: 100.0,
            ..Default::default()
        };
        composer
            .compose(&matches, Path::new("out.mp3"), &options)
            .unwrap();
        let track = exported.borrow();
        let got = track.as_ref().unwrap().duration_ms();
        assert!((got - 2200.0).abs() < 1.0, "got {got}ms");
    }

    #[test]
    fn test_crossfade_shortens_total() {
        let (composer, exported) = composer(Some(10_000.0));
        let matches = vec![record(0.0, 1.0), record(0.0, 1.0)];
        let options = ComposeOptions {
            crossfade_ms: 200.0,
            ..Default::default()
        };
        composer
            .compose(&matches, Path::new("out.mp3"), &options)
            .unwrap();
        let track = exported.borrow();
        let got = track.as_ref().unwrap().duration_ms();
        assert!((got - 1800.0).abs() < 1.0, "got {got}ms");
    }

    #[test]
    fn test_layer_length_is_longest_record() {
        let (composer, exported) = composer(Some(10_000.0));
        let matches = vec![record(0.0, 1.0), record(0.0, 3.0)];
        let options = ComposeOptions {
            layer: true,
            ..Default::default()
        };
        let report = composer
            .compose(&matches, Path::new("out.mp3"), &options)
            .unwrap();
        assert_eq!(report.rendered.len(), 2);
        let track = exported.borrow();
        let got = track.as_ref().unwrap().duration_ms();
        assert!((got - 3000.0).abs() < 1.0, "got {got}ms");
    }

    #[test]
    fn test_slice_failure_skips_record_only() {
        let (composer, _) = composer(Some(10_000.0));
        // One record reaches past the decoded clip.
        let matches = vec![
            record(0.0, 1.0),
            record(0.0, 1.0),
            record(20.0, 21.0),
            record(0.0, 1.0),
            record(0.0, 1.0),
        ];
        let report = composer
            .compose(&matches, Path::new("out.mp3"), &ComposeOptions::default())
            .unwrap();
        assert_eq!(report.rendered.len(), 4);
        assert_eq!(report.skipped.len(), 1);
        assert!(matches!(report.skipped[0].reason, SkipReason::Slice(_)));
    }

    #[test]
    fn test_decode_failure_skips_record() {
        let (composer, _) = composer(None);
        let report = composer
            .compose(
                &[record(0.0, 1.0)],
                Path::new("out.mp3"),
                &ComposeOptions::default(),
            )
            .unwrap();
        assert!(report.rendered.is_empty());
        assert!(matches!(report.skipped[0].reason, SkipReason::Decode(_)));
    }

    #[test]
    fn test_rendered_duration_reported() {
        let (composer, _) = composer(Some(10_000.0));
        let report = composer
            .compose(
                &[record(1.0, 2.5)],
                Path::new("out.mp3"),
                &ComposeOptions::default(),
            )
            .unwrap();
        assert!((report.rendered[0].duration_ms - 1500.0).abs() < 1.0);
    }

    #[test]
    fn test_cancellation_between_records() {
        let exported = Rc::new(RefCell::new(None));
        let flag = Arc::new(AtomicBool::new(true));
        let composer = Composer::new(
            Box::new(StubSource {
                clip_ms: Some(10_000.0),
            }),
            Box::new(CapturingSink {
                exported: exported.clone(),
            }),
        )
        .with_cancel_flag(flag);
        let err = composer
            .compose(
                &[record(0.0, 1.0)],
                Path::new("out.mp3"),
                &ComposeOptions::default(),
            )
            .unwrap_err();
        assert!(matches!(err, ComposeError::Cancelled));
    }
}
