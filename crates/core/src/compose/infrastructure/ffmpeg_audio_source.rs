use std::path::Path;

use ffmpeg_next::format::sample::Type as SampleType;
use ffmpeg_next::format::Sample;
use ffmpeg_next::util::frame::audio::Audio as AudioFrame;

use crate::compose::domain::audio_clip::AudioClip;
use crate::compose::domain::audio_source::AudioSource;

/// Decodes any container/codec ffmpeg knows to mono f32 PCM via ffmpeg-next.
pub struct FfmpegAudioSource;

impl AudioSource for FfmpegAudioSource {
    fn decode(
        &self,
        path: &Path,
        sample_rate: u32,
    ) -> Result<AudioClip, Box<dyn std::error::Error>> {
        ffmpeg_next::init()?;

        let mut ictx = ffmpeg_next::format::input(path)?;

        let stream = ictx
            .streams()
            .best(ffmpeg_next::media::Type::Audio)
            .ok_or_else(|| format!("no audio stream in {}", path.display()))?;
        let stream_index = stream.index();

        let mut decoder = ffmpeg_next::codec::context::Context::from_parameters(
            stream.parameters(),
        )?
        .decoder()
        .audio()?;

        // Whatever the source format, everything funnels into mono planar
        // f32 at the composition rate.
        let mut resampler = ffmpeg_next::software::resampling::Context::get(
            decoder.format(),
            decoder.channel_layout(),
            decoder.rate(),
            Sample::F32(SampleType::Planar),
            ffmpeg_next::ChannelLayout::MONO,
            sample_rate,
        )?;

        let mut samples: Vec<f32> = Vec::new();
        let mut decoded = AudioFrame::empty();
        let mut resampled = AudioFrame::empty();

        let mut drain = |decoder: &mut ffmpeg_next::decoder::Audio,
                         samples: &mut Vec<f32>|
         -> Result<(), ffmpeg_next::Error> {
            while decoder.receive_frame(&mut decoded).is_ok() {
                resampler.run(&decoded, &mut resampled)?;
                collect_mono_f32(&resampled, samples);
            }
            Ok(())
        };

        for (packet_stream, packet) in ictx.packets() {
            if packet_stream.index() != stream_index {
                continue;
            }
            decoder.send_packet(&packet)?;
            drain(&mut decoder, &mut samples)?;
        }

        decoder.send_eof()?;
        drain(&mut decoder, &mut samples)?;

        // The resampler can hold a few buffered samples past EOF.
        if let Ok(Some(delay)) = resampler.flush(&mut resampled) {
            if delay.output > 0 {
                collect_mono_f32(&resampled, &mut samples);
            }
        }

        Ok(AudioClip::new(samples, sample_rate))
    }
}

fn collect_mono_f32(frame: &AudioFrame, out: &mut Vec<f32>) {
    let count = frame.samples();
    if count == 0 {
        return;
    }
    let plane = frame.data(0);
    // Planar mono f32: plane 0 holds exactly `count` floats.
    let floats = unsafe { std::slice::from_raw_parts(plane.as_ptr() as *const f32, count) };
    out.extend_from_slice(floats);
}
