use std::path::Path;

use crate::compose::domain::audio_clip::AudioClip;
use crate::compose::domain::audio_sink::AudioSink;

/// Encodes a clip to a standalone audio file using ffmpeg-next, picking the
/// codec from the output extension (`.wav` stays PCM, `.mp3` uses MP3,
/// everything else gets AAC in whatever container the extension implies).
pub struct FfmpegAudioSink;

impl AudioSink for FfmpegAudioSink {
    fn export(&self, path: &Path, clip: &AudioClip) -> Result<(), Box<dyn std::error::Error>> {
        ffmpeg_next::init()?;

        let codec_id = codec_for_extension(path);
        let codec = ffmpeg_next::encoder::find(codec_id)
            .ok_or_else(|| format!("no encoder for {codec_id:?}"))?;

        let mut octx = ffmpeg_next::format::output(&path)?;
        let mut ost = octx.add_stream(Some(codec))?;
        let stream_idx = ost.index();

        let mut encoder = ffmpeg_next::codec::context::Context::new_with_codec(codec)
            .encoder()
            .audio()?;
        encoder.set_rate(clip.sample_rate() as i32);
        encoder.set_channel_layout(ffmpeg_next::ChannelLayout::MONO);

        let sample_format = sample_format_for(codec_id);
        encoder.set_format(sample_format);

        let mut encoder = encoder.open_as(codec)?;
        ost.set_parameters(&encoder);

        let enc_time_base = encoder.time_base();
        let frame_size = encoder.frame_size() as usize;

        octx.write_header()?;
        let ost_time_base = octx
            .stream(stream_idx)
            .ok_or("output stream vanished")?
            .time_base();

        encode_clip(
            &mut encoder,
            clip,
            sample_format,
            &mut octx,
            stream_idx,
            enc_time_base,
            ost_time_base,
            frame_size,
        )?;

        octx.write_trailer()?;
        Ok(())
    }
}

fn codec_for_extension(path: &Path) -> ffmpeg_next::codec::Id {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "wav" => ffmpeg_next::codec::Id::PCM_S16LE,
        "mp3" => ffmpeg_next::codec::Id::MP3,
        "flac" => ffmpeg_next::codec::Id::FLAC,
        "ogg" | "oga" => ffmpeg_next::codec::Id::VORBIS,
        _ => ffmpeg_next::codec::Id::AAC,
    }
}

fn sample_format_for(codec_id: ffmpeg_next::codec::Id) -> ffmpeg_next::format::Sample {
    match codec_id {
        ffmpeg_next::codec::Id::PCM_S16LE | ffmpeg_next::codec::Id::FLAC => {
            ffmpeg_next::format::Sample::I16(ffmpeg_next::format::sample::Type::Packed)
        }
        _ => ffmpeg_next::format::Sample::F32(ffmpeg_next::format::sample::Type::Planar),
    }
}

/// Chunk the clip into encoder-sized frames and write the packets out.
#[allow(clippy::too_many_arguments)]
fn encode_clip(
    encoder: &mut ffmpeg_next::codec::encoder::audio::Encoder,
    clip: &AudioClip,
    sample_format: ffmpeg_next::format::Sample,
    octx: &mut ffmpeg_next::format::context::Output,
    stream_idx: usize,
    enc_time_base: ffmpeg_next::Rational,
    ost_time_base: ffmpeg_next::Rational,
    frame_size: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let samples = clip.samples();
    let effective_frame_size = if frame_size == 0 { 1024 } else { frame_size };

    let mut pts: i64 = 0;

    for chunk in samples.chunks(effective_frame_size) {
        let mut frame = ffmpeg_next::util::frame::audio::Audio::new(
            sample_format,
            chunk.len(),
            ffmpeg_next::ChannelLayout::MONO,
        );
        frame.set_rate(clip.sample_rate());
        frame.set_pts(Some(pts));

        fill_frame(&mut frame, chunk, sample_format);

        encoder.send_frame(&frame)?;
        drain_packets(encoder, octx, stream_idx, enc_time_base, ost_time_base)?;

        pts += chunk.len() as i64;
    }

    encoder.send_eof()?;
    drain_packets(encoder, octx, stream_idx, enc_time_base, ost_time_base)?;

    Ok(())
}

/// Copy f32 samples into the frame's first data plane, converting to i16
/// when the encoder wants packed integers. Mono, so packed and planar
/// layouts are byte-identical.
fn fill_frame(
    frame: &mut ffmpeg_next::util::frame::audio::Audio,
    chunk: &[f32],
    sample_format: ffmpeg_next::format::Sample,
) {
    match sample_format {
        ffmpeg_next::format::Sample::I16(_) => {
            let converted: Vec<i16> = chunk
                .iter()
                .map(|s| (s.clamp(-1.0, 1.0) * i16::MAX as f32) as i16)
                .collect();
            let src_bytes = unsafe {
                std::slice::from_raw_parts(converted.as_ptr() as *const u8, converted.len() * 2)
            };
            frame.data_mut(0)[..src_bytes.len()].copy_from_slice(src_bytes);
        }
        _ => {
            let src_bytes = unsafe {
                std::slice::from_raw_parts(chunk.as_ptr() as *const u8, chunk.len() * 4)
            };
            frame.data_mut(0)[..src_bytes.len()].copy_from_slice(src_bytes);
        }
    }
}

fn drain_packets(
    encoder: &mut ffmpeg_next::codec::encoder::audio::Encoder,
    octx: &mut ffmpeg_next::format::context::Output,
    stream_idx: usize,
    enc_time_base: ffmpeg_next::Rational,
    ost_time_base: ffmpeg_next::Rational,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut encoded = ffmpeg_next::Packet::empty();
    while encoder.receive_packet(&mut encoded).is_ok() {
        encoded.set_stream(stream_idx);
        encoded.rescale_ts(enc_time_base, ost_time_base);
        encoded.write_interleaved(octx)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codec_follows_extension() {
        assert_eq!(
            codec_for_extension(Path::new("out.wav")),
            ffmpeg_next::codec::Id::PCM_S16LE
        );
        assert_eq!(
            codec_for_extension(Path::new("out.mp3")),
            ffmpeg_next::codec::Id::MP3
        );
        assert_eq!(
            codec_for_extension(Path::new("out.m4a")),
            ffmpeg_next::codec::Id::AAC
        );
    }

    #[test]
    fn test_export_to_unwritable_path() {
        let clip = AudioClip::new(vec![0.0; 4410], 44100);
        let path = if cfg!(windows) {
            Path::new("Z:\\nonexistent\\out.wav")
        } else {
            Path::new("/nonexistent/out.wav")
        };
        assert!(FfmpegAudioSink.export(path, &clip).is_err());
    }
}
