use std::path::PathBuf;
use std::process;
use std::time::Duration;

use clap::{Parser, Subcommand};

use supercut_core::compose::domain::composer::{ComposeOptions, Composer};
use supercut_core::compose::infrastructure::ffmpeg_audio_sink::FfmpegAudioSink;
use supercut_core::compose::infrastructure::ffmpeg_audio_source::FfmpegAudioSource;
use supercut_core::pipeline::extract_words_use_case::ExtractWordsUseCase;
use supercut_core::pipeline::supercut_use_case::{SupercutOutcome, SupercutUseCase};
use supercut_core::pipeline::transcribe_corpus_use_case::TranscribeCorpusUseCase;
use supercut_core::recognize::infrastructure::ffmpeg_normalizer::FfmpegNormalizer;
use supercut_core::recognize::infrastructure::pocketsphinx_recognizer::PocketsphinxRecognizer;
use supercut_core::search::domain::query::SearchMode;
use supercut_core::search::domain::silence_search::silence_search;
use supercut_core::search::domain::word_export::words_json;
use supercut_core::transcript::domain::corpus::Corpus;
use supercut_core::transcript::infrastructure::file_transcript_source::FileTranscriptSource;

/// Search transcribed audio and splice the matches into a new track.
#[derive(Parser)]
#[command(name = "supercut")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Transcribe audio files next to their sources.
    Transcribe {
        /// Source audio files.
        #[arg(short, long, num_args = 1.., required = true)]
        input: Vec<PathBuf>,

        /// Voice-activity padding before speech, in frames.
        #[arg(long, default_value = "10")]
        pre: u32,

        /// Voice-activity padding after speech, in frames.
        #[arg(long, default_value = "50")]
        post: u32,

        /// Kill a recognizer run after this many seconds.
        #[arg(long)]
        timeout: Option<u64>,
    },

    /// Search transcripts and render the matches to an output file.
    Search {
        /// Source audio files (their transcripts must exist).
        #[arg(short, long, num_args = 1.., required = true)]
        input: Vec<PathBuf>,

        /// Search term; fragment mode supports `*` wildcards and `|` alternatives.
        #[arg(short, long)]
        query: String,

        /// Search mode: sentence, word, fragment, or franken.
        #[arg(short, long, default_value = "sentence")]
        mode: String,

        /// Treat the query as a regular expression.
        #[arg(long)]
        regex: bool,

        /// Output file; extension picks the format.
        #[arg(short, long, default_value = "supercut.mp3")]
        output: PathBuf,

        /// Milliseconds of silence after each clip.
        #[arg(short, long, default_value = "0")]
        padding: f64,

        /// Milliseconds of crossfade between clips.
        #[arg(short, long, default_value = "0")]
        crossfade: f64,

        /// Overlay all matches at once instead of splicing in sequence.
        #[arg(short, long)]
        layer: bool,

        /// Print the matches without writing any audio.
        #[arg(short, long)]
        demo: bool,
    },

    /// Print every recognized word with timestamps as JSON.
    Words {
        #[arg(short, long, num_args = 1.., required = true)]
        input: Vec<PathBuf>,
    },

    /// Print the full transcribed text.
    Text {
        #[arg(short, long, num_args = 1.., required = true)]
        input: Vec<PathBuf>,
    },

    /// Cut every recognized word into its own audio file.
    Extract {
        #[arg(short, long, num_args = 1.., required = true)]
        input: Vec<PathBuf>,

        #[arg(long, default_value = "extracted_words")]
        output_dir: PathBuf,
    },

    /// Print recognizer-reported silences as JSON.
    Silences {
        #[arg(short, long, num_args = 1.., required = true)]
        input: Vec<PathBuf>,

        /// Keep only silences at least this long, in seconds.
        #[arg(long)]
        min: Option<f64>,

        /// Keep only silences at most this long, in seconds.
        #[arg(long)]
        max: Option<f64>,
    },
}

fn main() {
    env_logger::init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Command::Transcribe {
            input,
            pre,
            post,
            timeout,
        } => run_transcribe(&input, pre, post, timeout),
        Command::Search {
            input,
            query,
            mode,
            regex,
            output,
            padding,
            crossfade,
            layer,
            demo,
        } => {
            let mode = parse_mode(&mode)?;
            let options = ComposeOptions {
                padding_ms: padding,
                crossfade_ms: crossfade,
                layer,
            };
            run_search(&input, &query, mode, regex, &output, &options, demo)
        }
        Command::Words { input } => {
            let corpus = Corpus::load(&FileTranscriptSource, &input)?;
            println!("{}", words_json(&corpus)?);
            Ok(())
        }
        Command::Text { input } => {
            let corpus = Corpus::load(&FileTranscriptSource, &input)?;
            println!("{}", corpus.full_text());
            Ok(())
        }
        Command::Extract { input, output_dir } => {
            let use_case = ExtractWordsUseCase::new(
                Box::new(FileTranscriptSource),
                Box::new(FfmpegAudioSource),
                Box::new(FfmpegAudioSink),
            );
            let written = use_case.run(&input, &output_dir)?;
            println!("Extracted {} words to {}", written.len(), output_dir.display());
            Ok(())
        }
        Command::Silences { input, min, max } => {
            let silences = silence_search(&FileTranscriptSource, &input, min, max)?;
            let json: Vec<serde_json::Value> = silences
                .iter()
                .map(|s| {
                    serde_json::json!({
                        "start": s.start,
                        "end": s.end,
                        "file": s.file,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string(&json)?);
            Ok(())
        }
    }
}

fn run_transcribe(
    input: &[PathBuf],
    pre: u32,
    post: u32,
    timeout: Option<u64>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut recognizer = PocketsphinxRecognizer::new();
    if let Some(secs) = timeout {
        recognizer = recognizer.with_timeout(Duration::from_secs(secs));
    }

    log::info!("transcribing {} files", input.len());
    let use_case =
        TranscribeCorpusUseCase::new(Box::new(FfmpegNormalizer::new()), Box::new(recognizer));
    let summary = use_case.run(input, pre, post)?;
    println!(
        "Transcribed {} files ({} failed)",
        summary.transcribed(),
        summary.failed()
    );
    Ok(())
}

fn run_search(
    input: &[PathBuf],
    query: &str,
    mode: SearchMode,
    regex: bool,
    output: &std::path::Path,
    options: &ComposeOptions,
    demo: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    log::info!("searching {} files for \"{query}\"", input.len());
    let use_case = SupercutUseCase::new(
        Box::new(FileTranscriptSource),
        Composer::new(Box::new(FfmpegAudioSource), Box::new(FfmpegAudioSink)),
    );
    let mut rng = rand::rng();

    if demo {
        let matches = use_case.search(input, query, mode, regex, &mut rng)?;
        if matches.is_empty() {
            println!("No results for \"{query}\"");
            return Ok(());
        }
        for m in &matches {
            println!(
                "[{:.2}-{:.2}] {} ({})",
                m.start,
                m.end,
                m.phrase(),
                m.file.display()
            );
        }
        return Ok(());
    }

    match use_case.run(input, query, mode, regex, &mut rng, output, options)? {
        SupercutOutcome::NoMatches => {
            println!("No results for \"{query}\"");
        }
        SupercutOutcome::Rendered(report) => {
            println!(
                "Wrote {} ({} clips, {} skipped)",
                output.display(),
                report.rendered.len(),
                report.skipped.len()
            );
        }
    }
    Ok(())
}

fn parse_mode(mode: &str) -> Result<SearchMode, Box<dyn std::error::Error>> {
    match mode {
        "sentence" => Ok(SearchMode::Sentence),
        "word" => Ok(SearchMode::Word),
        "fragment" => Ok(SearchMode::Fragment),
        "franken" => Ok(SearchMode::Franken),
        other => Err(format!(
            "Search mode must be sentence, word, fragment, or franken, got '{other}'"
        )
        .into()),
    }
}
