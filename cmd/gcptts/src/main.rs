//! gcptts - A command line interface for Google Cloud Text-to-Speech.

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod pipeline;
mod settings;

/// gcptts - Synthesize speech with Google Cloud Text-to-Speech.
///
/// Reads text (or SSML) from INPUT_FILE and writes the MP3 audio returned by
/// the service to OUTPUT_FILE. Use - for standard input or output.
///
/// Credentials are taken from the selected config context, GOOGLE_API_KEY,
/// GOOGLE_OAUTH_ACCESS_TOKEN, or `gcloud auth application-default login`.
/// Configuration is stored in ~/.gcptts/config.yaml and supports multiple
/// contexts, similar to kubectl's context management.
#[derive(Parser, Debug)]
#[command(name = "gcptts")]
#[command(about = "Google Cloud Text-to-Speech CLI tool")]
#[command(version)]
pub struct Cli {
    /// Text file to read from. Use - for standard input.
    pub input_file: String,

    /// Audio file to write to. Use - for standard output.
    pub output_file: String,

    /// Language code to use for the synthesis.
    /// See https://cloud.google.com/text-to-speech/docs/voices
    #[arg(short = 'l', long, default_value = settings::DEFAULT_LANGUAGE_CODE)]
    pub language_code: String,

    /// Voice name to use for the synthesis. Use an empty string to let the
    /// service choose.
    #[arg(short = 'v', long, default_value = settings::DEFAULT_VOICE_NAME)]
    pub voice_name: String,

    /// Pitch adjustment in the range [-20.0, 20.0].
    #[arg(long, default_value_t = settings::DEFAULT_PITCH, allow_negative_numbers = true)]
    pub pitch: f64,

    /// Speaking rate/speed in the range [0.25, 4.0].
    #[arg(short = 'r', long, default_value_t = settings::DEFAULT_SPEAKING_RATE)]
    pub speaking_rate: f64,

    /// Volume gain (in dB) in the range [-96.0, 16.0].
    #[arg(long, default_value_t = settings::DEFAULT_VOLUME_GAIN, allow_negative_numbers = true)]
    pub volume_gain: f64,

    /// Treat the input as SSML instead of plain text.
    #[arg(short = 's', long, overrides_with = "no_ssml")]
    pub ssml: bool,

    /// Treat the input as plain text (default).
    #[arg(long = "no-ssml", overrides_with = "ssml")]
    pub no_ssml: bool,

    /// Service endpoint, as a URL or host[:port]. Needed for regional voices.
    /// See https://cloud.google.com/text-to-speech/docs/endpoints
    #[arg(long)]
    pub service_endpoint: Option<String>,

    /// Config file (default is ~/.gcptts/config.yaml)
    #[arg(long)]
    pub config: Option<String>,

    /// Context name to use
    #[arg(short = 'c', long)]
    pub context: Option<String>,

    /// Verbose output
    #[arg(long)]
    pub verbose: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    pipeline::run(&cli).await
}

/// Logs go to stderr so they never mix with audio written to stdout.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("gcptts=debug,gcptts_cli=debug,gcptts_texttospeech=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
