use clap::{ArgAction, Parser};
use smfplay::{
    events::DEFAULT_PAYLOAD_CAP,
    player::{MidirSink, SinkResult, output_port_names},
    prelude::*,
};
use std::{
    fs::File,
    io::{self, BufReader},
    path::PathBuf,
    process::ExitCode,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the MIDI file to play
    #[arg(required_unless_present = "list_ports")]
    input: Option<PathBuf>,

    /// Index of the MIDI output port (see --list-ports)
    #[arg(short, long, default_value_t = 0)]
    port: usize,

    /// List the available MIDI output ports and exit
    #[arg(long)]
    list_ports: bool,

    /// Write raw MIDI bytes to standard output instead of a port
    #[arg(long)]
    dump: bool,

    /// Send events as fast as possible
    #[arg(long)]
    no_pacing: bool,

    /// Bytes kept per meta or system exclusive event
    #[arg(long, default_value_t = DEFAULT_PAYLOAD_CAP)]
    payload_cap: usize,

    /// Forget the running status at the start of every track
    #[arg(long)]
    reset_running_status: bool,

    /// Accept variable length quantities longer than five bytes
    #[arg(long)]
    lenient_vlq: bool,

    /// More logging (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn config(&self) -> PlayerConfig {
        PlayerConfig::default()
            .with_payload_cap(self.payload_cap)
            .with_reset_running_status_per_track(self.reset_running_status)
            .with_strict_vlq(!self.lenient_vlq)
    }

    fn pacer(&self) -> Box<dyn Pacer> {
        if self.no_pacing {
            Box::new(NoPacer)
        } else {
            Box::new(ThreadPacer::new())
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(io::stderr)
        .init();

    if cli.list_ports {
        return match output_port_names() {
            Ok(names) => {
                for (index, name) in names.iter().enumerate() {
                    println!("{index}: {name}");
                }
                ExitCode::SUCCESS
            }
            Err(e) => {
                tracing::error!("could not list MIDI outputs: {e}");
                ExitCode::FAILURE
            }
        };
    }

    let Some(path) = cli.input.as_ref() else {
        return ExitCode::FAILURE;
    };
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) => {
            tracing::error!("opening {}: {e}", path.display());
            return ExitCode::FAILURE;
        }
    };
    let source = ReadSource::new(BufReader::new(file));

    let result = if cli.dump {
        let sink = WriterSink::new(io::stdout().lock());
        play(sink, &cli, source)
    } else {
        match MidirSink::connect(cli.port) {
            Ok(sink) => play(sink, &cli, source),
            Err(e) => {
                tracing::error!("connecting to MIDI output {}: {e}", cli.port);
                return ExitCode::FAILURE;
            }
        }
    };

    match result {
        Ok(summary) => {
            tracing::info!(
                tracks = summary.tracks_played(),
                events = summary.channel_events(),
                sysex = summary.sysex_events(),
                skipped = summary.track_errors().len(),
                seconds = summary.duration().as_secs_f64(),
                "done"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn play<K: MidiSink>(
    sink: K,
    cli: &Cli,
    source: impl ByteSource,
) -> Result<PlaybackSummary, PlayerError> {
    Player::new(TextLog(sink), cli.pacer())
        .with_config(cli.config())
        .play(source)
}

/// Passes everything through and logs lyrics, markers and other text events.
struct TextLog<K>(K);

impl<K: MidiSink> MidiSink for TextLog<K> {
    fn send(&mut self, byte: u8) -> SinkResult<()> {
        self.0.send(byte)
    }

    fn flush(&mut self) -> SinkResult<()> {
        self.0.flush()
    }

    fn on_meta(&mut self, meta_type: MetaType, data: &[u8]) -> SinkResult<()> {
        if meta_type.is_text() {
            tracing::info!(?meta_type, "{}", String::from_utf8_lossy(data));
        }
        self.0.on_meta(meta_type, data)
    }
}
