mod config;
mod replay;

use anyhow::{bail, Result};
use clap::Parser;
use std::path::PathBuf;

use config::AppConfig;
use ps2tap_core::{
    format_entry, CaptureEvent, CaptureService, EntryKind, EventStore, SimProbe,
};
use ps2tap_decode::{Direction, Set2Decoder};

#[derive(Debug, Parser)]
#[command(
    name = "ps2tap",
    about = "Passive PS/2 keyboard line tap: decodes a captured waveform into key events"
)]
struct Args {
    /// Replay file of hex scan-code bytes (whitespace separated, # comments).
    #[arg(long, conflicts_with = "bytes")]
    replay: Option<PathBuf>,

    /// Inline hex scan-code bytes, e.g. "E0 F0 75".
    #[arg(long)]
    bytes: Option<String>,

    /// Config file (defaults to the platform config directory).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Prefix each event with a wall-clock timestamp.
    #[arg(long)]
    timestamps: bool,

    /// Hide the raw byte trail after each event.
    #[arg(long)]
    no_hex: bool,

    /// Print the full session transcript before the stats line.
    #[arg(long)]
    summary: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let cfg = AppConfig::load(args.config.as_deref())?;
    let show_timestamps = cfg.show_timestamps || args.timestamps;
    let show_hex = cfg.show_hex && !args.no_hex;

    let bytes = if let Some(path) = &args.replay {
        replay::load(path)?
    } else if let Some(text) = &args.bytes {
        replay::parse_bytes(text)?
    } else {
        bail!("nothing to tap: pass --replay <file> or --bytes <hex>");
    };

    let probe = SimProbe::from_bytes(&bytes);
    let service = CaptureService::start(probe, cfg.sampler());
    let mut decoder = Set2Decoder::new();
    let mut store = EventStore::new(cfg.max_entries);

    loop {
        match service.events().recv()? {
            CaptureEvent::Byte(byte) => {
                if let Some(event) = decoder.consume(byte) {
                    let kind = match event.direction {
                        Direction::Press => EntryKind::Press,
                        Direction::Release => EntryKind::Release,
                    };
                    store.push(kind, event.key_name, event.raw_bytes);
                    print_last(&store, show_timestamps, show_hex);
                }
            }
            CaptureEvent::InvalidFrame { value, resynced } => {
                let label = if resynced {
                    format!("invalid frame {value:#04X}")
                } else {
                    format!("invalid frame {value:#04X} (line never returned to idle)")
                };
                store.push(EntryKind::Notice, label, vec![value]);
                print_last(&store, show_timestamps, show_hex);
            }
            // The first idle timeout after the script means the replay is done.
            CaptureEvent::Idle | CaptureEvent::Stopped => break,
        }
    }
    service.stop();

    if args.summary {
        println!();
        print!("{}", store.to_text(show_timestamps, show_hex));
    }

    let stats = service.stats();
    println!(
        "frames: {} ok, {} invalid ({} resync failures), {} idle timeouts",
        stats.frames_ok, stats.frames_invalid, stats.resync_failures, stats.idle_timeouts
    );
    Ok(())
}

fn print_last(store: &EventStore, show_timestamps: bool, show_hex: bool) {
    if let Some(entry) = store.last() {
        println!("{}", format_entry(entry, show_timestamps, show_hex));
    }
}
