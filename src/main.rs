use scoredial::{Gauge, GaugeCommand, GaugeConfig};

use log::{info, warn};
use rand::Rng;
use std::env;
use std::fs;
use std::io::{self, BufRead};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

// Set once piped scores start arriving; stops the idle wander thread.
static PIPED: AtomicBool = AtomicBool::new(false);

const FONT_ENV_VAR: &str = "SCOREDIAL_FONT";
const FONT_SEARCH_PATHS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// First readable font wins: --font, then $SCOREDIAL_FONT, then a few
/// well-known system locations.
fn resolve_font(explicit: Option<String>) -> Option<Vec<u8>> {
    let mut candidates: Vec<String> = Vec::new();
    if let Some(path) = explicit {
        candidates.push(path);
    }
    if let Ok(path) = env::var(FONT_ENV_VAR) {
        candidates.push(path);
    }
    candidates.extend(FONT_SEARCH_PATHS.iter().map(|p| p.to_string()));
    for path in candidates {
        if let Ok(bytes) = fs::read(&path) {
            info!("label font: {path}");
            return Some(bytes);
        }
    }
    warn!("no usable font found; labels will not be drawn");
    None
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Parse --title, --font and --score from the command line
    let mut window_title = "scoredial".to_string();
    let mut font_path: Option<String> = None;
    let mut initial_score: Option<i32> = None;
    let mut args = env::args();
    while let Some(arg) = args.next() {
        if arg == "--title" {
            if let Some(title) = args.next() {
                window_title = title;
            }
        } else if arg == "--font" {
            font_path = args.next();
        } else if arg == "--score" {
            if let Some(value) = args.next() {
                if let Ok(score) = value.parse::<i32>() {
                    initial_score = Some(score);
                }
            }
        }
    }

    let config = GaugeConfig::builder()
        .title(window_title)
        .maybe_font_data(resolve_font(font_path))
        .build();
    let mut gauge = Gauge::new(config);
    if let Some(score) = initial_score {
        gauge.set_score(score);
        // An explicit score holds; no wandering on top of it.
        PIPED.store(true, Ordering::Relaxed);
    }

    let (sender, receiver) = mpsc::channel();

    // Feed piped scores to the gauge, one integer per line.
    let pipe_sender = sender.clone();
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            if let Ok(line) = line {
                if let Ok(score) = line.trim().parse::<i32>() {
                    PIPED.store(true, Ordering::Relaxed);
                    if pipe_sender.send(GaugeCommand::SetScore(score)).is_err() {
                        break;
                    }
                }
            }
        }
    });

    // Wander between random scores until piped input takes over.
    let (wander_min, wander_max) = gauge.score_range().unwrap_or((300, 850));
    thread::spawn(move || {
        let mut rng = rand::rng();
        loop {
            thread::sleep(Duration::from_millis(2000));
            if PIPED.load(Ordering::Relaxed) {
                break;
            }
            let score = rng.random_range(wander_min..=wander_max);
            if sender.send(GaugeCommand::SetScore(score)).is_err() {
                break;
            }
        }
    });

    println!("Displaying score gauge:");
    println!("- pipe integers to stdin to set the score, e.g. `echo 720 | scoredial`");
    println!("- with no input the marker wanders to a random score every 2 s");
    println!("- flags: --title <text>, --font <path>, --score <n>");
    println!("Press Ctrl+C to exit");

    gauge.show_with_commands(receiver)?;
    Ok(())
}
