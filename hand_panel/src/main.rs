//! hand_panel — entry point.

use env_logger::Env;
use hand_panel::app::{run, AppConfig};

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║        Hand Panel — drag circuit parts with a fingertip      ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();

    #[cfg(feature = "leap")]
    println!("  Mode: LeapMotion hardware");
    #[cfg(all(feature = "webcam", not(feature = "leap")))]
    println!("  Mode: webcam + MediaPipe helper");
    #[cfg(not(any(feature = "webcam", feature = "leap")))]
    println!("  Mode: Mouse simulation  (use --features webcam for a camera)");
    println!();

    let cfg = AppConfig::default();
    println!("  Icons from {}", cfg.asset_dir.display());
    println!("  Press Escape or close the window to quit.");
    println!();

    let asset_dir = cfg.asset_dir.clone();
    if let Err(e) = run(cfg) {
        eprintln!("Error: {}", e);
        if e.is_startup() {
            eprintln!(
                "  Put resistor.png and battery.png (with alpha) in {}",
                asset_dir.display()
            );
        }
        std::process::exit(1);
    }
}
