//! Console driver for the panel: type fingertip positions, watch the icons
//! move and the reading change.  Handy for checking the drag rules without
//! a camera.

use circuit_panel::{HandLandmarks, PanelLayout, PanelSession};
use std::io::{self, Write};

const FRAME_W: u32 = 640;
const FRAME_H: u32 = 480;

fn main() {
    println!();
    println!("╔══════════════════════════════════════════════════════╗");
    println!("║            Circuit Panel — console driver            ║");
    println!("╚══════════════════════════════════════════════════════╝");
    println!();
    println!("  Frame is {}×{} px.", FRAME_W, FRAME_H);
    println!("  Enter fingertips as `x y`, several hands separated by `;`.");
    println!("  `n` = frame with no hands   `r` = reset   `q` = quit");
    println!();

    let layout = PanelLayout::default();
    let mut panel = PanelSession::new(&layout);
    println!("  {}\n", panel.status());

    loop {
        let line = read_line("Fingertips: ");
        if line.is_empty() {
            // stdin closed
            println!();
            break;
        }
        let cmd = line.trim();

        match cmd.to_ascii_lowercase().as_str() {
            "q" | "quit" => {
                println!("\nGoodbye!\n");
                break;
            }
            "r" | "reset" => {
                panel.reset(&layout);
            }
            "n" | "" => {
                panel.tick(&[], FRAME_W, FRAME_H);
            }
            _ => match parse_hands(cmd) {
                Some(hands) => panel.tick(&hands, FRAME_W, FRAME_H),
                None => {
                    println!("  ⚠  Expected `x y` pairs, e.g. `550 120; 40 40`.\n");
                    continue;
                }
            },
        }

        println!("  [{:>4}] {}\n", panel.ticks(), panel.status());
    }
}

/// Parse `x y; x y; …` pixel pairs into hands with only a fingertip.
fn parse_hands(input: &str) -> Option<Vec<HandLandmarks>> {
    input
        .split(';')
        .map(|pair| {
            let mut it = pair.split_whitespace().map(|v| v.parse::<f32>());
            match (it.next(), it.next(), it.next()) {
                (Some(Ok(x)), Some(Ok(y)), None) => Some(HandLandmarks::with_index_tip(
                    x / FRAME_W as f32,
                    y / FRAME_H as f32,
                )),
                _ => None,
            }
        })
        .collect()
}

fn read_line(prompt: &str) -> String {
    print!("{}", prompt);
    io::stdout().flush().ok();
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).ok();
    buf
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_several_hands() {
        let hands = parse_hands("320 240; 64 48").unwrap();
        assert_eq!(hands.len(), 2);
        assert_eq!(hands[0].index_tip_px(FRAME_W, FRAME_H), (320.0, 240.0));
        assert_eq!(hands[1].index_tip_px(FRAME_W, FRAME_H), (64.0, 48.0));
    }

    #[test]
    fn rejects_malformed_pairs() {
        assert!(parse_hands("320").is_none());
        assert!(parse_hands("1 2 3").is_none());
        assert!(parse_hands("a b").is_none());
    }
}
