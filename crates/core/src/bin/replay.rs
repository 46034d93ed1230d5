//! Replay move strings on a fresh board
//!
//! Usage: replay E2-E4-false E7-E5-false G1-F3-false

use chess_pie_core::{Game, MoveRequest};

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() {
        eprintln!("Usage: replay <START-END-CAPTURED>...");
        std::process::exit(1);
    }

    let mut requests = Vec::with_capacity(args.len());
    for arg in &args {
        match arg.parse::<MoveRequest>() {
            Ok(request) => requests.push(request),
            Err(e) => {
                eprintln!("{}: {}", arg, e);
                std::process::exit(2);
            }
        }
    }

    let mut game = Game::new();

    for request in &requests {
        let label = request.to_string();
        match game.play(request) {
            Ok(outcome) => {
                let capture = outcome
                    .captured
                    .map(|kind| format!(", takes {}", kind))
                    .unwrap_or_default();
                println!(
                    "{:<14} legal ({} {}{})",
                    label, outcome.color, outcome.kind, capture
                );
            }
            Err(e) => println!("{:<14} illegal: {}", label, e),
        }
    }

    println!();
    println!("{}", game.board());
    println!();
    println!(
        "{} move(s) accepted, placement {}",
        game.moves_played(),
        game.board().placement()
    );
}
