use rookery::cli::Cli;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    println!("rookery v{}, by {}", env!("CARGO_PKG_VERSION"), env!("CARGO_PKG_AUTHORS"));

    let perft_mode = std::env::args().nth(1).as_deref() == Some("perft");

    // Counts move tree nodes from a position
    let result = if perft_mode {
        let expected_format = "Expected : perft <depth> [<FEN>]";
        let depth = match std::env::args().nth(2).and_then(|d| d.parse::<u32>().ok()) {
            Some(d) => d,
            None => {
                eprintln!("{}", expected_format);
                std::process::exit(2)
            }
        };
        let fen = std::env::args().nth(3);
        rookery::print_perft(depth, fen)
    } else {
        // Interactive play, optionally from a FEN given as the remaining arguments
        let fen = std::env::args().skip(1).collect::<Vec<_>>().join(" ");
        Cli::new(if fen.is_empty() { None } else { Some(fen.as_str()) }).map(|mut cli| cli.run())
    };

    if let Err(e) = result {
        eprintln!("Badly formed FEN: {}", e);
        std::process::exit(1)
    }
}
