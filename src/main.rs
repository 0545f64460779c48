use hangman::cli::{CliInterface, parse_cli};
use hangman::logging::init_logging;
use hangman::tui::TuiInterface;
use hangman::{GameResult, HangmanError, game_loop};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = parse_cli();
    if let Err(e) = init_logging(cli.verbose, cli.log_file.as_deref()) {
        eprintln!("Failed to set up logging: {e}");
        return ExitCode::FAILURE;
    }

    let source = cli.word_source();
    log::info!("Using {source}");
    let config = cli.game_config();
    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let result = if cli.tui {
        run_tui(|ui| game_loop(ui, &source, config, cli.difficulty, &mut rng))
    } else {
        let stdin = io::stdin();
        let mut ui = CliInterface::new(stdin.lock());
        game_loop(&mut ui, &source, config, cli.difficulty, &mut rng)
    };

    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            if cli.tui {
                // The alternate screen is gone; repeat the error on the normal one.
                eprintln!("Error: {e}");
            }
            ExitCode::FAILURE
        }
    }
}

fn run_tui<F>(play: F) -> Result<GameResult, HangmanError>
where
    F: FnOnce(&mut TuiInterface) -> Result<GameResult, HangmanError>,
{
    let mut ui = TuiInterface::new()?;
    let result = play(&mut ui);
    ui.cleanup()?;
    result
}
