use hangman::cli::{Cli, CliInterface, parse_cli};
use hangman::game_state::{GameInterface, run};
use hangman::provider::{HttpWordProvider, ProviderError, WordProvider, WordbankProvider};
use hangman::tui::TuiInterface;
use hangman::wordbank::{EMBEDDED_WORDBANK, load_wordbank_from_file, load_wordbank_from_str};
use hangman::{info_log, logging};
use std::io;
use std::process::ExitCode;

fn build_provider(cli: &Cli) -> Result<Box<dyn WordProvider>, ProviderError> {
    if !cli.is_offline() {
        let provider = HttpWordProvider::new(&cli.endpoint, &cli.lang, cli.timeout())?;
        return Ok(Box::new(provider));
    }

    let words = match &cli.wordbank_path {
        Some(path) => load_wordbank_from_file(path)?,
        None => load_wordbank_from_str(EMBEDDED_WORDBANK),
    };
    let provider = WordbankProvider::new(words);
    info_log!("Playing offline with {} words", provider.len());
    Ok(Box::new(provider))
}

fn build_interface(cli: &Cli) -> Result<Box<dyn GameInterface>, io::Error> {
    if cli.plain {
        Ok(Box::new(CliInterface::new(io::stdin().lock())))
    } else {
        Ok(Box::new(TuiInterface::new()?))
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = parse_cli();
    logging::init();
    info_log!("Starting with {:?}", cli);

    let provider = match build_provider(&cli) {
        Ok(provider) => provider,
        Err(e) => {
            eprintln!("Failed to set up word source: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut interface = match build_interface(&cli) {
        Ok(interface) => interface,
        Err(e) => {
            eprintln!("Failed to initialize terminal: {e}");
            return ExitCode::FAILURE;
        }
    };

    let result = run(provider.as_ref(), interface.as_mut()).await;
    // Restore the terminal before printing anything.
    drop(interface);

    match result {
        Ok(phase) => {
            info_log!("Game finished: {}", phase);
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Session failed: {e}");
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
