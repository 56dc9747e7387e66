// Entrypoint for the interactive menu binary.
// - Keeps `main` small: run the pre-flight checks, list the local
//   models, then hand control to the UI loop.
// - Returns `anyhow::Result` to simplify error handling.

use novel_analyzer::{api::OllamaClient, config::Config, preflight, ui};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    // Settings come from environment variables with defaults matching
    // a stock local Ollama install. See `config::Config::from_env`.
    let config = Config::from_env();
    let api = OllamaClient::new(&config.ollama_base_url)?;

    // Pre-flight: the checks report outcomes; this loop decides. A
    // fatal outcome ends the program before the menu is ever shown.
    let checks = preflight::run_checks(&config, &api);
    for check in &checks {
        match &check.outcome {
            preflight::Outcome::Passed => println!("[确认] {}", check.label),
            preflight::Outcome::Warning(msg) => println!("[警告] {}", msg),
            preflight::Outcome::Fatal(err) => println!("{}", err),
        }
    }
    if preflight::first_fatal(&checks).is_some() {
        std::process::exit(1);
    }

    ui::list_models(&config);

    // Start the interactive menu. This call blocks until the user exits.
    ui::main_menu(&config)?;
    Ok(())
}
