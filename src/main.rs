use jobsh::{Interpreter, TerminalState};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    // Terminal acquisition failures leave the shell unable to manage
    // foreground jobs, so they end the process before the first prompt.
    let term = match TerminalState::initialize() {
        Ok(term) => term,
        Err(e) => {
            eprintln!("jobsh: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = Interpreter::new(term).repl() {
        eprintln!("jobsh: {e}");
        std::process::exit(1);
    }
}
