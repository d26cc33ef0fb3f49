//! Valentine prompt entry point
//!
//! On the web this boots the page prompt; natively it runs the terminal prompt.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    valentine_prompt::platform::web::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::io::Result<()> {
    use valentine_prompt::Settings;
    use valentine_prompt::platform::terminal::{SessionOutcome, run_session};

    env_logger::init();
    log::info!("Valentine prompt (terminal) starting...");

    let settings = Settings::load();
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();

    match run_session(stdin.lock(), &mut stdout, settings)? {
        SessionOutcome::Accepted { declines } => {
            log::info!("Accepted after {} declines", declines)
        }
        SessionOutcome::Abandoned { declines } => {
            log::info!("No answer after {} declines", declines)
        }
    }
    Ok(())
}
