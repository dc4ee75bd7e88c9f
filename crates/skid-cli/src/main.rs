use std::process::ExitCode;

fn main() -> ExitCode {
    match skid_cli::run() {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE, // `check` : diagnostics bloquants
        Err(e) => {
            eprintln!("erreur: {e:#}");
            ExitCode::FAILURE
        }
    }
}
