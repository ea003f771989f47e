use std::process::ExitCode;

use repoowners::ui::output;

fn main() -> ExitCode {
    match repoowners::cli::run() {
        Ok(code) => code,
        Err(err) => {
            output::error(format!("{:#}", err));
            ExitCode::from(2)
        }
    }
}
