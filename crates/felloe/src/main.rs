use std::process::ExitCode;

use clap::Parser;
use felloe::cli::App;

fn main() -> ExitCode {
    let app = App::parse();
    felloe::logging::init(app.log_level);

    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("{} failed to start runtime: {e}", console::style("error:").red().bold());
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(app.run()) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {e:#}", console::style("error:").red().bold());
            ExitCode::FAILURE
        }
    }
}
