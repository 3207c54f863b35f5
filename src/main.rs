use clap::Parser;

use termchat_cli::cli::Args;
use termchat_cli::cli::commands::chat::{self, ChatOptions};
use termchat_cli::logging;
use termchat_cli::ui::Style;

#[tokio::main]
async fn main() {
    let args = Args::parse();
    logging::init(args.verbose);

    let prepared = match chat::prepare_chat(&ChatOptions::from(&args)) {
        Ok(prepared) => prepared,
        Err(e) => exit_with_error(&e, exitcode::CONFIG),
    };

    if let Err(e) = prepared.run().await {
        exit_with_error(&e, exitcode::IOERR);
    }

    // A prompt still blocked on stdin would keep the runtime alive on shutdown
    std::process::exit(exitcode::OK);
}

fn exit_with_error(error: &anyhow::Error, code: exitcode::ExitCode) -> ! {
    eprintln!("{} {error:#}", Style::error("Error:"));
    std::process::exit(code);
}
