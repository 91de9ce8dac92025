use std::sync::Arc;

use clap::Parser;

use normino::checker::ChildRegistry;
use normino::cli::{Action, Cli};
use normino::commands::{
    color_choice_to_mode, run_check, run_clean, run_list_files, run_push, run_script, run_test,
    run_update,
};
use normino::output::{ErrorOutput, Palette};
use normino::{interrupt, logging};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet);

    let color_mode = color_choice_to_mode(cli.color);
    let registry = Arc::new(ChildRegistry::new());
    if let Err(e) = interrupt::install(Arc::clone(&registry), Palette::stderr(color_mode)) {
        tracing::warn!(error = %e, "Ctrl-C handler not installed");
    }

    let result = match cli.action() {
        Action::Check => run_check(&cli, registry),
        Action::ListFiles => run_list_files(&cli),
        Action::Test(name) => run_test(&cli, name.as_deref()),
        Action::Clean => run_clean(&cli),
        Action::Run => run_script(&cli),
        Action::Update => run_update(&cli),
        Action::Push(message) => run_push(&cli, message.as_deref(), registry),
    };

    let exit_code = match result {
        Ok(code) => code,
        Err(e) => {
            ErrorOutput::stderr(color_mode).print(&e);
            e.exit_code()
        }
    };
    std::process::exit(exit_code);
}
