use clap::Parser;
use miette::Result;
use fabquote::cli::{Cli, Commands};

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior (terminate silently) for proper Unix piping.
    // Without this, piping to `head`, `grep -q`, etc. causes a panic on broken pipe.
    // This is standard practice for CLI tools that output to stdout.
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
    // Install miette's fancy error handler for beautiful diagnostics
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    let global = cli.global;

    match cli.command {
        Commands::Quote(args) => fabquote::cli::commands::quote::run(args, &global),
        Commands::Process(cmd) => fabquote::cli::commands::process::run(cmd, &global),
        Commands::Material(cmd) => fabquote::cli::commands::material::run(cmd, &global),
        Commands::Sample(cmd) => fabquote::cli::commands::sample::run(cmd, &global),
        Commands::Session(cmd) => fabquote::cli::commands::session::run(cmd, &global),
        Commands::Checkout(args) => fabquote::cli::commands::checkout::run(args, &global),
        Commands::Report(cmd) => fabquote::cli::commands::report::run(cmd, &global),
        Commands::Config(cmd) => fabquote::cli::commands::config::run(cmd, &global),
        Commands::Completions(args) => fabquote::cli::commands::completions::run(args),
    }
}
