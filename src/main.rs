use anyhow::Result;
use clap::Parser;
use llm_config::cli::commands::{Cli, Commands};
use llm_config::cli::handlers::{handle_show_command, handle_sizes_command, handle_validate_command};
use llm_config::cli::utils::{init_logging, print_info};

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose, cli.log_format)?;

    // Execute command
    match cli.command {
        Commands::Show { config, format } => handle_show_command(&config, format),

        Commands::Validate { config } => handle_validate_command(&config),

        Commands::Sizes => {
            handle_sizes_command();
            Ok(())
        }

        Commands::Info => {
            print_info();
            Ok(())
        }
    }
}
