use addonctx::{
    cli::{Args, Command},
    error::{ContextError, ErrorSeverity},
};
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Set up logging before anything else can warn
    init_logging(&args);

    // Create command from arguments
    let command = Command::from_args(args);

    // Run the command and get exit code
    let exit_code = run_command(command);

    // Exit with appropriate code
    process::exit(exit_code);
}

/// Initialize the tracing subscriber from the environment and CLI verbosity
fn init_logging(args: &Args) {
    let default_level = if args.verbose {
        "addonctx=debug"
    } else if args.quiet {
        "addonctx=error"
    } else {
        "addonctx=warn"
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Run the command with proper error handling
fn run_command(command: Command) -> i32 {
    match command.execute() {
        Ok(_) => 0,
        Err(err) => {
            // Print user-friendly error message with context
            eprintln!("\nError: {}", err.user_message());

            // Print suggestion if available
            if let Some(suggestion) = err.suggestion() {
                eprintln!("Suggestion: {}", suggestion);
            } else {
                // Provide default suggestions based on error type
                match &err {
                    ContextError::ConfigParse { .. } => {
                        eprintln!("Suggestion: Check the configuration file for TOML syntax errors");
                    }
                    ContextError::JsonParse { .. } => {
                        eprintln!("Suggestion: Check the analysis file for JSON syntax errors");
                    }
                    _ => {} // No default suggestion for other error types
                }
            }

            // Return appropriate exit code based on error severity
            let exit_code = match err.severity() {
                ErrorSeverity::Warning => 0, // Warnings don't cause failure
                ErrorSeverity::Error => 1,   // Regular errors
                ErrorSeverity::Critical => 2, // Critical errors
            };

            if exit_code > 0 {
                eprintln!("\nExiting with code {} due to {}", exit_code, err.severity());
            }

            exit_code
        }
    }
}
