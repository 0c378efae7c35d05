use clap::Parser;
use sales_pipeline::cli::{args::Args, commands};
use std::process;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    // Create async runtime and run the selected stage
    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    let result = runtime.block_on(commands::run(args));

    match result {
        Ok(()) => {
            // Success - the stage has already reported its summary
            process::exit(0);
        }
        Err(error) => {
            // Non-zero exit halts the orchestration chain: the transformer
            // must not start after a failed validator run
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("Sales Pipeline - Daily Transaction Validator and Transformer");
    println!("============================================================");
    println!();
    println!("Validate raw daily sales files against a schema and rule catalog,");
    println!("then derive analytical columns over the cleaned data.");
    println!();
    println!("USAGE:");
    println!("    sales-pipeline <COMMAND> [DATE] [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    validate     Clean a raw daily file into the processed zone (stage one)");
    println!("    transform    Enrich a processed daily file into the aggregates zone (stage two)");
    println!("    generate     Write a synthetic raw daily file for pipeline testing");
    println!("    help         Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Validate today's raw drop:");
    println!("    sales-pipeline validate");
    println!();
    println!("    # Validate and then enrich a specific date:");
    println!("    sales-pipeline validate 2025-01-15 --bucket /data/sales");
    println!("    sales-pipeline transform 2025-01-15 --bucket /data/sales");
    println!();
    println!("    # Generate 10,000 test records with defects:");
    println!("    sales-pipeline generate 2025-01-15 --records 10000 --dirty-fraction 0.1");
    println!();
    println!("For detailed help on any command, use:");
    println!("    sales-pipeline <COMMAND> --help");
}
