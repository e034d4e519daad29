//! Linvis CLI - drive linear data structures from the command line

use std::path::Path;

use anyhow::{bail, Context as _};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use linvis::cli::{Args, SubCommand};
use linvis::parser::Command;
use linvis::script::{
    explain_script, has_errors, load_script, validate_script, ScriptRunner, ValidationOptions,
    ValidationSeverity, SCRIPT_EXTENSION,
};
use linvis::{
    execute_command, format_output, parse_command, ExecutionContext, OutputFormat, Workspace,
};

fn main() {
    let args = Args::parse();
    init_tracing(&args);

    if let Err(e) = run(args) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

/// Logs go to stderr so stdout stays clean for results
fn init_tracing(args: &Args) {
    let filter = match (&args.log_level, args.verbose) {
        (Some(level), _) => EnvFilter::try_new(level),
        (None, true) => EnvFilter::try_new("debug"),
        (None, false) => EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("warn")),
    }
    .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .compact()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn run(args: Args) -> anyhow::Result<()> {
    let ctx = ExecutionContext {
        output_format: OutputFormat::from_json_flag(args.json),
        verbose: args.verbose,
    };

    match args.command {
        SubCommand::Exec {
            statement,
            kind,
            init,
        } => {
            let cmd = parse_command(&statement)?;
            let mut workspace = Workspace::with_main(kind, init);
            let result = execute_command(&cmd, &ctx, &mut workspace)?;
            println!("{}", format_output(&result, &ctx.output_format));
            Ok(())
        }

        SubCommand::Run {
            file,
            kind,
            no_validate,
        } => {
            let script = load_script(&file)
                .with_context(|| format!("reading script {}", file.display()))?;

            if !no_validate {
                let options = ValidationOptions {
                    main_kind: kind,
                    ..Default::default()
                };
                let issues = validate_script(&script, &options);

                for issue in issues
                    .iter()
                    .filter(|e| e.severity == ValidationSeverity::Warning)
                {
                    eprintln!("Warning: {}", issue);
                }

                if has_errors(&issues) {
                    for issue in issues
                        .iter()
                        .filter(|e| e.severity == ValidationSeverity::Error)
                    {
                        eprintln!("{}", issue);
                    }
                    bail!("script validation failed; use --no-validate to run it anyway");
                }
            }

            let mut runner = ScriptRunner::new(ctx.clone())
                .with_workspace(Workspace::with_main(kind, Vec::new()));
            info!(path = %file.display(), statements = script.statements.len(), "running script");
            let result = runner
                .run_script(&script)
                .with_context(|| format!("running script {}", file.display()))?;

            if !result.success {
                if let Some(err) = result.error {
                    bail!(err);
                }
            }

            if ctx.verbose {
                eprintln!(
                    "--- Script completed: {} statements executed ---",
                    result.statements_executed
                );
            }

            Ok(())
        }

        SubCommand::Explain { input } => {
            let path = Path::new(&input);

            if path.exists() && path.extension().is_some_and(|e| e == SCRIPT_EXTENSION) {
                let script = load_script(path)
                    .with_context(|| format!("reading script {}", path.display()))?;

                println!("Script: {}", path.display());
                println!("Statements: {}\n", script.statements.len());

                for explanation in explain_script(&script) {
                    println!("{}", explanation);
                }

                let issues = validate_script(&script, &ValidationOptions::default());
                if !issues.is_empty() {
                    println!("\nValidation Notes:");
                    for issue in &issues {
                        println!("  - {}", issue);
                    }
                }
            } else {
                let cmd = parse_command(&input)?;
                let mut workspace = Workspace::new();
                let explain = Command::Explain(Box::new(cmd));
                let result = execute_command(&explain, &ctx, &mut workspace)?;
                println!("{}", format_output(&result, &ctx.output_format));
            }

            Ok(())
        }

        SubCommand::Repl { kind } => {
            linvis::repl::run_repl(Workspace::with_main(kind, Vec::new()), &ctx)?;
            Ok(())
        }
    }
}
