//! changerun — command-line front end for changelog-driven schema
//! migration engines.
//!
//! Control flow: normalize and partition the arguments, layer the
//! defaults files beneath the command-line options, validate setup
//! preconditions, assemble the resource loading context, then dispatch
//! the single command through the engine boundary. Every failure is
//! converted into a printed message plus a distinct exit code; nothing
//! escapes as a raw fault.

mod dispatch;
mod help;
mod logging;
mod setup;

use std::io::{self, Write};
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use std::process::ExitCode;

use changerun_core::{parse_arguments, properties, Command, Configuration, Invocation};
use changerun_engine::noop::NoopEngine;
use changerun_engine::EngineError;
use tracing::error;

use crate::dispatch::DispatchError;

const PACKAGE_VERSION: &str = env!("CARGO_PKG_VERSION");

const EXIT_SUCCESS: u8 = 0;
const EXIT_EXECUTION: u8 = 1;
const EXIT_PARSE: u8 = 2;
const EXIT_UNEXPECTED: u8 = 3;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();

    // Outermost boundary: an unexpected fault becomes a generic message
    // and its own exit code, never a raw panic in the user's face.
    let code = match panic::catch_unwind(AssertUnwindSafe(|| run(&args))) {
        Ok(code) => code,
        Err(payload) => {
            println!(
                "Unexpected error running changerun: {}",
                panic_message(payload.as_ref())
            );
            EXIT_UNEXPECTED
        }
    };
    ExitCode::from(code)
}

fn run(args: &[String]) -> u8 {
    let mut stdout = io::stdout();

    // Standalone single-token invocations short-circuit all parsing.
    if args.len() == 1 && args[0] == "--help" {
        let _ = help::print_usage(&mut stdout);
        return EXIT_SUCCESS;
    }
    if args.len() == 1 && args[0] == "--version" {
        println!("changerun version {PACKAGE_VERSION}");
        return EXIT_SUCCESS;
    }

    let invocation = match parse_arguments(args) {
        Ok(invocation) => invocation,
        Err(err) => return parse_failure(&mut stdout, &[err.to_string()]),
    };
    let Invocation {
        command,
        mut options,
        command_params,
        mut parameters,
    } = invocation;

    // Defaults files fill only the slots the command line left unset;
    // the local overrides file is applied before the shared one.
    let defaults_file = options.defaults_file().to_string();
    let local_file = properties::local_defaults_file(&defaults_file);
    let mut layers = Vec::new();
    if local_file != defaults_file {
        layers.push(local_file);
    }
    layers.push(defaults_file);
    for layer in &layers {
        let path = Path::new(layer);
        if path.exists() {
            if let Err(err) = properties::apply_defaults_file(path, &mut options, &mut parameters)
            {
                return parse_failure(&mut stdout, &[err.to_string()]);
            }
        }
    }

    let messages = setup::check_setup(command, &options);
    if !messages.is_empty() {
        let rendered: Vec<String> = messages.iter().map(|m| m.to_string()).collect();
        return parse_failure(&mut stdout, &rendered);
    }
    let Some(command) = command else {
        // check_setup reported the missing command above.
        return EXIT_PARSE;
    };

    let config = options.build();

    if let Err(message) = logging::init(&config.log_level, config.log_file.as_deref()) {
        return parse_failure(&mut stdout, &[message]);
    }

    let context = match changerun_loader::build_loading_context(
        config.classpath.as_deref(),
        config.include_system_classpath,
    ) {
        Ok(context) => context,
        Err(err) => return execution_failure(command, &config, &err.to_string()),
    };

    let engine = NoopEngine;
    match dispatch::dispatch(
        &engine,
        command,
        &config,
        &command_params,
        &parameters,
        &context,
        &mut stdout,
    ) {
        Ok(()) => {
            print_success_banner(command);
            EXIT_SUCCESS
        }
        Err(DispatchError::Engine(EngineError::ValidationFailed(report))) => {
            let _ = report.write_descriptive(&mut stdout);
            EXIT_EXECUTION
        }
        Err(err) => execution_failure(command, &config, &err.to_string()),
    }
}

fn parse_failure(out: &mut dyn Write, messages: &[String]) -> u8 {
    let _ = help::print_errors(out, messages);
    EXIT_PARSE
}

fn execution_failure(command: Command, config: &Configuration, message: &str) -> u8 {
    println!("changerun '{command}' failed: {message}");
    error!(command = command.canonical_name(), cause = message, "command failed");
    if config.log_level != "debug" {
        println!();
        println!("For more information, use the --logLevel flag");
    }
    EXIT_EXECUTION
}

fn print_success_banner(command: Command) {
    if command.produces_sql() || command == Command::Help {
        return;
    }
    if command == Command::Update {
        println!("changerun: update successful");
    } else if command.is_rollback() {
        println!("changerun: rollback successful");
    } else {
        println!("changerun: '{command}' successful");
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message
    } else {
        "Unknown Reason"
    }
}
