//! `shade` CLI.
//!
//! Drives a capture + emit pass over a named demo program, printing GLSL
//! fragment shader or OpenCL C kernel source to stdout, or dumping the
//! captured AST itself for diagnostics.

mod demos;

use std::process;

use clap::{Parser, Subcommand};

use shade_codegen::{dump, Backend, EmitError};

/// `shade` eDSL capture/emit driver.
#[derive(Parser)]
#[command(name = "shade", about = "shade eDSL capture and emit driver")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Lower a named demo program to GLSL or OpenCL C source.
    Emit {
        /// Which demo program to capture (see `list-demos`).
        demo: String,

        /// Target backend: glsl (default) or opencl.
        #[arg(short, long, default_value = "glsl")]
        target: String,
    },
    /// Dump a named demo program's captured AST instead of emitting
    /// target source, for inspecting what the capture actually built.
    DumpAst {
        /// Which demo program to capture (see `list-demos`).
        demo: String,

        /// Diagnostic format: text (default) or dot.
        #[arg(short, long, default_value = "text")]
        format: String,
    },
    /// List the demo programs `emit`/`dump-ast` accept.
    ListDemos,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let exit_code = match cli.command {
        Commands::Emit { demo, target } => run_emit(&demo, &target),
        Commands::DumpAst { demo, format } => run_dump_ast(&demo, &format),
        Commands::ListDemos => {
            for name in demos::NAMES {
                println!("{name}");
            }
            0
        }
    };
    process::exit(exit_code);
}

/// Execute the `emit` subcommand.
///
/// Returns exit code: 0 = success, 1 = emission error, 2 = unknown demo,
/// 3 = unknown target.
fn run_emit(demo: &str, target: &str) -> i32 {
    let backend = match parse_target(target) {
        Ok(backend) => backend,
        Err(msg) => {
            eprintln!("Error: {msg}");
            return 3;
        }
    };

    let ast = match demos::capture_by_name(demo) {
        Some(ast) => ast,
        None => {
            eprintln!("Error: {}", unknown_demo(demo));
            return 2;
        }
    };

    match backend.emit(&ast) {
        Ok(src) => {
            print!("{src}");
            0
        }
        Err(err) => {
            report_emit_error(&err);
            1
        }
    }
}

/// Execute the `dump-ast` subcommand.
///
/// Returns exit code: 0 = success, 2 = unknown demo, 3 = unknown format.
fn run_dump_ast(demo: &str, format: &str) -> i32 {
    let dump_fn = match format {
        "text" => dump::dump_text,
        "dot" => dump::dump_dot,
        other => {
            eprintln!("Error: invalid dump format '{other}', expected text/dot");
            return 3;
        }
    };

    let ast = match demos::capture_by_name(demo) {
        Some(ast) => ast,
        None => {
            eprintln!("Error: {}", unknown_demo(demo));
            return 2;
        }
    };

    print!("{}", dump_fn(&ast));
    0
}

/// Parse a `--target` string into the backend it names.
fn parse_target(s: &str) -> Result<Backend, String> {
    match s {
        "glsl" | "GLSL" => Ok(Backend::Glsl),
        "opencl" | "OpenCL" | "ocl" => Ok(Backend::OpenCl),
        _ => Err(format!("invalid target '{s}', expected glsl/opencl")),
    }
}

fn unknown_demo(demo: &str) -> String {
    format!("unknown demo '{demo}' (see `shade list-demos`)")
}

fn report_emit_error(err: &EmitError) {
    tracing::error!(%err, "failed to lower captured program");
    eprintln!("Error: {err}");
}
