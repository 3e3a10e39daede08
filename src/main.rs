use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use susan::bytecode::ImageError;
use susan::bytecode::disasm::print_bc;
use susan::frontend::token_dumper::TokenDumper;
use susan::frontend::{LexError, Lexer};
use susan::runtime::{RenderConfig, StdoutSink, TerminalRenderer};
use susan::shell::Shell;
use susan::{Machine, MachineError};

#[derive(Parser, Debug)]
#[command(name = "susan", version)]
#[command(about = "Run programs for the Susan register machine")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Disable ANSI colors
    #[arg(long, global = true, env = "SUSAN_NO_COLOR")]
    no_color: bool,

    /// Pause between animation frames of DRAW, BLINK and ADDV
    #[arg(long, global = true, env = "SUSAN_FRAME_DELAY_MS", default_value_t = 100)]
    frame_delay_ms: u64,

    /// Enable more detailed logging. Repeat to increase the level
    /// (overridden by RUST_LOG)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Assemble and run a source program
    Run { file: PathBuf },

    /// Print the tokens of every source line
    Tokens { file: PathBuf },

    /// Print the assembled code block
    Disasm { file: PathBuf },

    /// Assemble a source program into a binary image
    Build {
        file: PathBuf,

        /// Where to write the image
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Run a binary image produced by `build`
    Exec { image: PathBuf },

    /// Interactive `run <file>` loop (the default)
    Shell,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Machine(#[from] MachineError),

    #[error(transparent)]
    Image(#[from] ImageError),

    #[error("line {line}: {source}")]
    Lex { line: usize, source: LexError },

    #[error("failed to read '{}': {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to write '{}': {source}", path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error(transparent)]
    Io(#[from] io::Error),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match dispatch(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            debug!("{:?}", e);
            eprintln!("susan: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn dispatch(cli: Cli) -> Result<(), CliError> {
    let config = RenderConfig {
        color: !cli.no_color,
        frame_delay: Duration::from_millis(cli.frame_delay_ms),
    };

    match cli.command.unwrap_or(Command::Shell) {
        Command::Run { file } => {
            let mut machine = Machine::new();
            let mut renderer = TerminalRenderer::new(io::stdout(), config);
            machine.execute_file(&file, &mut StdoutSink::default(), &mut renderer)?;
        }
        Command::Tokens { file } => dump_tokens(&file, cli.no_color)?,
        Command::Disasm { file } => {
            let mut machine = Machine::new();
            machine.load_file(&file)?;
            print_bc(&file.display().to_string(), machine.code());
        }
        Command::Build { file, output } => {
            let mut machine = Machine::new();
            machine.load_file(&file)?;
            let bytes = machine.code().to_bytes()?;
            fs::write(&output, &bytes).map_err(|source| CliError::Write {
                path: output.clone(),
                source,
            })?;
            info!(
                instructions = machine.code().len(),
                bytes = bytes.len(),
                "wrote {}",
                output.display()
            );
        }
        Command::Exec { image } => {
            let bytes = fs::read(&image).map_err(|source| CliError::Read {
                path: image.clone(),
                source,
            })?;
            let mut machine = Machine::new();
            machine.load_image(&bytes)?;
            let mut renderer = TerminalRenderer::new(io::stdout(), config);
            machine.run(&mut StdoutSink::default(), &mut renderer)?;
        }
        Command::Shell => {
            let mut sink = StdoutSink::default();
            let mut renderer = TerminalRenderer::new(io::stdout(), config);
            let stdin = io::stdin();
            Shell::new(stdin.lock(), io::stdout(), &mut sink, &mut renderer).run()?;
        }
    }

    Ok(())
}

fn dump_tokens(file: &Path, no_color: bool) -> Result<(), CliError> {
    let source = fs::read_to_string(file).map_err(|source| CliError::Read {
        path: file.to_path_buf(),
        source,
    })?;

    let mut dumper = TokenDumper::new();
    if no_color {
        dumper = dumper.no_color();
    }

    for (index, line) in source.lines().enumerate() {
        let tokens = Lexer::new(line)
            .tokenize()
            .map_err(|source| CliError::Lex {
                line: index + 1,
                source,
            })?;
        dumper.dump(index + 1, &tokens);
    }

    Ok(())
}
