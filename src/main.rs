use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::error::ErrorKind;
use clap::Parser as ClapParser;

use rox::lox::Lox;

#[derive(ClapParser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Script to run; starts the interactive prompt when omitted.
    script: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args: Cli = match Cli::try_parse() {
        Ok(args) => args,

        Err(error)
            if matches!(
                error.kind(),
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion
            ) =>
        {
            let _ = error.print();
            return Ok(());
        }

        Err(_) => {
            eprintln!("Usage: rox [script]");
            process::exit(64);
        }
    };

    match args.script {
        Some(path) => run_file(&path),

        None => run_prompt(),
    }
}

fn run_file(path: &Path) -> anyhow::Result<()> {
    let source: String = match fs::read_to_string(path) {
        Ok(source) => source,

        Err(error) => {
            eprintln!("Failed to read file '{}': {}", path.display(), error);
            process::exit(64);
        }
    };

    let mut out = io::stdout();
    let mut diagnostics = io::stderr();

    let mut lox = Lox::new(&mut out, &mut diagnostics);
    lox.run(&source, false);

    if lox.had_error() {
        process::exit(65);
    }
    if lox.had_runtime_error() {
        process::exit(70);
    }

    Ok(())
}

fn run_prompt() -> anyhow::Result<()> {
    let mut out = io::stdout();
    let mut diagnostics = io::stderr();

    let mut lox = Lox::new(&mut out, &mut diagnostics);

    let stdin = io::stdin();
    let mut line = String::new();

    loop {
        print!("> ");
        io::stdout().flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            // EOF ends the session cleanly.
            println!();
            break;
        }

        lox.run(&line, true);
        lox.clear_error();
    }

    Ok(())
}
