//! aardvark-drv - Command-line front end for the aardvark interpreter.
//!
//! This crate is an external collaborator of the core: it only ever calls
//! the public `tokenize` / `parse_program` / `eval` contracts plus the
//! parser's debug printers. Flag parsing, file IO, and the REPL loop live
//! here precisely so the core stays free of `process::exit` and can be
//! embedded anywhere.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use thiserror::Error;

use aardvark_eval::Value;
use aardvark_par::SyntaxKind;

/// The reference REPL read each line into a fixed 128-byte buffer; lines
/// longer than this are truncated the same way.
const REPL_LINE_LIMIT: usize = 128;

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub input_file: Option<PathBuf>,
    pub dump_tokens: bool,
    pub dump_tree: bool,
    pub help: bool,
}

#[derive(Debug, Error)]
pub enum DrvError {
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("failed to read {path}: {source}")]
    Io { path: PathBuf, #[source] source: io::Error },

    #[error(transparent)]
    Lex(#[from] aardvark_lex::LexError),

    #[error(transparent)]
    Parse(#[from] aardvark_par::ParseError),

    #[error(transparent)]
    Eval(#[from] aardvark_eval::EvalError),
}

/// Parses `argv`-style arguments (the program name, if present, is
/// skipped). `-t`/`-s` may be combined in one flag group (`-ts`); any
/// other flag character is an error.
pub fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Config, DrvError> {
    args.next(); // argv[0]
    let mut config = Config::default();
    for arg in args {
        if arg == "--help" {
            config.help = true;
            continue;
        }
        if let Some(flags) = arg.strip_prefix('-') {
            if flags.is_empty() {
                return Err(DrvError::InvalidArguments(arg));
            }
            for c in flags.chars() {
                match c {
                    't' => config.dump_tokens = true,
                    's' => config.dump_tree = true,
                    other => {
                        return Err(DrvError::InvalidArguments(format!("unknown flag '{other}'")))
                    }
                }
            }
            continue;
        }
        config.input_file = Some(PathBuf::from(arg));
    }
    Ok(config)
}

/// Runs the driver for an already-parsed `Config`: prints usage, runs one
/// file, or falls into the REPL.
pub fn run(config: Config) -> Result<(), DrvError> {
    if config.help {
        print_usage();
        return Ok(());
    }
    match config.input_file.clone() {
        Some(path) => {
            let bytes =
                fs::read(&path).map_err(|source| DrvError::Io { path: path.clone(), source })?;
            interpret(&bytes, &config)
        }
        None => repl(&config),
    }
}

fn print_usage() {
    println!("Usage: aardvark [options] [file]");
    println!("Options:");
    println!("    -t: Show token list");
    println!("    -s: Show syntax tree");
}

/// Tokenizes, parses, and evaluates one complete source buffer, printing
/// the dumps `config` asks for and the top-level result if it is an
/// integer or string.
pub fn interpret(source: &[u8], config: &Config) -> Result<(), DrvError> {
    let tokens = aardvark_lex::tokenize(source)?;
    if config.dump_tokens {
        println!("Token list:");
        if tokens.is_empty() {
            println!("(No tokens)");
        } else {
            let names: Vec<&str> =
                tokens.iter().map(|t| aardvark_par::print_syntax(SyntaxKind::from(t.kind))).collect();
            println!("{}", names.join(", "));
        }
        println!();
    }

    let mut ast = aardvark_par::parse_program(&tokens)?;
    if config.dump_tree {
        println!("Parse tree:");
        print!("{}", aardvark_par::parse_tree_print(&ast));
        println!();
    }

    match aardvark_eval::eval(&mut ast)? {
        Value::Integer(v) => println!("{v}"),
        Value::String(s) => println!("\"{s}\""),
        Value::None | Value::Void => {}
    }
    Ok(())
}

/// Line-at-a-time REPL. Each line is interpreted independently, exactly
/// as the reference implementation's `interpret()` call per REPL
/// iteration; there is no interpreter state shared across lines.
fn repl(config: &Config) -> Result<(), DrvError> {
    println!("aardvark REPL");
    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush().ok();

        let mut line = String::new();
        let read = stdin
            .lock()
            .read_line(&mut line)
            .map_err(|source| DrvError::Io { path: PathBuf::from("<stdin>"), source })?;
        if read == 0 {
            return Ok(());
        }
        if line.len() > REPL_LINE_LIMIT {
            line.truncate(REPL_LINE_LIMIT);
        }
        if line.trim_end_matches(['\n', '\r']) == "q" {
            return Ok(());
        }

        if let Err(err) = interpret(line.as_bytes(), config) {
            eprintln!("error: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(v: &[&str]) -> Config {
        parse_args(std::iter::once("aardvark".to_string()).chain(v.iter().map(|s| s.to_string())))
            .unwrap()
    }

    #[test]
    fn no_arguments_means_repl_mode() {
        let config = args(&[]);
        assert!(config.input_file.is_none());
        assert!(!config.help);
    }

    #[test]
    fn help_flag_is_recognized() {
        assert!(args(&["--help"]).help);
    }

    #[test]
    fn combined_flags_set_both_dumps() {
        let config = args(&["-ts", "prog.av"]);
        assert!(config.dump_tokens);
        assert!(config.dump_tree);
        assert_eq!(config.input_file, Some(PathBuf::from("prog.av")));
    }

    #[test]
    fn unknown_flag_is_an_error() {
        assert!(parse_args(["aardvark".to_string(), "-z".to_string()].into_iter()).is_err());
    }

    #[test]
    fn interpret_prints_integer_result() {
        let config = Config::default();
        interpret(b"return 1 + 2 * 3", &config).expect("interpret");
    }
}
