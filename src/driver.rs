//! REPL and file driver
//!
//! Feeds source text through the lexer and parser and prints what came out:
//! optionally the token stream, then the AST in the printer's prefix form.
//! Diagnostics go to the error writer, styled for the terminal.
//!
//! A lex or parse error ends the current evaluation with no partial AST. In
//! file mode that error is returned to the caller; the REPL reports it and
//! reads the next line.

use crate::config::{Config, Mode, LOG_ENV, REPL_EXIT, REPL_PROMPT};
use crate::parser::{ParseError, Parser, Stmt, Token};
use crate::printer::print_program;
use crossterm::style::Stylize;
use std::fmt;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::Path;
use tracing::{debug, info, instrument};
use tracing_subscriber::EnvFilter;

/// Errors surfaced by the driver
#[derive(Debug)]
pub enum DriverError {
    Io(io::Error),
    Parse(ParseError),
}

impl fmt::Display for DriverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DriverError::Io(err) => write!(f, "I/O error: {}", err),
            DriverError::Parse(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for DriverError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DriverError::Io(err) => Some(err),
            DriverError::Parse(err) => Some(err),
        }
    }
}

impl From<io::Error> for DriverError {
    fn from(err: io::Error) -> Self {
        DriverError::Io(err)
    }
}

impl From<ParseError> for DriverError {
    fn from(err: ParseError) -> Self {
        DriverError::Parse(err)
    }
}

/// Install the process-wide log subscriber, filtered by `RUST_LOG`.
pub fn init_logging() {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_env(LOG_ENV))
        .with_writer(io::stderr)
        .finish();
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        debug!("log subscriber already installed");
    }
}

/// Run the driver in the mode `config` selects.
pub fn run(config: &Config) -> Result<(), DriverError> {
    match &config.mode {
        Mode::Repl => {
            let stdin = io::stdin();
            repl(config, stdin.lock(), &mut io::stdout(), &mut io::stderr())
        }
        Mode::File(path) => read_file(config, path, &mut io::stdout()),
    }
}

/// Lex and parse one source buffer, printing the requested dumps to `out`.
#[instrument(skip_all)]
pub fn eval<W: Write>(
    source: &str,
    config: &Config,
    out: &mut W,
) -> Result<Vec<Stmt>, DriverError> {
    let mut parser = Parser::from_source(source)?;

    if config.dump_tokens {
        for token in parser.tokens() {
            write_token(out, token)?;
        }
    }

    let program = parser.parse()?;

    if config.dump_ast && !program.is_empty() {
        writeln!(out, "{}", print_program(&program))?;
    }

    info!(statements = program.len(), "evaluated source");
    Ok(program)
}

/// Read-eval-print loop: one evaluation per input line until `exit` or EOF.
pub fn repl<R, W, E>(
    config: &Config,
    mut input: R,
    out: &mut W,
    err: &mut E,
) -> Result<(), DriverError>
where
    R: BufRead,
    W: Write,
    E: Write,
{
    loop {
        write!(out, "{}", REPL_PROMPT)?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            writeln!(out)?;
            break;
        }
        if line.trim() == REPL_EXIT {
            break;
        }

        match eval(&line, config, out) {
            Ok(_) => {}
            Err(DriverError::Parse(parse_err)) => report(err, &parse_err)?,
            Err(io_err) => return Err(io_err),
        }
    }

    Ok(())
}

/// Load a source file and evaluate it.
pub fn read_file<W: Write>(
    config: &Config,
    path: &Path,
    out: &mut W,
) -> Result<(), DriverError> {
    let source = fs::read_to_string(path)?;
    debug!(path = %path.display(), bytes = source.len(), "loaded source file");
    eval(&source, config, out)?;
    Ok(())
}

/// Print a positioned diagnostic.
pub fn report<E: Write>(err: &mut E, diagnostic: &ParseError) -> io::Result<()> {
    writeln!(err, "{} {}", "error:".red().bold(), diagnostic)
}

fn write_token<W: Write>(out: &mut W, token: &Token) -> io::Result<()> {
    writeln!(
        out,
        "[{}] {:?} {}",
        token.location, token.kind, token.text
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn output(buf: Vec<u8>) -> String {
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_eval_prints_ast() {
        let mut out = Vec::new();
        let program = eval("a = 1;", &Config::default(), &mut out).unwrap();
        assert_eq!(program.len(), 1);
        assert_eq!(output(out), "(expr (= a 1))\n");
    }

    #[test]
    fn test_eval_dumps_tokens() {
        let config = Config {
            dump_tokens: true,
            dump_ast: false,
            ..Config::default()
        };
        let mut out = Vec::new();
        eval("x::y", &config, &mut out).unwrap_err();
        let text = output(out);
        assert!(text.contains("[1:1] Identifier x"));
        assert!(text.contains("[1:2] ColonColon ::"));
        assert!(text.contains("[1:5] Eof"));
    }

    #[test]
    fn test_eval_dumps_tokens_before_parse_errors() {
        let config = Config {
            dump_tokens: true,
            ..Config::default()
        };
        let mut out = Vec::new();
        let err = eval("1 = 2;", &config, &mut out).unwrap_err();
        assert!(matches!(err, DriverError::Parse(_)));

        let text = output(out);
        assert!(text.contains("[1:3] Assign ="));
        assert!(!text.contains("(expr"));
    }

    #[test]
    fn test_report_writes_positioned_diagnostic() {
        let diagnostic = crate::parse_source("f(1,);").unwrap_err();
        let mut err = Vec::new();
        report(&mut err, &diagnostic).unwrap();

        let text = output(err);
        assert!(text.contains("error:"));
        assert!(text.contains(
            "Parse error at line 1, column 5: Trailing comma in function call"
        ));
    }

    #[test]
    fn test_eval_fails_without_partial_output() {
        let mut out = Vec::new();
        let err = eval("a; 1 = 2;", &Config::default(), &mut out).unwrap_err();
        assert!(matches!(err, DriverError::Parse(_)));
        assert!(out.is_empty());
    }

    #[test]
    fn test_repl_continues_after_errors() {
        let input = Cursor::new("1 = 2;\nb;\nexit\nc;\n");
        let mut out = Vec::new();
        let mut err = Vec::new();
        repl(&Config::default(), input, &mut out, &mut err).unwrap();

        let out = output(out);
        assert!(out.contains("(expr b)"));
        assert!(!out.contains("(expr c)"));
        assert!(output(err).contains("Invalid assignment target"));
    }

    #[test]
    fn test_repl_stops_at_end_of_input() {
        let input = Cursor::new("\"open");
        let mut out = Vec::new();
        let mut err = Vec::new();
        repl(&Config::default(), input, &mut out, &mut err).unwrap();
        assert!(output(err).contains("unterminated string"));
    }
}
