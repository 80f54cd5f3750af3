// Configuration for the Ion driver: constants and command-line options

use std::fmt;
use std::path::PathBuf;

/// Extension a source file must carry to be loaded
pub const SOURCE_EXTENSION: &str = "tx";

/// Most arguments a single call may pass
pub const MAX_CALL_ARGUMENTS: usize = 255;

/// Deepest nesting of groupings, prefix operators, blocks and types the
/// parser accepts before giving up
pub const MAX_NESTING_DEPTH: usize = 64;

/// Prompt printed before each REPL line
pub const REPL_PROMPT: &str = "> ";

/// REPL line that ends the session
pub const REPL_EXIT: &str = "exit";

/// Environment variable read for the log filter
pub const LOG_ENV: &str = "RUST_LOG";

/// Where source text comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Repl,
    File(PathBuf),
}

/// Driver options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub mode: Mode,
    /// Print every token before parsing
    pub dump_tokens: bool,
    /// Print the AST after parsing
    pub dump_ast: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: Mode::Repl,
            dump_tokens: false,
            dump_ast: true,
        }
    }
}

/// Command-line usage error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    UnknownFlag(String),
    TooManyPaths,
    WrongExtension(PathBuf),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::UnknownFlag(flag) => write!(f, "Unknown flag '{}'", flag),
            ConfigError::TooManyPaths => write!(f, "Expected at most one source path"),
            ConfigError::WrongExtension(path) => write!(
                f,
                "File {} has incorrect extension (expected .{})",
                path.display(),
                SOURCE_EXTENSION
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    /// Build a config from command-line arguments, program name excluded.
    ///
    /// ```text
    /// ion [--tokens] [--no-ast] [path.tx]
    /// ```
    pub fn from_args<I, S>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut config = Config::default();

        for arg in args {
            let arg = arg.into();
            match arg.as_str() {
                "--tokens" => config.dump_tokens = true,
                "--no-ast" => config.dump_ast = false,
                flag if flag.starts_with("--") => {
                    return Err(ConfigError::UnknownFlag(arg));
                }
                _ => {
                    if config.mode != Mode::Repl {
                        return Err(ConfigError::TooManyPaths);
                    }
                    let path = PathBuf::from(arg);
                    if path.extension().and_then(|e| e.to_str()) != Some(SOURCE_EXTENSION) {
                        return Err(ConfigError::WrongExtension(path));
                    }
                    config.mode = Mode::File(path);
                }
            }
        }

        Ok(config)
    }

    pub fn usage(program: &str) -> String {
        format!(
            "Usage: {} [--tokens] [--no-ast] [path.{}]",
            program, SOURCE_EXTENSION
        )
    }
}
