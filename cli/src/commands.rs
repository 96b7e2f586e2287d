use crate::parse::{ParseError, ParsedPath};
use conifer::path::DegenerateInput;
use conifer::tessellation::{StripOptions, TessellationError};

use std::fmt;
use std::io;

pub struct TessellateCmd {
    pub path: ParsedPath,
    pub output: Box<dyn io::Write>,
    pub options: StripOptions,
    pub count: bool,
    pub log: bool,
}

pub struct FlattenCmd {
    pub path: ParsedPath,
    pub output: Box<dyn io::Write>,
    pub options: StripOptions,
    pub count: bool,
    pub log: bool,
}

#[derive(Debug)]
pub enum CliError {
    Io(io::Error),
    InvalidArgument { name: &'static str, value: String },
    Parse(ParseError),
    Path(DegenerateInput),
    Tessellation(TessellationError),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CliError::Io(e) => write!(f, "{}", e),
            CliError::InvalidArgument { name, value } => {
                write!(f, "invalid value {:?} for {}", value, name)
            }
            CliError::Parse(e) => write!(f, "parse error: {}", e),
            CliError::Path(e) => write!(f, "invalid path: {}", e),
            CliError::Tessellation(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(err: io::Error) -> Self {
        CliError::Io(err)
    }
}

impl From<ParseError> for CliError {
    fn from(err: ParseError) -> Self {
        CliError::Parse(err)
    }
}

impl From<DegenerateInput> for CliError {
    fn from(err: DegenerateInput) -> Self {
        CliError::Path(err)
    }
}

impl From<TessellationError> for CliError {
    fn from(err: TessellationError) -> Self {
        CliError::Tessellation(err)
    }
}
