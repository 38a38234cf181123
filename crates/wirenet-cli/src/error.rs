//! Error type of the CLI.
//!
//! [`CliError`] implements [`miette::Diagnostic`] so that `main` can render
//! it with miette's graphical report handler. Parse failures keep the input
//! text and the offending span so the report points at the broken line.

use std::{io, ops::Range};

use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

use wirenet::WirenetError;

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    #[error("I/O error: {0}")]
    #[diagnostic(code(wirenet::io))]
    Io(#[from] io::Error),

    #[error("Failed to parse {path}: {message}")]
    #[diagnostic(code(wirenet::parse))]
    Parse {
        path: String,
        message: String,

        #[source_code]
        src: String,

        #[label("here")]
        span: Option<SourceSpan>,
    },

    #[error("Failed to serialize output: {0}")]
    #[diagnostic(code(wirenet::serialize))]
    Serialize(#[from] toml::ser::Error),

    #[error(transparent)]
    #[diagnostic(code(wirenet::layout))]
    Wirenet(#[from] WirenetError),

    #[error("{path} has no positions to {action}")]
    #[diagnostic(
        code(wirenet::no_positions),
        help("add a [positions] table, or run `wirenet layout` first")
    )]
    MissingPositions { path: String, action: &'static str },

    #[error("{count} visual conflict(s) remain")]
    #[diagnostic(
        code(wirenet::conflicts),
        help("run `wirenet layout --refine` on this file to reduce them")
    )]
    UnresolvedConflicts { count: usize },
}

impl CliError {
    /// Wraps a TOML parse error together with the text it came from.
    pub fn parse(path: impl Into<String>, src: impl Into<String>, err: &toml::de::Error) -> Self {
        Self::Parse {
            path: path.into(),
            message: err.message().to_string(),
            src: src.into(),
            span: err.span().map(|Range { start, end }| (start, end - start).into()),
        }
    }
}
