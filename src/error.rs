// Copyright (c) 2026 MCU-Debug Authors.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Error types for the script generator and the MI session.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while turning `launch.json` into shell scripts.
#[derive(Error, Debug)]
pub enum ScriptError {
    /// `launch.json` does not exist at the expected location
    #[error("Error: launch.json not found at {}", .0.display())]
    ConfigNotFound(PathBuf),

    #[error("Error: failed to read {}: {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file exists but is not valid JSON
    #[error("Error: failed to parse {}: {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Error: No configurations found in launch.json")]
    EmptyConfigurationList,

    /// A configuration lacks a field its template family needs
    #[error("configuration '{config}' has no '{field}' field")]
    MissingField { config: String, field: &'static str },

    /// Another configuration in the same run already produced this file
    #[error("'{file}' was already generated for '{claimed_by}'")]
    DuplicateScript { file: String, claimed_by: String },

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised by the GDB machine-interface session.
#[derive(Error, Debug)]
pub enum MiError {
    #[error("failed to launch '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error talking to the debugger: {0}")]
    Io(#[from] std::io::Error),

    /// The debugger closed its output before sending a result record
    #[error("debugger exited unexpectedly")]
    DebuggerExited,

    /// The debugger rejected the target binary
    #[error("Error! File Not Found: {path} ({message})")]
    FileLoad { path: String, message: String },

    #[error("Did not find {symbol}: {message}")]
    SymbolUnresolved { symbol: String, message: String },

    /// The reply was a success but did not have the expected shape
    #[error("malformed reply for '{symbol}': {reply}")]
    MalformedReply { symbol: String, reply: String },

    #[error("no target file loaded")]
    NotAttached,
}

pub type MiResult<T> = std::result::Result<T, MiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagnostics_name_the_subject() {
        let e = ScriptError::ConfigNotFound(PathBuf::from("/w/.vscode/launch.json"));
        assert_eq!(
            e.to_string(),
            "Error: launch.json not found at /w/.vscode/launch.json"
        );

        let e = MiError::SymbolUnresolved {
            symbol: "b".into(),
            message: "No symbol \"b\" in current context.".into(),
        };
        assert!(e.to_string().starts_with("Did not find b"));
    }
}
