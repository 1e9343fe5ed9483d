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

//! A request/response session with one gdb instance.
//!
//! Commands are strictly serialized: `execute` writes one command and blocks until the
//! result record and the following prompt have been read. There is no timeout, so a gdb
//! that stops answering blocks the caller for good.

use log::debug;

use crate::error::{MiError, MiResult};
use crate::mi::record::{mi_quote, parse_line, MiLine, ResultRecord, StreamKind};
use crate::mi::transport::{GdbProcess, MiTransport};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Disconnected,
    /// A target file has been loaded
    Attached,
}

/// Everything gdb printed in answer to one command
#[derive(Debug, Clone, PartialEq)]
pub struct MiReply {
    pub result: ResultRecord,
    pub console: Vec<String>,
}

pub struct DebuggerSession<T: MiTransport> {
    transport: T,
    state: SessionState,
}

impl DebuggerSession<GdbProcess> {
    /// Start `gdb` in MI mode and wait for its first prompt.
    pub fn launch(gdb: &str) -> MiResult<Self> {
        let mut session = Self::new(GdbProcess::spawn(gdb)?);
        session.drain_banner()?;
        Ok(session)
    }
}

impl<T: MiTransport> DebuggerSession<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            state: SessionState::Disconnected,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Skip startup notifications up to the first prompt.
    pub fn drain_banner(&mut self) -> MiResult<()> {
        loop {
            let line = self.next_line()?;
            if parse_line(&line) == MiLine::Prompt {
                return Ok(());
            }
        }
    }

    /// Send one command and collect its reply.
    pub fn execute(&mut self, command: &str) -> MiResult<MiReply> {
        debug!("mi-> {}", command);
        self.transport.send_line(command)?;
        self.read_reply()
    }

    fn next_line(&mut self) -> MiResult<String> {
        let line = self.transport.read_line()?.ok_or(MiError::DebuggerExited)?;
        debug!("mi<- {}", line);
        Ok(line)
    }

    fn read_reply(&mut self) -> MiResult<MiReply> {
        let mut result = None;
        let mut console = Vec::new();
        loop {
            let line = self.next_line()?;
            match parse_line(&line) {
                MiLine::Result(record) => result = Some(record),
                MiLine::Prompt => {
                    // A prompt before the result belongs to earlier output
                    if let Some(result) = result.take() {
                        return Ok(MiReply { result, console });
                    }
                }
                MiLine::Stream {
                    kind: StreamKind::Log,
                    text,
                } => debug!("gdb log: {}", text.trim_end()),
                MiLine::Stream { text, .. } => console.push(text),
                MiLine::Async(_) | MiLine::Other(_) => {}
            }
        }
    }

    /// Load `path` as the executable and symbol file. An `^error` means gdb could not
    /// open it; the session stays disconnected.
    pub fn load_file(&mut self, path: &str) -> MiResult<()> {
        let reply = self.execute(&format!("-file-exec-and-symbols {}", mi_quote(path)))?;
        if reply.result.is_error() {
            return Err(MiError::FileLoad {
                path: path.to_string(),
                message: reply.result.error_message().to_string(),
            });
        }
        self.state = SessionState::Attached;
        Ok(())
    }

    /// Resolve the address of `symbol` as gdb prints it, e.g. `0x20000010`.
    ///
    /// The address is read from the `value` field of the result record; the first
    /// `0x` token of that value is taken, skipping any pointer-type prefix such as
    /// `(void (*)(void))`. A success reply without such a token is reported as
    /// `MalformedReply` instead of guessing.
    pub fn query(&mut self, symbol: &str) -> MiResult<String> {
        if self.state != SessionState::Attached {
            return Err(MiError::NotAttached);
        }
        let expr = format!("&{}", symbol);
        let reply = self.execute(&format!("-data-evaluate-expression {}", mi_quote(&expr)))?;
        let record = &reply.result;
        if record.is_error() {
            return Err(MiError::SymbolUnresolved {
                symbol: symbol.to_string(),
                message: record.error_message().to_string(),
            });
        }
        record
            .get_str("value")
            .and_then(extract_address)
            .map(str::to_string)
            .ok_or_else(|| MiError::MalformedReply {
                symbol: symbol.to_string(),
                reply: record.raw.clone(),
            })
    }

    /// Ask gdb to exit. The session is consumed either way.
    pub fn shutdown(mut self) -> MiResult<()> {
        debug!("mi-> -gdb-exit");
        self.transport.send_line("-gdb-exit")?;
        Ok(())
    }

    pub fn into_transport(self) -> T {
        self.transport
    }
}

/// First `0x...` token of an evaluated address expression.
pub fn extract_address(value: &str) -> Option<&str> {
    value
        .split_whitespace()
        .find(|tok| tok.len() > 2 && tok.starts_with("0x"))
}
