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

use std::io::{self, BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

use log::debug;

use crate::error::{MiError, MiResult};

/// Line-oriented pipe to a debugger in MI mode. One line out, any number of lines back.
pub trait MiTransport {
    fn send_line(&mut self, line: &str) -> io::Result<()>;

    /// Next output line without its terminator, `None` once the debugger closed its output.
    fn read_line(&mut self) -> io::Result<Option<String>>;
}

/// A gdb child process started with `--interpreter=mi3`.
pub struct GdbProcess {
    child: Child,
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
}

impl GdbProcess {
    pub fn spawn(gdb: &str) -> MiResult<Self> {
        let mut child = Command::new(gdb)
            .args(["--interpreter=mi3", "-q"])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|source| MiError::Spawn {
                program: gdb.to_string(),
                source,
            })?;

        let stdin = child.stdin.take().ok_or_else(|| MiError::Spawn {
            program: gdb.to_string(),
            source: io::Error::new(io::ErrorKind::BrokenPipe, "failed to capture gdb stdin"),
        })?;
        let stdout = child.stdout.take().ok_or_else(|| MiError::Spawn {
            program: gdb.to_string(),
            source: io::Error::new(io::ErrorKind::BrokenPipe, "failed to capture gdb stdout"),
        })?;
        debug!("started {} (pid {})", gdb, child.id());

        Ok(Self {
            child,
            stdin,
            stdout: BufReader::new(stdout),
        })
    }
}

impl MiTransport for GdbProcess {
    fn send_line(&mut self, line: &str) -> io::Result<()> {
        self.stdin.write_all(line.as_bytes())?;
        self.stdin.write_all(b"\n")?;
        self.stdin.flush()
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut buf = String::new();
        if self.stdout.read_line(&mut buf)? == 0 {
            return Ok(None);
        }
        while buf.ends_with('\n') || buf.ends_with('\r') {
            buf.pop();
        }
        Ok(Some(buf))
    }
}

impl Drop for GdbProcess {
    fn drop(&mut self) {
        // Reap the child if -gdb-exit was never sent or was ignored
        if let Ok(None) = self.child.try_wait() {
            let _ = self.child.kill();
        }
        let _ = self.child.wait();
    }
}
