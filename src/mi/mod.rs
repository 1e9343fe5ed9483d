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

//! GDB machine interface: record parsing, the process transport and the session on top.

pub mod record;
pub mod session;
pub mod transport;

pub use record::{MiLine, MiValue, ResultClass, ResultRecord};
pub use session::{DebuggerSession, MiReply, SessionState};
pub use transport::{GdbProcess, MiTransport};
