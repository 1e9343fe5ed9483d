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

//! Logging setup. Library code logs through the `log` facade; the binary installs
//! flexi_logger writing to stderr so stdout stays free for user-facing messages.

use flexi_logger::{FlexiLoggerError, Logger, LoggerHandle};

/// Start the logger. `debug` lowers the level to `debug`, which includes MI traffic.
/// `RUST_LOG` takes precedence over both. Keep the handle alive until exit.
pub fn init(debug: bool) -> Result<LoggerHandle, FlexiLoggerError> {
    Logger::try_with_env_or_str(level_spec(debug))?
        .log_to_stderr()
        .format(flexi_logger::default_format)
        .start()
}

fn level_spec(debug: bool) -> &'static str {
    if debug {
        "debug"
    } else {
        "info"
    }
}
