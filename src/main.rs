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

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

use commands::{addresses, scripts};

#[derive(Parser, Debug)]
#[command(author, version, about = "Debug launch helpers for embedded targets", long_about = None)]
struct Cli {
    /// Enable debug output, including gdb MI traffic
    #[arg(short = 'd', long = "debug", global = true, default_value_t = false)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Turn .vscode/launch.json into executable debug scripts
    Scripts(scripts::ScriptsArgs),
    /// Resolve symbol addresses through gdb and write them to a listing
    Addresses(addresses::AddressesArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _logger = launch_debug_tools::logging::init(cli.debug)?;

    match cli.command {
        Commands::Scripts(args) => scripts::run(args),
        Commands::Addresses(args) => addresses::run(args),
    }
}
