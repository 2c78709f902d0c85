// Copyright 2023-, Edge & Node, GraphOps, and Semiotic Labs.
// SPDX-License-Identifier: Apache-2.0

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(version, about = "GraphQL service answering the `greeting` query")]
pub struct Cli {
    /// Path to the configuration file.
    /// Values missing from the file fall back to the built-in defaults
    /// and can be overridden with `GREETING_SERVICE_*` variables.
    #[arg(long, value_name = "FILE", verbatim_doc_comment)]
    pub config: Option<PathBuf>,
}
