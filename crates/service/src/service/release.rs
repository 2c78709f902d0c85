// Copyright 2023-, Edge & Node, GraphOps, and Semiotic Labs.
// SPDX-License-Identifier: Apache-2.0

use std::collections::HashMap;

use build_info::BuildInfo;
use serde::Serialize;

#[derive(Clone, Debug, Serialize)]
pub struct GreetingServiceRelease {
    version: String,
    dependencies: HashMap<String, String>,
}

impl GreetingServiceRelease {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            dependencies: HashMap::new(),
        }
    }
}

impl From<&BuildInfo> for GreetingServiceRelease {
    fn from(value: &BuildInfo) -> Self {
        Self {
            version: value.crate_info.version.to_string(),
            dependencies: HashMap::from_iter(
                value
                    .crate_info
                    .dependencies
                    .iter()
                    .map(|d| (d.name.clone(), d.version.to_string())),
            ),
        }
    }
}
