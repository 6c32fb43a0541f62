// Dweve YML - Streaming catalog feed reader
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Shared test fixtures for the YML catalog crates.
//!
//! Fixtures are plain catalog documents (as text) so that every crate can feed
//! them through whatever entry point it tests: the whole-document decoder, the
//! streaming reader, or the CLI via a temporary file.
//!
//! # Quick Start
//!
//! ```rust
//! use yml_test::fixtures;
//!
//! let doc = fixtures::simple_catalog();            // one offer, one delivery option
//! let doc = fixtures::catalog_with_offers(1_000);  // generated, ids 1..=1000
//!
//! for (name, broken) in fixtures::malformed_samples() {
//!     // feed `broken` to the parser and expect MalformedInput
//! }
//! ```

/// Canonical catalog documents and generators.
pub mod fixtures;

pub use fixtures::{catalog_with_offers, full_catalog, simple_catalog};

use std::io;
use std::path::{Path, PathBuf};

/// Write `content` to `dir/name` and return the full path.
pub fn write_fixture(dir: &Path, name: &str, content: &str) -> io::Result<PathBuf> {
    let path = dir.join(name);
    std::fs::write(&path, content)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_fixture() {
        let dir = std::env::temp_dir().join(format!("yml-test-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = write_fixture(&dir, "simple.yml", simple_catalog()).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), simple_catalog());
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
