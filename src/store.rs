//! Persisted settings remembering the last-used inputs across runs.
//!
//! MIT License
//!
//! Copyright (c) 2026 buerotage contributors
//!
//! Permission is hereby granted, free of charge, to any person obtaining a copy
//! of this software and associated documentation files (the "Software"), to deal
//! in the Software without restriction, including without limitation the rights
//! to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
//! copies of the Software, and to permit persons to whom the Software is
//! furnished to do so, subject to the following conditions:
//!
//! The above copyright notice and this permission notice shall be included in all
//! copies or substantial portions of the Software.
//!
//! THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
//! IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
//! FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
//! AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
//! LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
//! OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
//! SOFTWARE.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::region::Region;

/// Last-used inputs, persisted as a small TOML file
///
/// Only the command-line layer reads and writes this; the calendar and
/// aggregation code never touches it. Every field is optional so a partial
/// or missing file degrades to defaults instead of failing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Last-chosen region code
    pub region: Option<Region>,
    /// Last-chosen calendar year
    pub year: Option<i32>,
    /// Last-entered contracted weekly hours
    #[serde(rename = "weekly-working-hours")]
    pub weekly_working_hours: Option<f64>,
    /// Last-entered sections in their compact text form
    pub sections: Option<Vec<String>>,
}

impl Settings {
    /// Loads settings from a file, degrading to defaults on any problem
    ///
    /// A missing or unreadable or corrupt file yields `Settings::default()`;
    /// corruption is logged but never fatal.
    pub fn load(path: &Path) -> Self {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(_) => return Settings::default(),
        };

        match toml::from_str(&content) {
            Ok(settings) => settings,
            Err(error) => {
                warn!(path = %path.display(), %error, "ignoring corrupt settings file");
                Settings::default()
            }
        }
    }

    /// Writes the settings back to the file
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let content = toml::to_string(self).map_err(std::io::Error::other)?;

        fs::write(path, content)
    }
}
