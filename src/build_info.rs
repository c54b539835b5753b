//! Build metadata
//!
//! `build.rs` stamps every compile with a build number and UTC timestamp.
//! Builds outside cargo (or with a hand-edited counter) report them as absent.

use serde::Serialize;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuildInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub build_number: Option<u64>,
    pub build_timestamp: Option<&'static str>,
}

impl BuildInfo {
    pub fn current() -> Self {
        Self::from_stamp(
            option_env!("FITSTACK_BUILD_NUMBER"),
            option_env!("FITSTACK_BUILD_TIMESTAMP"),
        )
    }

    fn from_stamp(number: Option<&str>, timestamp: Option<&'static str>) -> Self {
        Self {
            name: NAME,
            version: VERSION,
            build_number: number.and_then(|n| n.trim().parse().ok()),
            build_timestamp: timestamp.map(str::trim).filter(|t| !t.is_empty()),
        }
    }

    /// "1.0.0 build 42 (2025-01-09T10:00:00Z)"
    pub fn describe(&self) -> String {
        let mut text = self.version.to_string();
        if let Some(number) = self.build_number {
            text.push_str(&format!(" build {}", number));
        }
        if let Some(timestamp) = self.build_timestamp {
            text.push_str(&format!(" ({})", timestamp));
        }
        text
    }
}

/// One-line banner on stderr; stdout belongs to the MCP transport
pub fn print_startup_banner() {
    eprintln!("FitStack Macro Tracker {}", BuildInfo::current().describe());
}
