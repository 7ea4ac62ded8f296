//! Compile-time build metadata exposed to CLI/runtime surfaces.

/// Semver package version from `Cargo.toml`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// VCS commit hash captured at build time.
pub const GIT_COMMIT: &str = env!("NOWSHOWING_BUILD_GIT_HASH");

/// Build timestamp captured at compile time.
pub const BUILD_TIMESTAMP: &str = env!("NOWSHOWING_BUILD_TIMESTAMP");

/// Version block used by `nowshowing --version`.
pub const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "\ncommit: ",
    env!("NOWSHOWING_BUILD_GIT_HASH"),
    "\nbuilt: ",
    env!("NOWSHOWING_BUILD_TIMESTAMP")
);

/// Concise metadata for the startup log line.
pub fn startup_metadata_line() -> String {
    format!("v{VERSION} ({GIT_COMMIT}, built {BUILD_TIMESTAMP})")
}
