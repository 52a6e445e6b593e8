//! Environment detection.
//!
//! Determines the facts every install step depends on: the CPU
//! architecture (which fixes Homebrew's prefix), the active shell (which
//! fixes the startup file), and the user's home directory.

pub mod detection;
pub mod host;

pub use detection::{Architecture, ShellKind};
pub use host::{parse_system_path, HostEnvironment};
