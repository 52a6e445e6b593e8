//! Presence checking for tools, packages, and paths.

pub mod mock;
pub mod probe;

pub use mock::MockPresence;
pub use probe::{
    brew_list_command, is_executable, resolve_tool_path, PackageKind, PresenceChecker,
    SystemPresence,
};
