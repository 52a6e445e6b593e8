//! External command execution and shell startup-file management.

pub mod command;
pub mod mock;
pub mod platform;
pub mod startup;

pub use command::{CommandResult, CommandRunner, CommandSpec, SystemRunner};
pub use mock::MockRunner;
pub use platform::{is_ci, is_elevated, is_macos};
pub use startup::{LineStatus, StartupFile};
