//! CLI command implementations

pub mod check;
pub mod config;
pub mod publish;

pub use check::execute as check;
pub use config::execute as config;
pub use publish::execute as publish;
pub use test::execute as test;

use console::style;

/// Print the command about to run
pub(crate) fn announce(command: &str) {
    println!("{} {}", style("==>").cyan().bold(), style(command).bold());
}
