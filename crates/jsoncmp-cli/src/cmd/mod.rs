/// Command modules for the `jsoncmp` CLI.
///
/// Each submodule implements one subcommand: its `run` function takes the
/// parsed arguments and returns `Ok(())` on success or a
/// [`crate::error::CliError`] on failure.
pub mod compare;
