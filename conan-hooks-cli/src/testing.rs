//! In-process CLI runner for tests.
//!
//! Spawning the binary hides hook output behind a pipe and makes environment
//! control awkward; [`conan_command`] parses and runs the CLI in the calling
//! process instead, capturing everything the hooks print.

use clap::Parser;

use conan_hooks_core::{HookConfig, HookOutput, MemoryOutput};

use crate::{run, Cli};

/// Exit code for a command that ran and failed.
pub const EXIT_FAILURE: i32 = 1;
/// Exit code for arguments that did not parse (clap's convention).
pub const EXIT_USAGE: i32 = 2;

/// Run `conan-hooks <args>` in-process with `config`.
///
/// Returns the exit code the binary would have produced and the captured
/// output, one line per hook message.
pub fn conan_command<I, S>(args: I, config: HookConfig) -> (i32, MemoryOutput)
where
    I: IntoIterator<Item = S>,
    S: Into<std::ffi::OsString> + Clone,
{
    let mut out = MemoryOutput::new();
    let argv = std::iter::once(std::ffi::OsString::from("conan-hooks"))
        .chain(args.into_iter().map(Into::into));

    let cli = match Cli::try_parse_from(argv) {
        Ok(cli) => cli,
        Err(err) => {
            out.error(err.to_string().trim_end());
            return (err.exit_code(), out);
        }
    };

    match run(cli, config, &mut out) {
        Ok(()) => (0, out),
        Err(err) => {
            out.error(&format!("{err:#}"));
            (EXIT_FAILURE, out)
        }
    }
}
