//! Command framework.
//!
//! A concrete command implements `Command`: a set of hooks that validate and
//! capture its arguments, plus `execute`. `RegisteredCommand` wraps it with
//! the fixed protocol the dispatcher drives for every invocation:
//! reset, set parameters, check (arity, values, bind), execute.

mod cd;
mod dir;
mod mkdir;
mod mkfile;
mod registry;

pub use cd::CmdCd;
pub use dir::CmdDir;
pub use mkdir::CmdMkDir;
pub use mkfile::CmdMkFile;
pub use registry::CommandRegistry;

use crate::console::Outputter;
use crate::error::{DosError, DosResult};
use crate::fs::Drive;

/// Printed when a command rejects the number of its arguments.
pub const SYNTAX_INCORRECT: &str = "The syntax of the command is incorrect.";

/// Printed when a file or directory name argument is not a legal name.
pub const NAME_SYNTAX_INCORRECT: &str =
    "The filename, directory name, or volume label syntax is incorrect.";

/// Hooks implemented by every concrete command.
pub trait Command {
    /// Accept or reject the number of arguments. Default accepts any.
    fn check_arity(&self, _count: usize) -> bool {
        true
    }

    /// Validate argument values, printing a diagnostic on rejection.
    /// Only called after `check_arity` accepted. Default accepts any.
    fn check_values(&mut self, _params: &[String], _drive: &Drive, _out: &mut dyn Outputter) -> bool {
        true
    }

    /// Capture validated arguments. Only called when both checks passed.
    fn bind_parameters(&mut self, _params: &[String]) {}

    /// Forget anything captured by a previous invocation.
    fn reset(&mut self) {}

    /// Run the command. Only called after a successful check.
    fn execute(&mut self, drive: &mut Drive, out: &mut dyn Outputter) -> DosResult<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Fresh,
    ParametersSet,
    Checked,
}

/// A command registered under a (lower-cased) name.
pub struct RegisteredCommand {
    name: String,
    parameters: Option<Vec<String>>,
    stage: Stage,
    command: Box<dyn Command>,
}

impl RegisteredCommand {
    pub fn new(name: &str, command: impl Command + 'static) -> Self {
        Self {
            name: name.to_lowercase(),
            parameters: None,
            stage: Stage::Fresh,
            command: Box::new(command),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Exact comparison against the lower-cased registration name.
    pub fn matches_name(&self, candidate: &str) -> bool {
        self.name == candidate
    }

    /// Parameters of the current invocation, if set.
    pub fn parameters(&self) -> Option<&[String]> {
        self.parameters.as_deref()
    }

    /// Store the arguments of a new invocation. The command must have been
    /// reset since its previous invocation.
    pub fn set_parameters(&mut self, parameters: Vec<String>) -> DosResult<()> {
        if self.stage != Stage::Fresh {
            return Err(DosError::NotReset(self.name.clone()));
        }
        self.parameters = Some(parameters);
        self.stage = Stage::ParametersSet;
        Ok(())
    }

    /// Run the arity check, the value check and the bind hook in order.
    ///
    /// Returns `Ok(false)` when the user's input was rejected (a diagnostic
    /// has been printed) and an error when no parameters were set.
    pub fn check_parameters(&mut self, drive: &Drive, out: &mut dyn Outputter) -> DosResult<bool> {
        let Some(params) = self.parameters.as_deref() else {
            return Err(DosError::ParametersNotSet(self.name.clone()));
        };

        if !self.command.check_arity(params.len()) {
            out.print_line(SYNTAX_INCORRECT);
            return Ok(false);
        }
        if !self.command.check_values(params, drive, out) {
            return Ok(false);
        }
        self.command.bind_parameters(params);
        self.stage = Stage::Checked;
        Ok(true)
    }

    pub fn execute(&mut self, drive: &mut Drive, out: &mut dyn Outputter) -> DosResult<()> {
        if self.stage != Stage::Checked {
            return Err(DosError::NotChecked(self.name.clone()));
        }
        self.command.execute(drive, out)
    }

    /// Clear the stored parameters and anything the command captured.
    pub fn reset(&mut self) {
        self.parameters = None;
        self.stage = Stage::Fresh;
        self.command.reset();
    }
}
