//! Command dispatcher - turns a raw input line into a checked command execution.

use tracing::{debug, warn};

use crate::command::{CommandRegistry, RegisteredCommand};
use crate::console::Outputter;
use crate::error::DosResult;
use crate::fs::Drive;

/// Printed when a command's parameter check fails.
pub const WRONG_PARAMETER: &str = "Wrong parameter entered";

/// Anything that can interpret and run a command line.
pub trait ExecuteCommand {
    /// Run `line`, sending all output to `out`. Never fails: every error is
    /// reported through `out`.
    fn execute_command(&mut self, line: &str, out: &mut dyn Outputter);
}

/// Dispatcher owning the drive and the registered commands.
pub struct CommandInvoker {
    drive: Drive,
    commands: CommandRegistry,
}

impl CommandInvoker {
    pub fn new(drive: Drive, commands: CommandRegistry) -> Self {
        Self { drive, commands }
    }

    pub fn drive(&self) -> &Drive {
        &self.drive
    }

    pub fn drive_mut(&mut self) -> &mut Drive {
        &mut self.drive
    }

    pub fn commands(&self) -> &CommandRegistry {
        &self.commands
    }

    pub fn commands_mut(&mut self) -> &mut CommandRegistry {
        &mut self.commands
    }
}

impl ExecuteCommand for CommandInvoker {
    fn execute_command(&mut self, line: &str, out: &mut dyn Outputter) {
        let name = parse_command_name(line);
        let parameters = parse_command_parameters(line);
        debug!(command = %name, ?parameters, "dispatching");

        let Some(command) = self.commands.find_mut(&name) else {
            out.print_line(&format!(
                "'{}' is not recognized as an internal or external command,",
                name
            ));
            out.print_line("operable program or batch file.");
            return;
        };

        if let Err(e) = run(command, &mut self.drive, parameters, out) {
            warn!(command = %name, error = %e, "command failed");
            out.print_line(&e.to_string());
        }
    }
}

fn run(
    command: &mut RegisteredCommand,
    drive: &mut Drive,
    parameters: Vec<String>,
    out: &mut dyn Outputter,
) -> DosResult<()> {
    command.reset();
    command.set_parameters(parameters)?;
    if !command.check_parameters(drive, out)? {
        out.print_line(WRONG_PARAMETER);
        return Ok(());
    }
    command.execute(drive, out)
}

/// Lower-cased command name: everything up to the first space, after
/// trimming and turning `,` and `;` into spaces.
pub fn parse_command_name(line: &str) -> String {
    let cleaned = line.to_lowercase().trim().replace([',', ';'], " ");
    match cleaned.find(' ') {
        Some(pos) => cleaned[..pos].to_string(),
        None => cleaned,
    }
}

/// Arguments in their original case, split on spaces, commas and
/// semicolons, without the command name and without empty tokens.
pub fn parse_command_parameters(line: &str) -> Vec<String> {
    line.trim()
        .replace([',', ';'], " ")
        .split(' ')
        .skip(1)
        .filter(|token| !token.is_empty())
        .map(String::from)
        .collect()
}
