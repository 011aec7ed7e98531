//! `mkfile` - create a file in the current directory.

use super::{Command, NAME_SYNTAX_INCORRECT};
use crate::console::Outputter;
use crate::error::DosResult;
use crate::fs::{is_valid_name, Drive};

/// `mkfile <name> [<content>]`. Without content the file is empty.
#[derive(Default)]
pub struct CmdMkFile {
    name: String,
    content: String,
}

impl Command for CmdMkFile {
    fn check_arity(&self, count: usize) -> bool {
        (1..=2).contains(&count)
    }

    fn check_values(&mut self, params: &[String], _drive: &Drive, out: &mut dyn Outputter) -> bool {
        if !is_valid_name(&params[0]) {
            out.print_line(NAME_SYNTAX_INCORRECT);
            return false;
        }
        true
    }

    fn bind_parameters(&mut self, params: &[String]) {
        self.name = params[0].clone();
        self.content = params.get(1).cloned().unwrap_or_default();
    }

    fn reset(&mut self) {
        self.name.clear();
        self.content.clear();
    }

    fn execute(&mut self, drive: &mut Drive, _out: &mut dyn Outputter) -> DosResult<()> {
        let file = drive.create_file(&self.name, &self.content)?;
        let current = drive.current_directory();
        drive.add_child(current, file)
    }
}
