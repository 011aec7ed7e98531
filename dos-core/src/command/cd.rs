//! `cd` - print or change the current directory.

use super::Command;
use crate::console::Outputter;
use crate::error::DosResult;
use crate::fs::Drive;

const PATH_NOT_FOUND: &str = "The system cannot find the path specified";

/// `cd` prints the current directory; `cd <path>` changes to it.
#[derive(Default)]
pub struct CmdCd {
    target: Option<String>,
}

impl Command for CmdCd {
    fn check_arity(&self, count: usize) -> bool {
        count <= 1
    }

    fn bind_parameters(&mut self, params: &[String]) {
        self.target = params.first().cloned();
    }

    fn reset(&mut self) {
        self.target = None;
    }

    fn execute(&mut self, drive: &mut Drive, out: &mut dyn Outputter) -> DosResult<()> {
        let Some(target) = self.target.as_deref() else {
            out.print_line(&drive.current_path());
            return Ok(());
        };

        let Some(dir) = drive.resolve(target).filter(|&id| drive.is_directory(id)) else {
            out.print_line(PATH_NOT_FOUND);
            return Ok(());
        };

        // A directory shadowed by an earlier sibling with the same name
        if drive.path(dir).and_then(|path| drive.resolve(&path)) != Some(dir) {
            out.print_line(&format!("Path not in drive {}", drive.drive_name()));
            return Ok(());
        }

        if !drive.change_current_directory(dir) {
            out.print_line(PATH_NOT_FOUND);
        }
        Ok(())
    }
}
