//! `dir` - list a directory.

use super::Command;
use crate::console::Outputter;
use crate::error::DosResult;
use crate::fs::{Drive, NodeId};

const FILE_NOT_FOUND: &str = "File Not Found";

/// `dir` lists the current directory; `dir <path>` lists the given
/// directory, or the directory containing the given file.
#[derive(Default)]
pub struct CmdDir {
    target: Option<NodeId>,
}

impl Command for CmdDir {
    fn check_arity(&self, count: usize) -> bool {
        count <= 1
    }

    fn check_values(&mut self, params: &[String], drive: &Drive, out: &mut dyn Outputter) -> bool {
        let Some(path) = params.first() else {
            self.target = Some(drive.current_directory());
            return true;
        };

        match drive.resolve(path) {
            Some(id) if drive.is_directory(id) => self.target = Some(id),
            Some(file) => self.target = drive.parent(file).or(Some(drive.root_directory())),
            None => {
                out.print_line(FILE_NOT_FOUND);
                return false;
            }
        }
        true
    }

    fn reset(&mut self) {
        self.target = None;
    }

    fn execute(&mut self, drive: &mut Drive, out: &mut dyn Outputter) -> DosResult<()> {
        let dir = self.target.unwrap_or(drive.current_directory());

        out.print_line(&format!("Directory of {}", drive.path(dir).unwrap_or_default()));
        out.new_line();

        for &child in drive.children(dir) {
            if drive.is_directory(child) {
                out.print("<DIR>");
            } else {
                out.print(&drive.size(child).to_string());
            }
            out.print(&format!("\t{}", drive.name(child).unwrap_or_default()));
            out.new_line();
        }

        out.print_line(&format!("\t{} File(s)", drive.file_count(dir)));
        out.print_line(&format!("\t{} Dir(s)", drive.dir_count(dir)));
        Ok(())
    }
}
