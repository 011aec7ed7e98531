//! `mkdir` - create directories in the current directory.

use super::{Command, NAME_SYNTAX_INCORRECT};
use crate::console::Outputter;
use crate::error::DosResult;
use crate::fs::{is_valid_name, Drive};

const PATH_NOT_NAME: &str = "At least one parameter denotes a path rather than a directory name.";

/// `mkdir <name> [<name> ...]` creates one empty directory per name.
/// Only bare names are accepted, not paths.
#[derive(Default)]
pub struct CmdMkDir {
    names: Vec<String>,
}

impl Command for CmdMkDir {
    fn check_arity(&self, count: usize) -> bool {
        count >= 1
    }

    fn check_values(&mut self, params: &[String], _drive: &Drive, out: &mut dyn Outputter) -> bool {
        if params.iter().any(|p| p.contains(['\\', '/'])) {
            out.print_line(PATH_NOT_NAME);
            return false;
        }
        if !params.iter().all(|p| is_valid_name(p)) {
            out.print_line(NAME_SYNTAX_INCORRECT);
            return false;
        }
        true
    }

    fn bind_parameters(&mut self, params: &[String]) {
        self.names = params.to_vec();
    }

    fn reset(&mut self) {
        self.names.clear();
    }

    fn execute(&mut self, drive: &mut Drive, _out: &mut dyn Outputter) -> DosResult<()> {
        let current = drive.current_directory();
        for name in &self.names {
            let dir = drive.create_directory(name)?;
            drive.add_child(current, dir)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::CommandHarness;

    fn harness() -> CommandHarness {
        CommandHarness::new("mkdir", CmdMkDir::default())
    }

    #[test]
    fn test_mkdir_creates_directory_in_root() {
        let mut h = harness();
        h.execute("mkdir test1");

        let drive = h.drive();
        let created = drive.resolve("C:\\test1").unwrap();
        assert!(drive.is_directory(created));
        assert_eq!(drive.name(created), Some("test1"));
        assert_eq!(drive.parent(created), Some(drive.root_directory()));
        assert_eq!(drive.dir_count(drive.root_directory()), 3);
        assert!(h.out.is_empty());
    }

    #[test]
    fn test_mkdir_single_letter() {
        let mut h = harness();
        h.execute("mkdir a");
        let drive = h.drive();
        let created = drive.resolve("C:\\a").unwrap();
        assert_eq!(drive.parent(created), Some(drive.root_directory()));
        assert!(h.out.is_empty());
    }

    #[test]
    fn test_mkdir_in_current_directory() {
        let mut h = harness();
        let sub_dir2 = h.tree.sub_dir2;
        assert!(h.drive_mut().change_current_directory(sub_dir2));
        h.execute("mkdir nested");
        let created = h.drive().resolve("C:\\subDir2\\nested").unwrap();
        assert_eq!(h.drive().parent(created), Some(sub_dir2));
    }

    #[test]
    fn test_mkdir_no_parameters() {
        let mut h = harness();
        h.execute("mkdir");
        assert_eq!(h.drive().dir_count(h.tree.root), 2);
        assert!(h.output().contains("syntax of the command is incorrect"));
    }

    #[test]
    fn test_mkdir_several_parameters() {
        let mut h = harness();
        h.execute("mkdir test1 test2 test3");

        let drive = h.drive();
        let root = drive.root_directory();
        for name in ["test1", "test2", "test3"] {
            let created = drive.resolve(&format!("C:\\{}", name)).unwrap();
            assert_eq!(drive.parent(created), Some(root));
            assert!(drive.children(created).is_empty());
        }
        assert_eq!(drive.dir_count(root), 5);
        assert!(h.out.is_empty());
    }

    #[test]
    fn test_mkdir_rejects_paths_without_creating_anything() {
        let mut h = harness();
        h.execute("mkdir ok c:\\temp\\dir1");
        assert!(h.output().contains("denotes a path"));
        assert!(h.output().contains("Wrong parameter entered"));
        assert_eq!(h.drive().dir_count(h.tree.root), 2);
        assert!(h.drive().resolve("ok").is_none());
    }
}
