//! Fixtures shared by unit tests.

use crate::command::{Command, CommandRegistry};
use crate::console::HeadlessConsole;
use crate::fs::{Drive, NodeId};
use crate::invoker::{CommandInvoker, ExecuteCommand};

/// Handles into the tree built by `sample_drive`.
pub(crate) struct SampleTree {
    pub root: NodeId,
    pub file_in_root1: NodeId,
    pub file_in_root2: NodeId,
    pub sub_dir1: NodeId,
    pub file1_in_dir1: NodeId,
    pub file2_in_dir1: NodeId,
    pub sub_dir2: NodeId,
}

/// C:
/// ├── FileInRoot1
/// ├── FileInRoot2
/// ├── subDir1
/// │   ├── File1InDir1
/// │   └── File2InDir1
/// └── subDir2
pub(crate) fn sample_drive() -> (Drive, SampleTree) {
    let mut drive = Drive::new('C').unwrap();
    let root = drive.root_directory();

    fn add_file(drive: &mut Drive, parent: NodeId, name: &str, content: &str) -> NodeId {
        let id = drive.create_file(name, content).unwrap();
        drive.add_child(parent, id).unwrap();
        id
    }
    let file_in_root1 = add_file(&mut drive, root, "FileInRoot1", "an entry");
    let file_in_root2 = add_file(&mut drive, root, "FileInRoot2", "a long entry in a file");

    let sub_dir1 = drive.create_directory("subDir1").unwrap();
    drive.add_child(root, sub_dir1).unwrap();
    let file1_in_dir1 = add_file(&mut drive, sub_dir1, "File1InDir1", "");
    let file2_in_dir1 = add_file(&mut drive, sub_dir1, "File2InDir1", "");

    let sub_dir2 = drive.create_directory("subDir2").unwrap();
    drive.add_child(root, sub_dir2).unwrap();

    let tree = SampleTree {
        root,
        file_in_root1,
        file_in_root2,
        sub_dir1,
        file1_in_dir1,
        file2_in_dir1,
        sub_dir2,
    };
    (drive, tree)
}

/// Dispatcher over the sample drive with a single registered command.
pub(crate) struct CommandHarness {
    pub invoker: CommandInvoker,
    pub out: HeadlessConsole,
    pub tree: SampleTree,
}

impl CommandHarness {
    pub fn new(name: &str, command: impl Command + 'static) -> Self {
        let (drive, tree) = sample_drive();
        let mut commands = CommandRegistry::new();
        commands.register(name, command);
        Self {
            invoker: CommandInvoker::new(drive, commands),
            out: HeadlessConsole::new(),
            tree,
        }
    }

    pub fn execute(&mut self, line: &str) {
        self.invoker.execute_command(line, &mut self.out);
    }

    pub fn drive(&self) -> &Drive {
        self.invoker.drive()
    }

    pub fn drive_mut(&mut self) -> &mut Drive {
        self.invoker.drive_mut()
    }

    pub fn output(&self) -> &str {
        self.out.output()
    }

    pub fn assert_current_directory_is(&self, expected: NodeId) {
        assert_eq!(self.drive().current_directory(), expected);
        assert_eq!(self.drive().current_path(), self.drive().path(expected).unwrap());
    }
}
