//! Registry of known commands, in registration order.

use super::{CmdCd, CmdDir, CmdMkDir, CmdMkFile, Command, RegisteredCommand};

/// Ordered set of commands a dispatcher can run.
#[derive(Default)]
pub struct CommandRegistry {
    commands: Vec<RegisteredCommand>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every built-in command with its aliases.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.register("dir", CmdDir::default());
        registry.register("cd", CmdCd::default());
        registry.register("chdir", CmdCd::default());
        registry.register("mkdir", CmdMkDir::default());
        registry.register("md", CmdMkDir::default());
        registry.register("mf", CmdMkFile::default());
        registry.register("mkfile", CmdMkFile::default());
        registry
    }

    /// Append a command. Earlier registrations win on name clashes.
    pub fn register(&mut self, name: &str, command: impl Command + 'static) {
        self.commands.push(RegisteredCommand::new(name, command));
    }

    /// First command whose name matches `name` exactly.
    pub fn find_mut(&mut self, name: &str) -> Option<&mut RegisteredCommand> {
        self.commands.iter_mut().find(|cmd| cmd.matches_name(name))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().map(RegisteredCommand::name)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
