use crate::{Context, Data, Error};

type Command = poise::Command<Data, Error>;

pub struct CommandInfo<'a> {
    pub command: &'a Command,
    pub subcommand: Option<&'a Command>,
}

/// Looks commands up by name, alias or "parent child" path.
pub struct CommandFinder<'a> {
    ctx: &'a Context<'a>,
}

impl<'a> CommandFinder<'a> {
    pub fn new(ctx: &'a Context<'a>) -> Self {
        Self { ctx }
    }

    fn visible(&self) -> impl Iterator<Item = &'a Command> + use<'a> {
        self.ctx
            .framework()
            .options()
            .commands
            .iter()
            .filter(|cmd| !cmd.hide_in_help)
    }

    pub fn get_all_commands(&self) -> Vec<&'a Command> {
        self.visible().collect()
    }

    /// Top-level names, plus "parent child" for every subcommand
    pub fn get_all_command_names(&self) -> Vec<String> {
        let mut names = Vec::new();

        for cmd in self.visible() {
            names.push(cmd.name.to_string());
            for subcmd in cmd.subcommands.iter().filter(|sub| !sub.hide_in_help) {
                names.push(format!("{} {}", cmd.name, subcmd.name));
            }
        }

        names
    }

    pub fn find_command(&self, search_name: &str) -> Option<CommandInfo<'a>> {
        let needle = search_name.trim().to_ascii_lowercase();
        let matches = |cmd: &Command, name: &str| {
            cmd.name.eq_ignore_ascii_case(name)
                || cmd.aliases.iter().any(|alias| alias.eq_ignore_ascii_case(name))
        };

        if let Some((parent, child)) = needle.split_once(' ') {
            return self.visible().filter(|cmd| matches(cmd, parent)).find_map(|cmd| {
                cmd.subcommands
                    .iter()
                    .find(|sub| !sub.hide_in_help && matches(sub, child.trim()))
                    .map(|sub| CommandInfo {
                        command: cmd,
                        subcommand: Some(sub),
                    })
            });
        }

        if let Some(cmd) = self.visible().find(|cmd| matches(cmd, &needle)) {
            return Some(CommandInfo {
                command: cmd,
                subcommand: None,
            });
        }

        self.visible().find_map(|cmd| {
            cmd.subcommands
                .iter()
                .find(|sub| !sub.hide_in_help && matches(sub, &needle))
                .map(|sub| CommandInfo {
                    command: cmd,
                    subcommand: Some(sub),
                })
        })
    }
}
