//! CLI usage text shown when the command or repository is missing.

use crate::dispatch::WikiCommand;

pub fn usage_text() -> String {
    let commands: Vec<&str> = WikiCommand::ALL.iter().map(|c| c.as_str()).collect();
    format!(
        "Usage: deepwiki [options] <command> <owner/repo> [args]\n\
         Commands: {}\n\
         \n\
         Examples:\n  \
         deepwiki structure facebook/react\n  \
         deepwiki contents facebook/react Overview\n  \
         deepwiki ask facebook/react how does reconciliation work\n\
         \n\
         Run 'deepwiki --help' for options.",
        commands.join(", ")
    )
}
