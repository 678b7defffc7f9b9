//! Shell completion generation.

use std::io;

use clap::CommandFactory;
use clap_complete::{Generator, generate, shells};

use crate::cli::{Cli, CompletionsArgs, Shell};

const BIN_NAME: &str = "r3";

pub fn execute(args: CompletionsArgs) -> crate::error::CliResult<()> {
    let mut out = io::stdout();
    match args.shell {
        Shell::Bash => write_to(shells::Bash, &mut out),
        Shell::Zsh => write_to(shells::Zsh, &mut out),
        Shell::Fish => write_to(shells::Fish, &mut out),
        Shell::PowerShell => write_to(shells::PowerShell, &mut out),
        Shell::Elvish => write_to(shells::Elvish, &mut out),
    }
    Ok(())
}

fn write_to<G: Generator>(shell: G, out: &mut dyn io::Write) {
    generate(shell, &mut Cli::command(), BIN_NAME, out);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bash_script_names_subcommands() {
        let mut buf = Vec::new();
        write_to(shells::Bash, &mut buf);
        let script = String::from_utf8(buf).unwrap();
        assert!(script.contains("_r3()"));
        assert!(script.contains("list-templates"));
    }
}
