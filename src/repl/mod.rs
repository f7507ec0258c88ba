//! Interactive chat session
//!
//! Rustyline-driven read-eval-print loop around the agent, with a small
//! built-in command set. Slash commands are handled locally; anything else
//! goes to the model.

use crate::agent::Agent;
use crate::errors::{AgentError, Result};
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

/// Local commands recognized by the session
#[derive(Debug, PartialEq, Eq)]
enum Command {
    Quit,
    Clear,
    Summarize,
    Help,
    Unknown,
}

fn parse_command(line: &str) -> Option<Command> {
    if !line.starts_with('/') {
        return None;
    }
    Some(match line.trim().to_lowercase().as_str() {
        "/quit" | "/exit" | "/bye" => Command::Quit,
        "/clear" => Command::Clear,
        "/summarize" => Command::Summarize,
        "/help" => Command::Help,
        _ => Command::Unknown,
    })
}

/// Interactive session over an agent
pub struct Repl {
    editor: DefaultEditor,
    agent: Agent,
    agent_name: String,
    user_id: String,
}

impl Repl {
    pub fn new(agent: Agent, agent_name: &str, user_id: &str) -> Result<Self> {
        let editor = DefaultEditor::new()
            .map_err(|e| AgentError::Generic(format!("failed to init line editor: {}", e)))?;
        Ok(Self {
            editor,
            agent,
            agent_name: agent_name.to_string(),
            user_id: user_id.to_string(),
        })
    }

    /// Run until the user quits or input closes
    pub async fn run(&mut self) -> Result<()> {
        println!(
            "{}",
            format!(
                "{} is listening. /help for commands, /quit to leave.",
                self.agent_name
            )
            .dimmed()
        );

        loop {
            let line = match self.editor.readline(&"you> ".bold().blue().to_string()) {
                Ok(line) => line,
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
                Err(e) => return Err(AgentError::Generic(format!("input error: {}", e))),
            };

            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let _ = self.editor.add_history_entry(line);

            match parse_command(line) {
                Some(Command::Quit) => break,
                Some(Command::Clear) => {
                    self.agent.clear_history();
                    println!("{}", "history cleared".dimmed());
                }
                Some(Command::Summarize) => {
                    match self.agent.summarize_oldest(4).await {
                        Ok(()) => println!("{}", "history summarized".dimmed()),
                        Err(e) => eprintln!("{}", format!("summarize failed: {}", e).red()),
                    }
                }
                Some(Command::Help) => {
                    println!("/quit /exit /bye  end the session");
                    println!("/clear            forget the conversation history");
                    println!("/summarize        compress old history into a summary");
                }
                Some(Command::Unknown) => {
                    println!("{}", format!("unknown command '{}'", line).yellow());
                }
                None => match self.agent.run(line, &self.user_id).await {
                    Ok(answer) => {
                        println!("{} {}", format!("{}>", self.agent_name).bold().green(), answer);
                    }
                    Err(e) => {
                        eprintln!("{}", format!("error: {}", e).red());
                    }
                },
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quit_aliases() {
        assert_eq!(parse_command("/quit"), Some(Command::Quit));
        assert_eq!(parse_command("/exit"), Some(Command::Quit));
        assert_eq!(parse_command("/bye"), Some(Command::Quit));
        assert_eq!(parse_command("/BYE"), Some(Command::Quit));
    }

    #[test]
    fn test_plain_text_is_not_a_command() {
        assert_eq!(parse_command("hello there"), None);
        assert_eq!(parse_command("what is 2/3?"), None);
    }

    #[test]
    fn test_unknown_slash_command() {
        assert_eq!(parse_command("/dance"), Some(Command::Unknown));
    }
}
