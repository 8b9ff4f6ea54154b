use crate::domain::ticket::{StatusFilter, TicketId};
use crate::error::{AppError, AppResult};

pub const HELP: &str = "\
Commands:
  menu                 show the sidebar
  select <id>          open a menu entry (dropdowns toggle)
  toggle <id>          expand or collapse a dropdown
  list                 show tickets after filter and search
  filter <status|all>  filter by open, in_progress or closed
  search [term]        narrow by title, description or id
  create               fill in and submit the ticket form
  draft                edit the form and keep it for later
  advance <id>         apply the action offered on a ticket
  refresh              reload everything on this dashboard
  profile              show the patient profile
  workers              show the worker roster
  add-worker           add someone to the roster
  stats                show system statistics
  status               ask the server who is signed in
  logout               sign out and return to login
  quit                 leave without signing out";

/// One line typed at the dashboard prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Help,
    Menu,
    Select(String),
    Toggle(String),
    List,
    Filter(StatusFilter),
    Search(String),
    Create,
    Draft,
    Advance(TicketId),
    Refresh,
    Profile,
    Workers,
    AddWorker,
    Stats,
    Status,
    Logout,
    Quit,
}

impl ShellCommand {
    /// `Ok(None)` for a blank line.
    pub fn parse(line: &str) -> AppResult<Option<Self>> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_lowercase().as_str() {
            "help" | "?" => ShellCommand::Help,
            "menu" => ShellCommand::Menu,
            "select" | "open" => ShellCommand::Select(required(word, rest, "menu id")?),
            "toggle" => ShellCommand::Toggle(required(word, rest, "menu id")?),
            "list" | "ls" => ShellCommand::List,
            "filter" => {
                let value = required(word, rest, "status")?;
                let filter = StatusFilter::from_str(&value).ok_or_else(|| {
                    AppError::Validation(format!(
                        "unknown status '{value}' (use all, open, in_progress or closed)"
                    ))
                })?;
                ShellCommand::Filter(filter)
            }
            "search" => ShellCommand::Search(rest.to_string()),
            "create" | "new" => ShellCommand::Create,
            "draft" => ShellCommand::Draft,
            "advance" => ShellCommand::Advance(TicketId::new(
                required(word, rest, "ticket id")?.trim_start_matches('#'),
            )),
            "refresh" => ShellCommand::Refresh,
            "profile" => ShellCommand::Profile,
            "workers" => ShellCommand::Workers,
            "add-worker" => ShellCommand::AddWorker,
            "stats" => ShellCommand::Stats,
            "status" | "whoami" => ShellCommand::Status,
            "logout" => ShellCommand::Logout,
            "quit" | "exit" => ShellCommand::Quit,
            other => {
                return Err(AppError::Validation(format!(
                    "unknown command '{other}'; type 'help' for a list"
                )));
            }
        };
        Ok(Some(command))
    }
}

fn required(word: &str, rest: &str, what: &str) -> AppResult<String> {
    if rest.is_empty() {
        return Err(AppError::Validation(format!("usage: {word} <{what}>")));
    }
    Ok(rest.to_string())
}
