use std::io::{BufRead, Write};

use tracing::debug;

use crate::cache::TicketDraftCache;
use crate::cmd::prompt::{Console, PromptAction};
use crate::cmd::render;
use crate::cmd::shell::{HELP, ShellCommand};
use crate::context::AppContext;
use crate::domain::ticket::{Priority, TicketForm};
use crate::domain::worker::NewWorker;
use crate::error::AppResult;
use crate::services::TicketScope;
use crate::workflow::dashboard::{DashboardShell, ShellOutcome};
use crate::workflow::session::{Route, SignedIn, sign_in};

enum Leave {
    Login,
    Quit,
}

/// Login screen followed by the dashboard, until `quit` or end of input.
pub async fn run<R: BufRead, W: Write>(
    ctx: &AppContext,
    console: &mut Console<R, W>,
    drafts: &mut TicketDraftCache,
    username: Option<String>,
) -> AppResult<()> {
    let mut username = username.or_else(|| ctx.config.username.clone());
    console.say(&format!("Hospital ticketing desk at {}", ctx.config.api_base_url))?;

    loop {
        let Some(session) = prompt_login(ctx, console, &mut username).await? else {
            return Ok(());
        };
        match run_dashboard(ctx, console, drafts, session).await? {
            Leave::Login => console.say("\nSigned out.")?,
            Leave::Quit => return Ok(()),
        }
    }
}

async fn prompt_login<R: BufRead, W: Write>(
    ctx: &AppContext,
    console: &mut Console<R, W>,
    username: &mut Option<String>,
) -> AppResult<Option<SignedIn>> {
    loop {
        let label = match username.as_deref() {
            Some(name) => format!("Username [{name}]: "),
            None => "Username: ".to_string(),
        };
        let Some(input) = console.ask(&label)? else {
            return Ok(None);
        };
        let name = match input.trim() {
            "" => username.clone().unwrap_or_default(),
            typed => {
                *username = Some(typed.to_string());
                typed.to_string()
            }
        };
        let Some(password) = console.ask("Password: ")? else {
            return Ok(None);
        };

        match sign_in(ctx, &name, &password).await {
            Ok(session) => return Ok(Some(session)),
            Err(err) => console.say(&err.to_string())?,
        }
    }
}

async fn run_dashboard<R: BufRead, W: Write>(
    ctx: &AppContext,
    console: &mut Console<R, W>,
    drafts: &mut TicketDraftCache,
    session: SignedIn,
) -> AppResult<Leave> {
    let mut shell = DashboardShell::new(session);
    console.say(&format!(
        "\n== {} ({}) · {} ==",
        shell.kind().title(),
        shell.session().route().path(),
        shell.session().username
    ))?;

    if let ShellOutcome::Navigate(Route::Login) = shell.mount(ctx).await {
        return Ok(Leave::Login);
    }
    console.say(&render::menu(shell.menu.entries(), Some(&shell.menu)))?;
    show_overview(console, &shell)?;
    show_error(console, &shell)?;

    let prompt = format!("{}> ", shell.session().role);
    loop {
        let Some(line) = console.ask(&prompt)? else {
            return Ok(Leave::Quit);
        };
        let command = match ShellCommand::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                console.say(&err.to_string())?;
                continue;
            }
        };
        debug!(?command, "shell command");

        let outcome = match command {
            ShellCommand::Help => {
                console.say(HELP)?;
                ShellOutcome::Stay
            }
            ShellCommand::Menu => {
                console.say(&render::menu(shell.menu.entries(), Some(&shell.menu)))?;
                ShellOutcome::Stay
            }
            ShellCommand::Select(id) => {
                select_entry(console, &mut shell, &id)?;
                ShellOutcome::Stay
            }
            ShellCommand::Toggle(id) => {
                if shell.menu.toggle(&id) {
                    console.say(&render::menu(shell.menu.entries(), Some(&shell.menu)))?;
                } else {
                    console.say(&format!("'{id}' is not a dropdown in this menu"))?;
                }
                ShellOutcome::Stay
            }
            ShellCommand::List => {
                show_tickets(console, &shell)?;
                ShellOutcome::Stay
            }
            ShellCommand::Filter(filter) => {
                if let Some(tickets) = shell.tickets_mut() {
                    tickets.set_filter(filter);
                }
                show_tickets(console, &shell)?;
                ShellOutcome::Stay
            }
            ShellCommand::Search(term) => {
                if let Some(tickets) = shell.tickets_mut() {
                    tickets.set_search(&term);
                }
                show_tickets(console, &shell)?;
                ShellOutcome::Stay
            }
            ShellCommand::Create => submit_ticket(ctx, console, drafts, &mut shell).await?,
            ShellCommand::Draft => {
                save_draft(ctx, console, drafts, &mut shell)?;
                ShellOutcome::Stay
            }
            ShellCommand::Advance(id) => {
                let outcome = shell.advance_ticket(ctx, &id).await;
                if outcome == ShellOutcome::Stay && shell.error().is_none() {
                    show_tickets(console, &shell)?;
                }
                outcome
            }
            ShellCommand::Refresh => {
                let outcome = shell.refresh(ctx).await;
                if outcome == ShellOutcome::Stay {
                    show_overview(console, &shell)?;
                }
                outcome
            }
            ShellCommand::Profile => {
                match shell.profile() {
                    Some(profile) => console.say(&render::profile(profile))?,
                    None => console.say("No profile on this dashboard.")?,
                }
                ShellOutcome::Stay
            }
            ShellCommand::Workers => {
                if shell.kind().loads_workers() {
                    console.say(&render::workers(shell.workers()))?;
                } else {
                    console.say("No worker roster on this dashboard.")?;
                }
                ShellOutcome::Stay
            }
            ShellCommand::AddWorker => {
                let worker = prompt_worker(console)?;
                let outcome = shell.add_worker(ctx, worker).await;
                if outcome == ShellOutcome::Stay && shell.error().is_none() {
                    console.say(&render::workers(shell.workers()))?;
                }
                outcome
            }
            ShellCommand::Stats => {
                match shell.stats() {
                    Some(stats) => console.say(&render::stats(stats))?,
                    None => console.say("No statistics on this dashboard.")?,
                }
                ShellOutcome::Stay
            }
            ShellCommand::Status => {
                let status = ctx.session.status().await;
                if status.authenticated {
                    console.say(&format!(
                        "Signed in as {} ({})",
                        status.username.as_deref().unwrap_or(&shell.session().username),
                        status.role.as_deref().unwrap_or("unknown role")
                    ))?;
                } else {
                    console.say("The server reports no active session.")?;
                }
                ShellOutcome::Stay
            }
            ShellCommand::Logout => shell.logout(ctx).await,
            ShellCommand::Quit => return Ok(Leave::Quit),
        };

        match outcome {
            ShellOutcome::Navigate(Route::Login) => return Ok(Leave::Login),
            ShellOutcome::Navigate(_) | ShellOutcome::Stay => show_error(console, &shell)?,
        }
    }
}

fn select_entry<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    shell: &mut DashboardShell,
    id: &str,
) -> AppResult<()> {
    if let Some(active) = shell.menu.select(id) {
        console.say(&format!("Opened {active}."))?;
        return Ok(());
    }
    let is_dropdown = shell
        .menu
        .entries()
        .iter()
        .any(|entry| entry.id == id && entry.is_dropdown());
    if is_dropdown {
        console.say(&render::menu(shell.menu.entries(), Some(&shell.menu)))?;
    } else {
        console.say(&format!("No menu entry '{id}' here."))?;
    }
    Ok(())
}

fn show_overview<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    shell: &DashboardShell,
) -> AppResult<()> {
    if let Some(profile) = shell.profile() {
        console.say(&render::profile(profile))?;
    }
    if let Some(stats) = shell.stats() {
        console.say(&render::stats(stats))?;
    }
    if shell.tickets().is_some() {
        show_tickets(console, shell)?;
    }
    if shell.kind().loads_workers() {
        console.say(&render::workers(shell.workers()))?;
    }
    Ok(())
}

fn show_tickets<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    shell: &DashboardShell,
) -> AppResult<()> {
    match shell.tickets() {
        Some(tickets) => console.say(&render::ticket_list(tickets)),
        None => console.say("No ticket list on this dashboard."),
    }
}

fn show_error<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    shell: &DashboardShell,
) -> AppResult<()> {
    if let Some(error) = shell.error() {
        console.say(&format!("! {error}"))?;
    }
    Ok(())
}

fn draft_key(ctx: &AppContext, shell: &DashboardShell) -> Option<String> {
    let scope = shell.tickets()?.scope();
    Some(TicketDraftCache::compute_key(
        &ctx.config.api_base_url,
        &shell.session().username,
        scope.label(),
    ))
}

/// Prompts the form fields on top of whatever is in progress or saved.
/// Returns the draft key when this dashboard can raise tickets.
fn edit_form<R: BufRead, W: Write>(
    ctx: &AppContext,
    console: &mut Console<R, W>,
    drafts: &TicketDraftCache,
    shell: &mut DashboardShell,
) -> AppResult<Option<String>> {
    let Some(key) = draft_key(ctx, shell) else {
        return Ok(None);
    };
    let Some(tickets) = shell.tickets_mut() else {
        return Ok(None);
    };
    if !tickets.scope().can_create() {
        return Ok(None);
    }
    let department = matches!(tickets.scope(), TicketScope::Department { .. });

    if tickets.form.is_blank() {
        if let Some(saved) = drafts.get(&key) {
            console.say("Restored your saved draft.")?;
            tickets.form = saved;
        }
    }
    fill_form(console, &mut tickets.form, department)?;
    Ok(Some(key))
}

fn fill_form<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    form: &mut TicketForm,
    department: bool,
) -> AppResult<()> {
    console.apply_text("Title", &mut form.title)?;
    console.apply_text("Description", &mut form.description)?;
    console.apply_text("Category", &mut form.category)?;
    if department {
        console.apply_text("Location details", &mut form.location_details)?;
    } else {
        console.apply_text("Department id", &mut form.department_id)?;
    }

    match console.edit("Priority (low, medium, high, critical)", Some(form.priority.as_str()))? {
        PromptAction::Keep => {}
        PromptAction::Clear => form.priority = Priority::default(),
        PromptAction::Set(value) => match Priority::from_str(&value) {
            Some(priority) => form.priority = priority,
            None => console.say(&format!(
                "Unknown priority '{value}'; keeping {}.",
                form.priority.as_str()
            ))?,
        },
    }
    Ok(())
}

async fn submit_ticket<R: BufRead, W: Write>(
    ctx: &AppContext,
    console: &mut Console<R, W>,
    drafts: &mut TicketDraftCache,
    shell: &mut DashboardShell,
) -> AppResult<ShellOutcome> {
    let key = edit_form(ctx, console, drafts, shell)?;
    let outcome = shell.create_ticket(ctx).await;

    let Some(key) = key else {
        return Ok(outcome);
    };
    let submitted = outcome == ShellOutcome::Stay && shell.error().is_none();
    if submitted {
        if drafts.remove(&key) {
            drafts.save()?;
        }
        console.say("Ticket submitted.")?;
        show_tickets(console, shell)?;
    } else if let Some(tickets) = shell.tickets() {
        drafts.insert(key, &tickets.form);
        drafts.save()?;
        console.say("The form was kept as a draft.")?;
    }
    Ok(outcome)
}

fn save_draft<R: BufRead, W: Write>(
    ctx: &AppContext,
    console: &mut Console<R, W>,
    drafts: &mut TicketDraftCache,
    shell: &mut DashboardShell,
) -> AppResult<()> {
    let Some(key) = edit_form(ctx, console, drafts, shell)? else {
        shell.report("this dashboard cannot raise tickets");
        return Ok(());
    };
    if let Some(tickets) = shell.tickets() {
        drafts.insert(key, &tickets.form);
        drafts.save()?;
        console.say("Draft saved.")?;
    }
    Ok(())
}

fn prompt_worker<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
) -> AppResult<AppResult<NewWorker>> {
    let name = console.ask("Worker name: ")?.unwrap_or_default();
    let task = console.ask("Task (Enter for general maintenance): ")?.unwrap_or_default();
    Ok(NewWorker::new(&name, &task))
}
