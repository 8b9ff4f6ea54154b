use std::fmt::Write;

use crate::domain::menu::{MenuEntry, MenuState};
use crate::domain::profile::PatientProfile;
use crate::domain::stats::AdminStats;
use crate::domain::ticket::{StatusFilter, Ticket};
use crate::domain::worker::Worker;
use crate::workflow::tickets::{TicketViewModel, TransitionAction};

pub fn menu(entries: &[MenuEntry], state: Option<&MenuState>) -> String {
    let mut out = String::new();
    for entry in entries {
        let marker = match state {
            Some(state) if state.active() == Some(entry.id) => '>',
            _ => ' ',
        };
        let arrow = match (entry.is_dropdown(), state) {
            (true, Some(state)) if state.is_expanded(entry.id) => " ▲",
            (true, _) => " ▼",
            (false, _) => "",
        };
        let _ = writeln!(
            out,
            "{marker} {} {} ({}){arrow}",
            entry.icon, entry.label, entry.id
        );

        let expanded = state.is_none_or(|state| state.is_expanded(entry.id));
        if entry.is_dropdown() && expanded {
            for child in entry.children {
                let marker = match state {
                    Some(state) if state.active() == Some(child.id) => '>',
                    _ => ' ',
                };
                let _ = writeln!(out, "{marker}     • {} ({})", child.label, child.id);
            }
        }
    }
    out
}

pub fn ticket_card(ticket: &Ticket, action: Option<TransitionAction>) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "#{} [{}] {} ({})",
        ticket.id,
        ticket.status.label(),
        ticket.title,
        ticket.priority.as_str()
    );
    if !ticket.description.is_empty() {
        let _ = writeln!(out, "    {}", ticket.description);
    }

    let mut meta = Vec::new();
    if let Some(category) = &ticket.category {
        meta.push(category.clone());
    }
    if let Some(department) = ticket.department_label() {
        meta.push(format!("dept {department}"));
    }
    if let Some(location) = &ticket.location_details {
        meta.push(format!("at {location}"));
    }
    if let Some(date) = ticket.created_on() {
        meta.push(date.format("%Y-%m-%d").to_string());
    }
    if let Some(assignee) = &ticket.assigned_to {
        meta.push(format!("assigned to {assignee}"));
    }
    if !meta.is_empty() {
        let _ = writeln!(out, "    {}", meta.join(" · "));
    }
    if let Some(action) = action {
        let _ = writeln!(out, "    [{}] advance {}", action.label(), ticket.id);
    }
    out
}

pub fn ticket_list(model: &TicketViewModel) -> String {
    let visible = model.visible();
    let filter = match model.filter() {
        StatusFilter::All => "all",
        StatusFilter::Only(status) => status.label(),
    };
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} of {} tickets (filter: {filter}, search: '{}')",
        visible.len(),
        model.list().len(),
        model.search_term()
    );
    if visible.is_empty() {
        out.push_str("No tickets to show.\n");
    }
    for ticket in visible {
        out.push_str(&ticket_card(ticket, model.action_for(ticket)));
    }
    out
}

pub fn profile(profile: &PatientProfile) -> String {
    let rows = [
        ("Patient id", &profile.id),
        ("Name", &profile.name),
        ("Email", &profile.email),
        ("Phone", &profile.phone),
        ("Medical record", &profile.medical_record_number),
        ("Blood type", &profile.blood_type),
        ("Allergies", &profile.allergies),
        ("Emergency contact", &profile.emergency_contact_name),
        ("Emergency phone", &profile.emergency_contact_phone),
    ];
    let mut out = String::new();
    for (label, value) in rows {
        let _ = writeln!(out, "{label}: {}", value.as_deref().unwrap_or("-"));
    }
    out
}

pub fn stats(stats: &AdminStats) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Tickets: {} total, {} open, {} in progress, {} closed",
        stats.tickets,
        stats.pending,
        stats.in_progress(),
        stats.resolved
    );
    let _ = writeln!(
        out,
        "Patients: {}  Departments: {}  Casual workers: {}",
        stats.patients, stats.departments, stats.casual_workers
    );
    out
}

pub fn workers(workers: &[Worker]) -> String {
    if workers.is_empty() {
        return "No workers on the roster.\n".to_string();
    }
    let mut out = String::new();
    for worker in workers {
        let _ = writeln!(
            out,
            "{:>4}  {}: {}",
            worker.id.as_deref().unwrap_or("-"),
            worker.name,
            worker.task_label()
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::role::Role;
    use crate::domain::ticket::TicketStatus;
    use crate::workflow::tickets::TransitionAction;

    fn department_ticket(status: TicketStatus) -> Ticket {
        serde_json::from_value(serde_json::json!({
            "id": "D-1",
            "title": "Sparking outlet",
            "description": "Ward 3A bed outlet #4",
            "status": status,
            "department": "Nursing",
            "created_at": "2025-10-21T20:40:09Z"
        }))
        .unwrap()
    }

    #[test]
    fn open_ticket_card_offers_only_in_progress() {
        let ticket = department_ticket(TicketStatus::Open);
        let card = ticket_card(
            &ticket,
            Some(TransitionAction {
                to: TicketStatus::InProgress,
            }),
        );
        assert!(card.contains("[Mark In Progress]"));
        assert!(!card.contains("Mark Resolved"));
        assert!(card.contains("dept Nursing"));
        assert!(card.contains("2025-10-21"));
    }

    #[test]
    fn closed_ticket_card_has_no_action() {
        let card = ticket_card(&department_ticket(TicketStatus::Closed), None);
        assert!(card.starts_with("#D-1 [closed] Sparking outlet"));
        assert!(!card.contains("Mark"));
    }

    #[test]
    fn collapsed_dropdown_hides_children() {
        let mut state = MenuState::new(Role::Mechanical);
        let collapsed = menu(state.entries(), Some(&state));
        assert!(collapsed.contains("Equipment Inventory (equipment-inventory) ▼"));
        assert!(!collapsed.contains("hvac-units"));

        state.toggle("equipment-inventory");
        let expanded = menu(state.entries(), Some(&state));
        assert!(expanded.contains("• HVAC & Air Handling Units (hvac-units)"));
    }
}
