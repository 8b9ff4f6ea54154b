use std::collections::HashSet;

use crate::domain::role::Role;

/// A navigation entry. Entries with children render as a dropdown; children
/// are one level deep and never carry children of their own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    pub icon: &'static str,
    pub label: &'static str,
    pub id: &'static str,
    pub children: &'static [MenuEntry],
}

impl MenuEntry {
    const fn leaf(icon: &'static str, label: &'static str, id: &'static str) -> Self {
        Self {
            icon,
            label,
            id,
            children: &[],
        }
    }

    const fn child(label: &'static str, id: &'static str) -> Self {
        Self::leaf("", label, id)
    }

    pub fn is_dropdown(&self) -> bool {
        !self.children.is_empty()
    }
}

const PATIENT_MENU: &[MenuEntry] = &[
    MenuEntry::leaf("👤", "Profile", "profile"),
    MenuEntry::leaf("🎫", "My Tickets", "tickets"),
    MenuEntry::leaf("➕", "Create Ticket", "create"),
];

const DEPARTMENT_MENU: &[MenuEntry] = &[
    MenuEntry::leaf("🏥", "Nursing Dashboard", "dashboard"),
    MenuEntry::leaf("🎫", "Maintenance Requests", "tickets"),
    MenuEntry::leaf("📝", "Report Issue", "raise-issue"),
];

const REQUESTER_MENU: &[MenuEntry] = &[
    MenuEntry::leaf("🏠", "Dashboard", "dashboard"),
    MenuEntry::leaf("🎫", "My Requests", "tickets"),
    MenuEntry::leaf("📝", "Report Issue", "raise-issue"),
];

const ADMIN_MENU: &[MenuEntry] = &[
    MenuEntry::leaf("🏠", "Dashboard", "dashboard"),
    MenuEntry::leaf("🎫", "Tickets", "tickets"),
    MenuEntry::leaf("👷", "Casuals", "casuals"),
    MenuEntry::leaf("📊", "Reports", "reports"),
    MenuEntry::leaf("⚙", "Settings", "settings"),
];

const CASUAL_MENU: &[MenuEntry] = &[
    MenuEntry::leaf("🏠", "Dashboard", "dashboard"),
    MenuEntry::leaf("🎫", "My Tasks", "tasks"),
    MenuEntry::leaf("📝", "Update Status", "update-status"),
];

const TECHNICIAN_MENU: &[MenuEntry] = &[
    MenuEntry::leaf("🏠", "Dashboard", "dashboard"),
    MenuEntry::leaf("🔧", "My Work Orders", "work-orders"),
    MenuEntry::leaf("📝", "Update Status", "update-status"),
];

const ELECTRICIAN_MENU: &[MenuEntry] = &[
    MenuEntry::leaf("🏠", "Dashboard", "dashboard"),
    MenuEntry::leaf("🔧", "Work Orders", "work-orders"),
    MenuEntry::leaf("🛠️", "Preventive Maintenance", "preventive-maintenance"),
    MenuEntry::leaf("⚡", "Generators", "generators"),
    MenuEntry::leaf("🔋", "UPS & Power", "ups-power"),
    MenuEntry::leaf("📦", "Assets", "assets"),
    MenuEntry::leaf("📊", "Reports", "reports"),
    MenuEntry::leaf("⚙️", "Settings", "settings"),
];

const MAINTENANCE_MANAGER_MENU: &[MenuEntry] = &[
    MenuEntry::leaf("🏠", "Dashboard", "dashboard"),
    MenuEntry::leaf("🎫", "All Work Orders", "work-orders"),
    MenuEntry::leaf("👷", "Technicians", "technicians"),
    MenuEntry::leaf("📊", "Reports", "reports"),
];

const EQUIPMENT_INVENTORY: &[MenuEntry] = &[
    MenuEntry::child("Boilers & Steam Systems", "boilers-steam"),
    MenuEntry::child("HVAC & Air Handling Units", "hvac-units"),
    MenuEntry::child("Lifts & Elevators", "lifts-elevators"),
    MenuEntry::child("Medical Gas Systems", "medical-gas"),
    MenuEntry::child("Kitchen & Laundry Equipment", "kitchen-laundry"),
    MenuEntry::child("Plumbing & Pumps", "plumbing-pumps"),
];

const MECHANICAL_MENU: &[MenuEntry] = &[
    MenuEntry::leaf("🏠", "Dashboard", "dashboard"),
    MenuEntry::leaf("🛠️", "Preventive Maintenance", "preventive-maintenance"),
    MenuEntry::leaf("📋", "Work Orders", "work-orders"),
    MenuEntry {
        icon: "📦",
        label: "Equipment Inventory",
        id: "equipment-inventory",
        children: EQUIPMENT_INVENTORY,
    },
    MenuEntry::leaf("📊", "Reports & Analytics", "reports"),
    MenuEntry::leaf("👷", "Team Assignments", "team-assignments"),
    MenuEntry::leaf("⚙️", "Settings", "settings"),
];

pub fn menu_for(role: Role) -> &'static [MenuEntry] {
    match role {
        Role::Patient => PATIENT_MENU,
        Role::Department => DEPARTMENT_MENU,
        Role::Requester => REQUESTER_MENU,
        Role::Admin => ADMIN_MENU,
        Role::Casual => CASUAL_MENU,
        Role::Technician => TECHNICIAN_MENU,
        Role::Electrician => ELECTRICIAN_MENU,
        Role::MaintenanceManager => MAINTENANCE_MANAGER_MENU,
        Role::Mechanical => MECHANICAL_MENU,
    }
}

/// Resolves a raw role tag. Unknown tags get an empty menu.
pub fn resolve(tag: &str) -> &'static [MenuEntry] {
    Role::from_tag(tag).map(menu_for).unwrap_or(&[])
}

/// Per-session navigation state layered over a resolved menu.
#[derive(Debug, Clone)]
pub struct MenuState {
    entries: &'static [MenuEntry],
    expanded: HashSet<&'static str>,
    active: Option<&'static str>,
}

impl MenuState {
    pub fn new(role: Role) -> Self {
        Self::over(menu_for(role))
    }

    fn over(entries: &'static [MenuEntry]) -> Self {
        Self {
            entries,
            expanded: HashSet::new(),
            active: entries.first().map(|entry| entry.id),
        }
    }

    pub fn entries(&self) -> &'static [MenuEntry] {
        self.entries
    }

    pub fn active(&self) -> Option<&'static str> {
        self.active
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.expanded.contains(id)
    }

    /// Flips one dropdown open or closed. Returns false when `id` is not a
    /// dropdown of this menu.
    pub fn toggle(&mut self, id: &str) -> bool {
        let Some(entry) = self
            .entries
            .iter()
            .find(|entry| entry.id == id && entry.is_dropdown())
        else {
            return false;
        };
        if !self.expanded.remove(entry.id) {
            self.expanded.insert(entry.id);
        }
        true
    }

    /// Selecting a dropdown toggles it; selecting a leaf makes it active and
    /// returns its id for the hosting shell. Children are only selectable
    /// while their parent is expanded.
    pub fn select(&mut self, id: &str) -> Option<&'static str> {
        for entry in self.entries {
            if entry.id == id {
                if entry.is_dropdown() {
                    self.toggle(id);
                    return None;
                }
                self.active = Some(entry.id);
                return self.active;
            }
            if self.expanded.contains(entry.id) {
                if let Some(child) = entry.children.iter().find(|child| child.id == id) {
                    self.active = Some(child.id);
                    return self.active;
                }
            }
        }
        None
    }
}
