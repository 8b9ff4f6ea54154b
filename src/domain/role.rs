use std::fmt;

/// Actor classification returned by the backend at login.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Patient,
    Department,
    Admin,
    Casual,
    Electrician,
    MaintenanceManager,
    Mechanical,
    Technician,
    Requester,
}

impl Role {
    pub const ALL: [Role; 9] = [
        Role::Patient,
        Role::Department,
        Role::Admin,
        Role::Casual,
        Role::Electrician,
        Role::MaintenanceManager,
        Role::Mechanical,
        Role::Technician,
        Role::Requester,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Patient => "patient",
            Role::Department => "department",
            Role::Admin => "admin",
            Role::Casual => "casual",
            Role::Electrician => "electrician",
            Role::MaintenanceManager => "maintenance_manager",
            Role::Mechanical => "mechanical",
            Role::Technician => "technician",
            Role::Requester => "requester",
        }
    }

    pub fn from_tag(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "patient" => Some(Role::Patient),
            "department" => Some(Role::Department),
            "admin" => Some(Role::Admin),
            "casual" => Some(Role::Casual),
            "electrician" => Some(Role::Electrician),
            "maintenance_manager" => Some(Role::MaintenanceManager),
            "mechanical" => Some(Role::Mechanical),
            "technician" => Some(Role::Technician),
            "requester" => Some(Role::Requester),
            _ => None,
        }
    }

    pub fn dashboard(&self) -> DashboardKind {
        match self {
            Role::Patient => DashboardKind::Patient,
            Role::Department | Role::Requester => DashboardKind::Department,
            Role::Admin => DashboardKind::Admin,
            Role::Casual | Role::Technician => DashboardKind::Casual,
            Role::Electrician => DashboardKind::Electrician,
            Role::Mechanical => DashboardKind::Mechanical,
            Role::MaintenanceManager => DashboardKind::Maintenance,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The page composition mounted after login.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardKind {
    Patient,
    Department,
    Admin,
    Casual,
    Electrician,
    Mechanical,
    Maintenance,
}

impl DashboardKind {
    pub fn route(&self) -> &'static str {
        match self {
            DashboardKind::Patient => "/patient",
            DashboardKind::Department => "/department",
            DashboardKind::Admin => "/admin",
            DashboardKind::Casual => "/casual",
            DashboardKind::Electrician => "/electrician",
            DashboardKind::Mechanical => "/mechanical",
            DashboardKind::Maintenance => "/maintenance",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            DashboardKind::Patient => "Patient Dashboard",
            DashboardKind::Department => "Department Maintenance Requests",
            DashboardKind::Admin => "Administration",
            DashboardKind::Casual => "Casual Workers",
            DashboardKind::Electrician => "Electrical Maintenance",
            DashboardKind::Mechanical => "Mechanical Maintenance",
            DashboardKind::Maintenance => "Maintenance Management",
        }
    }

    pub fn loads_workers(&self) -> bool {
        matches!(
            self,
            DashboardKind::Admin | DashboardKind::Casual | DashboardKind::Maintenance
        )
    }
}
