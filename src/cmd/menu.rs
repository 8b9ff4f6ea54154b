use crate::cmd::render;
use crate::domain::menu::resolve;
use crate::domain::role::Role;

/// Prints the sidebar a role tag resolves to, fully expanded.
pub fn run(role: &str) {
    let entries = resolve(role);
    if entries.is_empty() {
        let known = Role::ALL.map(|role| role.as_str()).join(", ");
        println!("No menu for role '{role}'. Known roles: {known}");
        return;
    }
    print!("{}", render::menu(entries, None));
}
