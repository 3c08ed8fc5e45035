use clap::Command;

/// Choices offered while nobody is logged in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuestCommand {
    Register,
    Login,
    Catalog,
    Exit,
}

/// Choices offered to a logged-in user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberCommand {
    Book,
    Total,
    Cancel,
    Password,
    Logout,
    Catalog,
    Exit,
}

/// Each entry can be picked by its number (the visible alias) or by name
fn menu_entry(name: &'static str, number: &'static str, about: &'static str) -> Command {
    Command::new(name).visible_alias(number).about(about)
}

fn menu(name: &'static str) -> Command {
    Command::new(name)
        .no_binary_name(true)
        .disable_help_flag(true)
        .disable_help_subcommand(true)
        .disable_version_flag(true)
}

pub fn guest_menu() -> Command {
    menu("guest")
        .subcommand(menu_entry("register", "1", "Register new account"))
        .subcommand(menu_entry("login", "2", "Login"))
        .subcommand(menu_entry("catalog", "3", "Show tour packages"))
        .subcommand(menu_entry("exit", "4", "Exit"))
}

pub fn member_menu() -> Command {
    menu("member")
        .subcommand(menu_entry("book", "1", "Book a tour"))
        .subcommand(menu_entry("total", "2", "Check total"))
        .subcommand(menu_entry("cancel", "3", "Cancel booking"))
        .subcommand(menu_entry("password", "4", "Change password"))
        .subcommand(menu_entry("logout", "5", "Logout"))
        .subcommand(menu_entry("catalog", "6", "Show tour packages"))
        .subcommand(menu_entry("exit", "7", "Exit"))
}

/// Resolve a menu answer to the canonical entry name
fn resolve(menu: Command, input: &str) -> Option<String> {
    let input = input.trim().to_lowercase();
    let args: Vec<&str> = input.split_whitespace().collect();
    if args.len() != 1 {
        return None;
    }
    menu.try_get_matches_from(args)
        .ok()?
        .subcommand_name()
        .map(str::to_string)
}

pub fn parse_guest_command(input: &str) -> Option<GuestCommand> {
    match resolve(guest_menu(), input)?.as_str() {
        "register" => Some(GuestCommand::Register),
        "login" => Some(GuestCommand::Login),
        "catalog" => Some(GuestCommand::Catalog),
        "exit" => Some(GuestCommand::Exit),
        _ => None,
    }
}

pub fn parse_member_command(input: &str) -> Option<MemberCommand> {
    match resolve(member_menu(), input)?.as_str() {
        "book" => Some(MemberCommand::Book),
        "total" => Some(MemberCommand::Total),
        "cancel" => Some(MemberCommand::Cancel),
        "password" => Some(MemberCommand::Password),
        "logout" => Some(MemberCommand::Logout),
        "catalog" => Some(MemberCommand::Catalog),
        "exit" => Some(MemberCommand::Exit),
        _ => None,
    }
}

/// Render a menu as numbered lines, e.g. `1. Login            (or type 'login')`
pub fn render_menu(menu: &Command) -> String {
    let mut text = String::new();
    for entry in menu.get_subcommands() {
        let number = entry.get_visible_aliases().next().unwrap_or("-");
        let about = entry
            .get_about()
            .map(|about| about.to_string())
            .unwrap_or_default();
        let label = format!("{}. {}", number, about);
        text.push_str(&format!("{:<24}(or type '{}')\n", label, entry.get_name()));
    }
    text
}
