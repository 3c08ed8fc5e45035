// src/modules/session/controller.rs
use std::io;

use log::info;

use super::commands::{
    guest_menu, member_menu, parse_guest_command, parse_member_command, render_menu,
    GuestCommand, MemberCommand,
};
use super::state::Session;
use crate::modules::catalog::{find_by_number, format_catalog};
use crate::modules::error::TourError;
use crate::modules::storage::{LoadSource, PersistentStore};
use crate::modules::utils::io::{prompt, prompt_password, prompt_with_confirmation, Console};
use crate::modules::utils::money::format_amount;

/// Result of one menu turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flow {
    Continue(Session),
    Exit,
}

/// Message to show before the first menu, if the load was not routine
pub fn startup_notice(source: &LoadSource) -> Option<String> {
    match source {
        LoadSource::Fresh | LoadSource::DataFile => None,
        LoadSource::LegacyImport => {
            Some("Imported existing accounts from the old users file.".to_string())
        }
        LoadSource::Degraded { reason, moved_to } => {
            let mut notice = format!("Warning: could not read saved data ({}).", reason);
            if let Some(path) = moved_to {
                notice.push_str(&format!(" The old file was moved to {}.", path.display()));
            }
            notice.push_str(" Starting with no users.");
            Some(notice)
        }
    }
}

/// Drives the menus: reads a choice, runs it against the store and hands
/// back the session for the next turn
pub struct SessionController<C: Console> {
    db: PersistentStore,
    console: C,
}

impl<C: Console> SessionController<C> {
    pub fn new(db: PersistentStore, console: C) -> Self {
        Self { db, console }
    }

    pub fn db(&self) -> &PersistentStore {
        &self.db
    }

    pub fn console(&self) -> &C {
        &self.console
    }

    /// Loop until the user exits or input runs out
    pub fn run(&mut self) -> io::Result<()> {
        let mut session = Session::Anonymous;
        loop {
            let flow = match &session {
                Session::Anonymous => self.guest_turn()?,
                Session::Authenticated(username) => {
                    let username = username.clone();
                    self.member_turn(&username)?
                }
            };
            match flow {
                Flow::Continue(next) => session = next,
                Flow::Exit => break,
            }
        }
        info!("Session ended");
        Ok(())
    }

    fn say(&mut self, text: &str) {
        self.console.println(text);
    }

    fn report(&mut self, error: &TourError) {
        self.say(&format!("\nError: {}", error));
    }

    fn goodbye(&mut self) -> Flow {
        self.say("\nGoodbye!");
        Flow::Exit
    }

    /// One turn of the logged-out menu
    pub fn guest_turn(&mut self) -> io::Result<Flow> {
        let menu = render_menu(&guest_menu());
        self.say("\n=== Welcome to Tourbook ===");
        self.console.print(&menu);

        let choice = match prompt(&mut self.console, "\nEnter your choice: ")? {
            Some(choice) => choice,
            None => return Ok(self.goodbye()),
        };

        match parse_guest_command(&choice) {
            Some(GuestCommand::Register) => self.handle_register(),
            Some(GuestCommand::Login) => self.handle_login(),
            Some(GuestCommand::Catalog) => {
                self.show_catalog();
                Ok(Flow::Continue(Session::Anonymous))
            }
            Some(GuestCommand::Exit) => Ok(self.goodbye()),
            None => {
                self.say("\nInvalid choice. Please select a number or command from the menu.");
                Ok(Flow::Continue(Session::Anonymous))
            }
        }
    }

    /// One turn of the logged-in menu for `username`
    pub fn member_turn(&mut self, username: &str) -> io::Result<Flow> {
        let stay = Flow::Continue(Session::Authenticated(username.to_string()));
        if self.db.find_by_username(username).is_none() {
            self.say("\nSession error: user no longer exists. Please log in again.");
            return Ok(Flow::Continue(Session::Anonymous));
        }

        let menu = render_menu(&member_menu());
        self.say(&format!("\nWelcome {}!", username));
        self.console.print(&menu);

        let choice = match prompt(&mut self.console, "\nEnter your choice: ")? {
            Some(choice) => choice,
            None => return Ok(self.goodbye()),
        };

        match parse_member_command(&choice) {
            Some(MemberCommand::Book) => self.handle_booking(username).map(|_| stay),
            Some(MemberCommand::Total) => {
                self.handle_total(username);
                Ok(stay)
            }
            Some(MemberCommand::Cancel) => {
                self.handle_cancel(username);
                Ok(stay)
            }
            Some(MemberCommand::Password) => self.handle_password_change(username).map(|_| stay),
            Some(MemberCommand::Logout) => {
                self.say("\nYou have been successfully logged out.");
                let session = Session::Authenticated(username.to_string()).logout();
                Ok(Flow::Continue(session))
            }
            Some(MemberCommand::Catalog) => {
                self.show_catalog();
                Ok(stay)
            }
            Some(MemberCommand::Exit) => Ok(self.goodbye()),
            None => {
                self.say("\nInvalid choice! Please try again.");
                Ok(stay)
            }
        }
    }

    fn show_catalog(&mut self) {
        self.say("\nTOUR PACKAGES\n");
        self.say(&format_catalog());
    }

    fn handle_register(&mut self) -> io::Result<Flow> {
        let Some(username) = prompt(&mut self.console, "\nEnter new username: ")? else {
            return Ok(self.goodbye());
        };
        // Check the name before asking for a password
        if let Err(e) = self.db.check_username_available(&username) {
            self.report(&e);
            return Ok(Flow::Continue(Session::Anonymous));
        }
        let Some(password) = prompt_password(&mut self.console, "Enter new password: ")? else {
            return Ok(self.goodbye());
        };

        match self.db.register(&username, &password) {
            Ok(()) => self.say("\nUser account created successfully! Please log in."),
            Err(e) => self.report(&e),
        }
        // Registration never logs the new user in
        Ok(Flow::Continue(Session::Anonymous))
    }

    fn handle_login(&mut self) -> io::Result<Flow> {
        let Some(username) = prompt(&mut self.console, "\nEnter username: ")? else {
            return Ok(self.goodbye());
        };
        let Some(password) = prompt_password(&mut self.console, "Enter password: ")? else {
            return Ok(self.goodbye());
        };

        match Session::login(&self.db, &username, &password) {
            Ok(session) => {
                self.say("\nLogin successful!");
                Ok(Flow::Continue(session))
            }
            Err(TourError::WrongPassword) => {
                self.say("\nWrong password! Access denied.");
                Ok(Flow::Continue(Session::Anonymous))
            }
            Err(TourError::UserNotFound(_)) => {
                self.say("\nUser not found! Please register first.");
                Ok(Flow::Continue(Session::Anonymous))
            }
            Err(e) => {
                self.report(&e);
                Ok(Flow::Continue(Session::Anonymous))
            }
        }
    }

    fn handle_booking(&mut self, username: &str) -> io::Result<()> {
        let already_booked = self
            .db
            .find_by_username(username)
            .map_or(false, |record| record.booking.is_some());
        if already_booked {
            self.report(&TourError::AlreadyBooked);
            return Ok(());
        }

        self.show_catalog();
        let Some(code) = prompt(&mut self.console, "\nEnter the tour code number: ")? else {
            return Ok(());
        };
        let tour_number = match code.parse::<i64>() {
            Ok(number) => number,
            Err(_) => {
                self.say(&format!("\nInvalid tour code number entered: '{}'", code));
                return Ok(());
            }
        };
        let Some(tour) = find_by_number(tour_number) else {
            self.report(&TourError::InvalidTourIndex(tour_number));
            return Ok(());
        };

        let question = format!(
            "\nBook {} at {} per ticket?",
            tour.destination,
            format_amount(tour.price)
        );
        if !prompt_with_confirmation(&mut self.console, &question)? {
            self.say("\nBooking not confirmed. Nothing was changed.");
            return Ok(());
        }

        let Some(count) = prompt(&mut self.console, "\nEnter the number of tickets for booking: ")?
        else {
            return Ok(());
        };
        let tickets = match count.parse::<i64>() {
            Ok(tickets) => tickets,
            Err(_) => {
                self.say(&format!("\nInvalid number of tickets: '{}'", count));
                return Ok(());
            }
        };

        match self.db.book(username, tour_number, tickets) {
            Ok(booking) => self.say(&format!(
                "\nBooking completed successfully! {} ticket(s) to {} for a total of {}.",
                booking.tickets,
                booking.place,
                format_amount(booking.total_cost())
            )),
            Err(e) => self.report(&e),
        }
        Ok(())
    }

    fn handle_total(&mut self, username: &str) {
        let summary = self.db.find_by_username(username).and_then(|record| {
            record
                .booking
                .as_ref()
                .map(|booking| (booking.tickets, booking.total_cost(), booking.place.clone()))
        });

        match summary {
            Some((tickets, total, place)) => self.say(&format!(
                "\n{} ticket(s) booked for a total of {} for destination {}.",
                tickets,
                format_amount(total),
                place
            )),
            None => self.say("\nNo ticket booked!"),
        }
    }

    fn handle_cancel(&mut self, username: &str) {
        let details = self
            .db
            .find_by_username(username)
            .map(|record| (record.booked_place().to_string(), record.ticket_count()));

        match self.db.cancel(username) {
            Ok(refund) => {
                let (place, tickets) = details.unwrap_or_default();
                self.say(&format!(
                    "\nYour booking for {} ({} ticket(s)) has been cancelled. A refund of {} will be processed.",
                    place,
                    tickets,
                    format_amount(refund)
                ));
            }
            Err(TourError::NoActiveBooking) => self.say("\nNo tour has been booked to cancel!"),
            Err(e) => self.report(&e),
        }
    }

    fn handle_password_change(&mut self, username: &str) -> io::Result<()> {
        let Some(current) =
            prompt_password(&mut self.console, "\nEnter your current password to continue: ")?
        else {
            return Ok(());
        };
        if self.db.verify_current_password(username, &current).is_err() {
            self.say("\nIncorrect password provided. Password was not changed.");
            return Ok(());
        }

        let Some(new_password) = prompt_password(&mut self.console, "Enter your new password: ")?
        else {
            return Ok(());
        };
        match self.db.change_password(username, &current, &new_password) {
            Ok(()) => self.say("\nPassword updated successfully!"),
            Err(e) => self.report(&e),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::config::AppConfig;
    use crate::modules::storage::load_user_store;
    use crate::modules::utils::io::ScriptedConsole;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn run_script(lines: &[&str]) -> (TempDir, AppConfig, SessionController<ScriptedConsole>) {
        let dir = TempDir::new().unwrap();
        let config = AppConfig::in_dir(dir.path());
        let (db, _) = PersistentStore::open(&config);
        let mut controller = SessionController::new(db, ScriptedConsole::new(lines));
        controller.run().unwrap();
        (dir, config, controller)
    }

    #[test]
    fn test_register_does_not_log_in() {
        let (_dir, config, controller) = run_script(&["1", "alice", "pw1", "exit"]);
        let output = &controller.console().output;
        assert!(output.contains("User account created successfully!"));
        assert!(!output.contains("Welcome alice!"));
        assert!(output.contains("Goodbye!"));

        let (store, _) = load_user_store(&config).unwrap();
        assert_eq!(store.find_by_username("alice").unwrap().password, "pw1");
    }

    #[test]
    fn test_duplicate_registration_message() {
        let (_dir, _config, controller) =
            run_script(&["register", "bob", "pw2", "register", "bob", "exit"]);
        let output = &controller.console().output;
        assert!(output.contains("Username 'bob' already exists"));
        assert_eq!(controller.db().store().len(), 1);
    }

    #[test]
    fn test_login_failures_are_distinct() {
        let (_dir, _config, controller) = run_script(&[
            "1", "alice", "pw1", // register
            "2", "alice", "bad", // wrong password
            "2", "zed", "pw1", // unknown user
            "4",
        ]);
        let output = &controller.console().output;
        assert!(output.contains("Wrong password! Access denied."));
        assert!(output.contains("User not found! Please register first."));
        assert!(!output.contains("Login successful!"));
    }

    #[test]
    fn test_full_booking_session() {
        let (_dir, config, controller) = run_script(&[
            "1", "alice", "pw1", // register
            "2", "alice", "pw1", // login
            "book", "3", "y", "2", // Bangkok, 2 tickets
            "total",
            "book", // already booked
            "cancel",
            "cancel", // nothing left
            "1", "3", "y", "2", // book again
            "logout",
            "exit",
        ]);
        let output = &controller.console().output;

        assert!(output.contains("Login successful!"));
        assert!(output.contains("Welcome alice!"));
        assert!(output.contains(
            "Booking completed successfully! 2 ticket(s) to Bangkok, Thailand for a total of Rs 500000."
        ));
        assert!(output.contains(
            "2 ticket(s) booked for a total of Rs 500000 for destination Bangkok, Thailand."
        ));
        assert!(output.contains("You already have an active booking"));
        assert!(output.contains(
            "Your booking for Bangkok, Thailand (2 ticket(s)) has been cancelled. A refund of Rs 500000 will be processed."
        ));
        assert!(output.contains("No tour has been booked to cancel!"));
        assert!(output.contains("You have been successfully logged out."));

        let (store, _) = load_user_store(&config).unwrap();
        let alice = store.find_by_username("alice").unwrap();
        assert_eq!(alice.booked_place(), "Bangkok, Thailand");
        assert_eq!(alice.ticket_count(), 2);
    }

    #[test]
    fn test_booking_rejections() {
        let (_dir, _config, controller) = run_script(&[
            "1", "dave", "pw", "2", "dave", "pw",
            "1", "11", // bad tour
            "1", "abc", // not a number
            "1", "5", "n", // declined
            "1", "5", "y", "0", // zero tickets
            "total",
            "7",
        ]);
        let output = &controller.console().output;
        assert!(output.contains("Invalid tour code number: 11"));
        assert!(output.contains("Invalid tour code number entered: 'abc'"));
        assert!(output.contains("Booking not confirmed. Nothing was changed."));
        assert!(output.contains("Number of tickets must be at least 1"));
        assert!(output.contains("No ticket booked!"));
        assert!(controller.db().find_by_username("dave").unwrap().booking.is_none());
    }

    #[test]
    fn test_password_change_flow() {
        let (_dir, config, controller) = run_script(&[
            "1", "carol", "old", "2", "carol", "old",
            "password", "wrong", // rejected
            "4", "old", "new", // accepted
            "logout",
            "2", "carol", "old", // old password no longer works
            "2", "carol", "new",
            "exit",
        ]);
        let output = &controller.console().output;
        assert!(output.contains("Incorrect password provided. Password was not changed."));
        assert!(output.contains("Password updated successfully!"));
        assert!(output.contains("Wrong password! Access denied."));
        assert_eq!(output.matches("Login successful!").count(), 2);

        let (store, _) = load_user_store(&config).unwrap();
        assert_eq!(store.find_by_username("carol").unwrap().password, "new");
    }

    #[test]
    fn test_catalog_and_invalid_choices() {
        let (_dir, _config, controller) = run_script(&["3", "9", "catalog"]);
        let output = &controller.console().output;
        assert_eq!(output.matches("TOUR PACKAGES").count(), 2);
        assert!(output.contains("10. Gilgit, Pakistan"));
        assert!(output.contains("Invalid choice."));
        // Running out of input ends the session
        assert!(output.ends_with("Goodbye!\n"));
    }

    #[test]
    fn test_unreadable_line_returns_to_menu() {
        let dir = TempDir::new().unwrap();
        let config = AppConfig::in_dir(dir.path());
        let (db, _) = PersistentStore::open(&config);
        let script = vec![
            Ok("1".to_string()),
            Ok("alice".to_string()),
            Ok("pw1".to_string()),
            Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "stream did not contain valid UTF-8",
            )),
            Ok("3".to_string()),
            Ok("4".to_string()),
        ];
        let mut controller = SessionController::new(db, ScriptedConsole::from_results(script));

        assert!(controller.run().is_ok());
        let output = &controller.console().output;
        assert!(output.contains("User account created successfully!"));
        assert!(output.contains("Invalid choice."));
        assert!(output.contains("TOUR PACKAGES"));
        assert!(output.ends_with("Goodbye!\n"));
    }

    #[test]
    fn test_startup_notices() {
        assert_eq!(startup_notice(&LoadSource::Fresh), None);
        assert_eq!(startup_notice(&LoadSource::DataFile), None);
        assert!(startup_notice(&LoadSource::LegacyImport).is_some());

        let notice = startup_notice(&LoadSource::Degraded {
            reason: "bad line".to_string(),
            moved_to: Some(PathBuf::from("users.jsonl.corrupt-1")),
        })
        .unwrap();
        assert!(notice.contains("bad line"));
        assert!(notice.contains("users.jsonl.corrupt-1"));
        assert!(notice.ends_with("Starting with no users."));
    }
}
