use clap::Command;
use log::info;

use tourbook::session::startup_notice;
use tourbook::utils::io::Terminal;
use tourbook::utils::logging::initialize_logging;
use tourbook::{AppConfig, PersistentStore, SessionController};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Only --help and --version; everything else happens in the menus
    Command::new("tourbook")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Register, log in and book one of ten tour packages")
        .get_matches();

    let config = AppConfig::default();

    if let Err(e) = initialize_logging(&config.log_file) {
        eprintln!("Warning: logging disabled: {}", e);
    }

    let (db, source) = PersistentStore::open(&config);
    info!("Loaded {} users from {:?}", db.store().len(), source);
    if let Some(notice) = startup_notice(&source) {
        println!("{}", notice);
    }

    let mut controller = SessionController::new(db, Terminal::new());
    controller.run()?;
    Ok(())
}
