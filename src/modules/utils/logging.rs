use env_logger::{Builder, WriteStyle};
use log::{info, log, Level, LevelFilter};
use std::fs::OpenOptions;
use std::path::Path;

/// Initialize the logging system, appending to the given log file
pub fn initialize_logging(log_file: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)?;

    Builder::new()
        .filter_level(LevelFilter::Info)
        .format_timestamp_secs()
        .format_module_path(true)
        .write_style(WriteStyle::Never)
        // The console belongs to the menus, so logs only go to the file
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()?;

    info!("Logging system initialized");
    Ok(())
}

/// Mask all but the first and last two characters
fn format_sensitive(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..2].iter().collect();
    let tail: String = chars[chars.len() - 2..].iter().collect();
    format!("{}***{}", head, tail)
}

/// One audit line: `<kind> op=.. user=.. [resource=..] ok|failed (<details>) at <time>`
fn audit_line(
    kind: &str,
    operation: &str,
    user: &str,
    resource: Option<&str>,
    success: bool,
    details: Option<&str>,
) -> String {
    let mut line = format!("{} op={} user={}", kind, operation, format_sensitive(user));
    if let Some(resource) = resource {
        line.push_str(&format!(" resource={}", resource));
    }
    line.push_str(if success { " ok" } else { " failed" });
    if let Some(details) = details {
        line.push_str(&format!(" ({})", details));
    }
    line.push_str(&format!(
        " at {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    ));
    line
}

/// Record a login, logout, registration or password change
pub fn log_auth_event(event_type: &str, username: &str, success: bool, details: Option<&str>) {
    let level = if success { Level::Info } else { Level::Warn };
    log!(level, "{}", audit_line("auth", event_type, username, None, success, details));
}

/// Record a booking change or a load/save of the data file
pub fn log_data_operation(
    operation: &str,
    user: &str,
    resource: &str,
    success: bool,
    details: Option<&str>,
) {
    let level = if success { Level::Info } else { Level::Error };
    log!(
        level,
        "{}",
        audit_line("data", operation, user, Some(resource), success, details)
    );
}
