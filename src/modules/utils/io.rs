use std::io::{self, BufRead, IsTerminal, Write};

use log::warn;

/// Line-oriented console the menus talk to. `None` from a read means end of input.
pub trait Console {
    /// Read one answer with surrounding whitespace removed
    fn read_line(&mut self) -> io::Result<Option<String>>;

    /// Read a secret exactly as typed, minus the line ending; implementations
    /// may suppress echo
    fn read_password(&mut self) -> io::Result<Option<String>>;

    fn print(&mut self, text: &str);

    fn println(&mut self, text: &str) {
        self.print(text);
        self.print("\n");
    }
}

/// Drop a trailing `\n` or `\r\n` and nothing else
pub fn strip_line_ending(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

/// Console backed by the process stdin/stdout
pub struct Terminal {
    stdin: io::Stdin,
}

impl Terminal {
    pub fn new() -> Self {
        Self { stdin: io::stdin() }
    }

    /// Bytes that are not UTF-8 are replaced rather than failing the read
    fn read_raw_line(&mut self) -> io::Result<Option<String>> {
        let mut buffer = Vec::new();
        if self.stdin.lock().read_until(b'\n', &mut buffer)? == 0 {
            return Ok(None);
        }
        let text = String::from_utf8_lossy(&buffer);
        Ok(Some(strip_line_ending(&text).to_string()))
    }
}

impl Default for Terminal {
    fn default() -> Self {
        Self::new()
    }
}

impl Console for Terminal {
    fn read_line(&mut self) -> io::Result<Option<String>> {
        Ok(self.read_raw_line()?.map(|line| line.trim().to_string()))
    }

    fn read_password(&mut self) -> io::Result<Option<String>> {
        // Piped input has no tty to turn echo off on
        if !self.stdin.is_terminal() {
            return self.read_raw_line();
        }
        match rpassword::read_password() {
            Ok(password) => Ok(Some(password)),
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn print(&mut self, text: &str) {
        print!("{}", text);
        let _ = io::stdout().flush();
    }
}

/// An unreadable line becomes an empty answer so the menu can reject it
fn recover_unreadable(result: io::Result<Option<String>>) -> io::Result<Option<String>> {
    match result {
        Err(e) if e.kind() == io::ErrorKind::InvalidData => {
            warn!("Discarded unreadable input: {}", e);
            Ok(Some(String::new()))
        }
        other => other,
    }
}

/// Helper function to print a prompt and read the answer
pub fn prompt(console: &mut dyn Console, message: &str) -> io::Result<Option<String>> {
    console.print(message);
    recover_unreadable(console.read_line())
}

/// Same as `prompt` but reads through the password path
pub fn prompt_password(console: &mut dyn Console, message: &str) -> io::Result<Option<String>> {
    console.print(message);
    recover_unreadable(console.read_password())
}

/// Helper function to ask a yes/no question; anything but y/yes/1 is a no
pub fn prompt_with_confirmation(console: &mut dyn Console, question: &str) -> io::Result<bool> {
    let answer = prompt(console, &format!("{} (y/n): ", question))?;
    Ok(matches!(
        answer.as_deref().map(str::to_lowercase).as_deref(),
        Some("y") | Some("yes") | Some("1")
    ))
}

/// Console fed from a fixed script, capturing everything printed
#[cfg(test)]
pub struct ScriptedConsole {
    input: std::collections::VecDeque<io::Result<String>>,
    pub output: String,
}

#[cfg(test)]
impl ScriptedConsole {
    pub fn new(lines: &[&str]) -> Self {
        Self::from_results(lines.iter().map(|line| Ok(line.to_string())).collect())
    }

    /// Script that can also fail individual reads
    pub fn from_results(input: Vec<io::Result<String>>) -> Self {
        Self {
            input: input.into_iter().collect(),
            output: String::new(),
        }
    }

    /// Same handling of raw input as `Terminal` on piped stdin
    fn next_raw(&mut self) -> io::Result<Option<String>> {
        self.input
            .pop_front()
            .transpose()
            .map(|line| line.map(|line| strip_line_ending(&line).to_string()))
    }
}

#[cfg(test)]
impl Console for ScriptedConsole {
    fn read_line(&mut self) -> io::Result<Option<String>> {
        Ok(self.next_raw()?.map(|line| line.trim().to_string()))
    }

    fn read_password(&mut self) -> io::Result<Option<String>> {
        self.next_raw()
    }

    fn print(&mut self, text: &str) {
        self.output.push_str(text);
    }
}
