//! Input helpers for interactive commands.

use std::io::BufRead;

/// Read one trimmed line from the input stream. Returns `None` on EOF or
/// read error, which interactive loops treat as a quit request.
pub fn read_stdin_line(stdin: &mut dyn BufRead) -> Option<String> {
    let mut line = String::new();
    match stdin.read_line(&mut line) {
        Ok(0) => None,
        Ok(_) => Some(line.trim().to_string()),
        Err(_) => None,
    }
}
