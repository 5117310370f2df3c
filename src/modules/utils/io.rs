use std::fmt::Display;
use std::io::{self, BufRead, IsTerminal, StdinLock, Stdout, Write};

/// Line-oriented prompt I/O over any reader/writer pair
///
/// End of input surfaces as `io::ErrorKind::UnexpectedEof` so every prompt
/// loop can bail out with `?`.
pub struct Console<R, W> {
    input: R,
    output: W,
    hide_passwords: bool,
}

impl Console<StdinLock<'static>, Stdout> {
    /// Console bound to the process's stdin/stdout
    ///
    /// Passwords are read without echo when stdin is a terminal.
    pub fn stdio() -> Self {
        let stdin = io::stdin();
        let hide_passwords = stdin.is_terminal();
        Self {
            input: stdin.lock(),
            output: io::stdout(),
            hide_passwords,
        }
    }
}

impl<R: BufRead, W: Write> Console<R, W> {
    /// Console over arbitrary streams; passwords are read as plain lines
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            hide_passwords: false,
        }
    }

    /// Print one line
    pub fn say(&mut self, text: impl Display) -> io::Result<()> {
        writeln!(self.output, "{}", text)
    }

    /// Helper function to read a raw line, without its line ending
    fn read_raw_line(&mut self) -> io::Result<String> {
        let mut input = String::new();
        if self.input.read_line(&mut input)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
        }
        if input.ends_with('\n') {
            input.pop();
            if input.ends_with('\r') {
                input.pop();
            }
        }
        Ok(input)
    }

    /// Helper function to read a trimmed line from the input
    pub fn read_line(&mut self) -> io::Result<String> {
        Ok(self.read_raw_line()?.trim().to_string())
    }

    /// Print a label without a newline and read the trimmed answer
    pub fn prompt(&mut self, label: &str) -> io::Result<String> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;
        self.read_line()
    }

    /// Read a password, hidden on a terminal; surrounding whitespace is kept
    pub fn prompt_password(&mut self, label: &str) -> io::Result<String> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;
        if self.hide_passwords {
            rpassword::read_password()
        } else {
            self.read_raw_line()
        }
    }

    /// Ask a yes/no question; only "yes" (any case) confirms
    pub fn confirm(&mut self, question: &str) -> io::Result<bool> {
        let response = self.prompt(&format!("{} (yes/no): ", question))?;
        Ok(response.eq_ignore_ascii_case("yes"))
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

/// True when an I/O error means the input stream has ended
pub fn is_input_closed(error: &io::Error) -> bool {
    error.kind() == io::ErrorKind::UnexpectedEof
}
