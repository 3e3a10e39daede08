use std::io::{self, BufRead, Write};
use std::path::Path;

use tracing::debug;

use crate::machine::Machine;
use crate::runtime::{Output, Renderer};

pub const PROMPT: &str = ">> ";

/// Interactive `run <file>` loop.
///
/// Prompts and diagnostics go to `console`; program output and visual
/// effects go to the injected collaborators. Each `run` gets a fresh
/// [`Machine`].
pub struct Shell<'a, R, W> {
    input: R,
    console: W,
    output: &'a mut dyn Output,
    renderer: &'a mut dyn Renderer,
}

impl<'a, R: BufRead, W: Write> Shell<'a, R, W> {
    pub fn new(
        input: R,
        console: W,
        output: &'a mut dyn Output,
        renderer: &'a mut dyn Renderer,
    ) -> Self {
        Self {
            input,
            console,
            output,
            renderer,
        }
    }

    pub fn into_console(self) -> W {
        self.console
    }

    /// Reads commands until `exit` or end of input.
    pub fn run(&mut self) -> io::Result<()> {
        writeln!(
            self.console,
            "Welcome! Use 'run [filename]' to execute a Susan program or EXIT to exit."
        )?;

        let mut line = String::new();
        loop {
            write!(self.console, "{}", PROMPT)?;
            self.console.flush()?;

            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                writeln!(self.console)?;
                return Ok(());
            }

            let parts: Vec<&str> = line.split_whitespace().collect();
            match parts.as_slice() {
                [] => continue,
                [command, ..] if command.eq_ignore_ascii_case("exit") => return Ok(()),
                ["run"] => writeln!(self.console, "susan: missing filename")?,
                ["run", file] => self.run_file(Path::new(file))?,
                ["run", ..] => writeln!(self.console, "susan: too many arguments")?,
                _ => writeln!(
                    self.console,
                    "susan: invalid input: use 'run [filename]' to execute program or EXIT to exit."
                )?,
            }
        }
    }

    fn run_file(&mut self, path: &Path) -> io::Result<()> {
        if !path.is_file() {
            return writeln!(
                self.console,
                "susan: file not found: {}",
                path.display()
            );
        }

        let mut machine = Machine::new();
        if let Err(e) = machine.execute_file(path, &mut *self.output, &mut *self.renderer) {
            debug!(path = %path.display(), error = ?e, "program failed");
            writeln!(self.console, "susan: {}", e)?;
        }
        Ok(())
    }
}
