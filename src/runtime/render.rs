//! Side-effect collaborators of the interpreter.
//!
//! [`Output`] receives what `STDOUT` and `PRINTR` print; [`Renderer`]
//! receives the cosmetic `DRAW`, `BLINK` and `ADDV` effects. Both are
//! injected by reference so the interpreter never touches the terminal.

use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use crate::bytecode::Shape;

/// Sink for program output.
pub trait Output {
    /// `STDOUT r`
    fn value(&mut self, value: i32) -> io::Result<()>;

    /// One row of `PRINTR`.
    fn register(&mut self, index: usize, value: i32) -> io::Result<()>;
}

/// Sink for the visual instructions.
pub trait Renderer {
    fn draw(&mut self, shape: Shape, blink: bool) -> io::Result<()>;

    fn visual_add(&mut self, left: i32, right: i32, sum: i32) -> io::Result<()>;
}

/// Writes program output as text lines (`9`, `R0: 5`).
pub struct WriteSink<W: Write> {
    out: W,
}

pub type StdoutSink = WriteSink<io::Stdout>;

impl<W: Write> WriteSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl Default for StdoutSink {
    fn default() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> Output for WriteSink<W> {
    fn value(&mut self, value: i32) -> io::Result<()> {
        writeln!(self.out, "{}", value)
    }

    fn register(&mut self, index: usize, value: i32) -> io::Result<()> {
        writeln!(self.out, "R{}: {}", index, value)
    }
}

/// Collects output lines in memory.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CapturedOutput {
    pub lines: Vec<String>,
}

impl CapturedOutput {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Output for CapturedOutput {
    fn value(&mut self, value: i32) -> io::Result<()> {
        self.lines.push(value.to_string());
        Ok(())
    }

    fn register(&mut self, index: usize, value: i32) -> io::Result<()> {
        self.lines.push(format!("R{}: {}", index, value));
        Ok(())
    }
}

/// Discards every visual effect.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn draw(&mut self, _shape: Shape, _blink: bool) -> io::Result<()> {
        Ok(())
    }

    fn visual_add(&mut self, _left: i32, _right: i32, _sum: i32) -> io::Result<()> {
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub color: bool,
    /// Pause between animation frames; zero disables animation.
    pub frame_delay: Duration,
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            color: true,
            frame_delay: Duration::from_millis(100),
        }
    }
}

const HEART: &str = r#"
   .-. .-.
  (   '   )
   \     /
    '. .'
      '
"#;

const BIRD: &str = r#"
      \\
      (o>
   \\_//)
    \_/_)
     _|_
"#;

/// ASCII art and star rows on a terminal.
pub struct TerminalRenderer<W: Write> {
    out: W,
    config: RenderConfig,
}

impl<W: Write> TerminalRenderer<W> {
    // ANSI colors
    const RESET: &'static str = "\x1b[0m";
    const BLINK: &'static str = "\x1b[5m";
    const RED: &'static str = "\x1b[31m";
    const GRN: &'static str = "\x1b[32m";
    const BLU: &'static str = "\x1b[34m";

    pub fn new(out: W, config: RenderConfig) -> Self {
        Self { out, config }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn paint(&mut self, color: &str, text: &str) -> io::Result<()> {
        if self.config.color {
            write!(self.out, "{}{}{}", color, text, Self::RESET)
        } else {
            write!(self.out, "{}", text)
        }
    }

    fn pause(&mut self) -> io::Result<()> {
        if !self.config.frame_delay.is_zero() {
            self.out.flush()?;
            thread::sleep(self.config.frame_delay);
        }
        Ok(())
    }

    /// Prints `count` stars one frame at a time.
    fn stars(&mut self, color: &str, count: i32) -> io::Result<()> {
        for _ in 0..count.max(0) {
            self.paint(color, "* ")?;
            self.pause()?;
        }
        Ok(())
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn draw(&mut self, shape: Shape, blink: bool) -> io::Result<()> {
        let (art, color) = match shape {
            Shape::Heart => (HEART, Self::RED),
            Shape::Bird => (BIRD, Self::BLU),
        };
        if blink && self.config.color {
            let color = format!("{}{}", color, Self::BLINK);
            self.paint(&color, art)?;
        } else {
            self.paint(color, art)?;
        }
        writeln!(self.out)
    }

    fn visual_add(&mut self, left: i32, right: i32, sum: i32) -> io::Result<()> {
        write!(self.out, "{} + {} ", left, right)?;
        self.stars(Self::RED, left)?;
        write!(self.out, "+ ")?;
        self.pause()?;
        self.stars(Self::BLU, right)?;
        write!(self.out, "= ")?;
        self.pause()?;
        self.stars(Self::GRN, sum)?;
        writeln!(self.out)
    }
}
