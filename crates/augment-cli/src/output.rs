//! Terminal output for `augment`.
//!
//! Expanded source and program output go to stdout uncolored so they can be
//! piped. Status labels, marker tables and errors get color unless disabled
//! with `--color never` or `NO_COLOR`.

use std::io::Write;
use std::path::Path;

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// `NO_COLOR` wins over `--color`; otherwise color follows the terminal.
pub fn resolve_color_choice(flag: Option<&str>) -> ColorChoice {
    if std::env::var_os("NO_COLOR").is_some() {
        return ColorChoice::Never;
    }
    match flag {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}

/// Color of a status label.
#[derive(Debug, Clone, Copy)]
pub enum Tone {
    /// Work completed, nothing to act on.
    Done,
    /// Something the user should look at, e.g. a file `--check` would rewrite.
    Attention,
}

impl Tone {
    fn color(self) -> Color {
        match self {
            Tone::Done => Color::Green,
            Tone::Attention => Color::Yellow,
        }
    }
}

pub struct StyledOutput {
    stdout: StandardStream,
    stderr: StandardStream,
}

impl StyledOutput {
    pub fn new(choice: ColorChoice) -> Self {
        Self {
            stdout: StandardStream::stdout(choice),
            stderr: StandardStream::stderr(choice),
        }
    }

    fn painted(&mut self, text: &str, spec: &ColorSpec) {
        let _ = self.stdout.set_color(spec);
        let _ = write!(self.stdout, "{}", text);
        let _ = self.stdout.reset();
    }

    /// `expanded 2 file(s) into out`: bold colored label, plain detail.
    pub fn status(&mut self, tone: Tone, label: &str, detail: &str) {
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(tone.color())).set_bold(true);
        self.painted(label, &spec);
        let _ = writeln!(self.stdout, " {}", detail);
    }

    /// Section title in the marker listing.
    pub fn heading(&mut self, title: &str) {
        let mut spec = ColorSpec::new();
        spec.set_bold(true);
        self.painted(title, &spec);
        let _ = writeln!(self.stdout);
    }

    /// One marker row; member markers have no priority.
    pub fn marker_row(&mut self, priority: Option<u32>, marker: &str, description: &str) {
        let priority = priority.map(|p| p.to_string()).unwrap_or_default();
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(Color::Cyan));
        self.painted(&format!("  {:>3}  @{:<24}", priority, marker), &spec);
        let _ = writeln!(self.stdout, "{}", description);
    }

    /// `// path` banner before each file when several are printed.
    pub fn file_banner(&mut self, path: &Path) {
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(Color::Cyan));
        self.painted(&format!("// {}", path.display()), &spec);
        let _ = writeln!(self.stdout);
    }

    /// Raw text, written as is.
    pub fn text(&mut self, text: &str) {
        let _ = write!(self.stdout, "{}", text);
    }

    pub fn line(&mut self, text: &str) {
        let _ = writeln!(self.stdout, "{}", text);
    }

    pub fn blank(&mut self) {
        let _ = writeln!(self.stdout);
    }

    pub fn flush(&mut self) {
        let _ = self.stdout.flush();
        let _ = self.stderr.flush();
    }

    /// `error: message` on stderr.
    pub fn error_line(&mut self, message: &str) {
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(Color::Red)).set_bold(true);
        let _ = self.stderr.set_color(&spec);
        let _ = write!(self.stderr, "error");
        let _ = self.stderr.reset();
        let _ = writeln!(self.stderr, ": {}", message);
    }

    /// Stderr, where parse diagnostics are rendered.
    pub fn stderr(&mut self) -> &mut StandardStream {
        &mut self.stderr
    }
}
