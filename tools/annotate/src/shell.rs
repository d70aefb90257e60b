use annotate_core::dataset::model::Category;
use annotate_core::dataset::store::Dataset;
use annotate_core::error::CoreError;
use annotate_core::export::receipt::{write_export, ExportReceipt};
use annotate_core::guidelines::index::{explain, GuidelineSet};
use annotate_core::review::session::{
    accept_auto_label, current_view, navigate, submit, switch_category, NavigateOutcome,
    SessionState, SubmitOutcome,
};
use anyhow::Result;
use std::io::{BufRead, Write};
use std::path::PathBuf;

const HELP: &str = "\
commands:
  n, next              next sentence
  p, prev              previous sentence
  c, cat <category>    switch category (content | determinant)
  g, guide             show label explanations for the active category
  s, status            show how many rows are left
  a, accept            validate the automatic annotation as is
  l, label <text>      validate with <text> (bare text does the same,
                       unless it is a command word on its own)
  e, export [path]     write the annotated CSV
  h, help              this text
  q, quit              leave the session
";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Show,
    Next,
    Prev,
    Category(Category),
    Guide,
    Status,
    Accept,
    Label(String),
    Export(Option<PathBuf>),
    Help,
    Quit,
}

pub fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(Command::Show);
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((w, r)) => (w, r.trim()),
        None => (line, ""),
    };
    let bare = rest.is_empty();
    let cmd = match word {
        "n" | "next" if bare => Command::Next,
        "p" | "prev" if bare => Command::Prev,
        "g" | "guide" if bare => Command::Guide,
        "s" | "status" if bare => Command::Status,
        "a" | "accept" if bare => Command::Accept,
        "h" | "help" | "?" if bare => Command::Help,
        "q" | "quit" | "exit" if bare => Command::Quit,
        "c" | "cat" | "category" => {
            let category = rest.parse::<Category>().map_err(|e| e.to_string())?;
            Command::Category(category)
        }
        "l" | "label" => {
            if rest.is_empty() {
                return Err("label needs a value".to_string());
            }
            Command::Label(rest.to_string())
        }
        "e" | "export" => Command::Export((!rest.is_empty()).then(|| PathBuf::from(rest))),
        _ => Command::Label(line.to_string()),
    };
    Ok(cmd)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

pub struct Shell {
    dataset: Dataset,
    guidelines: GuidelineSet,
    state: SessionState,
    export_path: PathBuf,
}

impl Shell {
    pub fn new(
        dataset: Dataset,
        guidelines: GuidelineSet,
        state: SessionState,
        export_path: PathBuf,
    ) -> Self {
        Self {
            dataset,
            guidelines,
            state,
            export_path,
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn export(&self) -> Result<ExportReceipt> {
        Ok(write_export(&self.dataset, &self.export_path)?)
    }

    /// Reads commands until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> Result<()> {
        self.show(out)?;
        write!(out, "> ")?;
        out.flush()?;
        for line in input.lines() {
            let line = line?;
            let flow = match parse_command(&line) {
                Ok(cmd) => self.handle(cmd, out)?,
                Err(msg) => {
                    writeln!(out, "! {}", msg)?;
                    Flow::Continue
                }
            };
            if flow == Flow::Quit {
                break;
            }
            write!(out, "> ")?;
            out.flush()?;
        }
        Ok(())
    }

    fn handle<W: Write>(&mut self, cmd: Command, out: &mut W) -> Result<Flow> {
        match cmd {
            Command::Show => self.show(out)?,
            Command::Next => self.step(1, out)?,
            Command::Prev => self.step(-1, out)?,
            Command::Category(category) => {
                switch_category(&mut self.state, category);
                self.show(out)?;
            }
            Command::Guide => {
                writeln!(out, "{} Labels Explanations", self.state.category)?;
                write!(out, "{}", explain(&self.guidelines, self.state.category))?;
            }
            Command::Status => self.status(out)?,
            Command::Accept => match accept_auto_label(&mut self.dataset, &mut self.state) {
                Ok(outcome) => self.report(outcome, out)?,
                Err(e) => self.complain(e, out)?,
            },
            Command::Label(label) => match submit(&mut self.dataset, &mut self.state, &label) {
                Ok(outcome) => self.report(outcome, out)?,
                Err(e) => self.complain(e, out)?,
            },
            Command::Export(path) => {
                let target = path.as_deref().unwrap_or(self.export_path.as_path());
                match write_export(&self.dataset, target) {
                    Ok(receipt) => writeln!(
                        out,
                        "exported {} rows to {} (sha256 {})",
                        receipt.rows, receipt.path, receipt.sha256
                    )?,
                    Err(e) => self.complain(e, out)?,
                }
            }
            Command::Help => write!(out, "{}", HELP)?,
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn step<W: Write>(&mut self, delta: i64, out: &mut W) -> Result<()> {
        match navigate(&self.dataset, &mut self.state, delta) {
            NavigateOutcome::Moved { .. } => self.show(out),
            NavigateOutcome::NothingToAnnotate => self.nothing_left(out),
        }
    }

    fn report<W: Write>(&self, outcome: SubmitOutcome, out: &mut W) -> Result<()> {
        match outcome {
            SubmitOutcome::Recorded(key) => {
                writeln!(out, "validated row {} ({})", key, self.state.category)?;
                self.show(out)
            }
            SubmitOutcome::Skipped => {
                writeln!(out, "empty label, nothing recorded")?;
                Ok(())
            }
            SubmitOutcome::NothingToAnnotate => self.nothing_left(out),
        }
    }

    fn show<W: Write>(&self, out: &mut W) -> Result<()> {
        match current_view(&self.dataset, &self.state)? {
            Some(view) => {
                writeln!(
                    out,
                    "[{} {}/{}] row {}",
                    view.category,
                    view.position + 1,
                    view.queue_len,
                    view.key
                )?;
                writeln!(out, "SENTENCE\n  {}", view.sentence)?;
                writeln!(out, "Generated from Label\n  {}", view.original_label)?;
                writeln!(out, "Automatic Annotation\n  {}", view.auto_label)?;
                let labels = self.guidelines.labels(view.category);
                if !labels.is_empty() {
                    writeln!(out, "known labels: {}", labels.join(", "))?;
                }
                Ok(())
            }
            None => self.nothing_left(out),
        }
    }

    fn status<W: Write>(&self, out: &mut W) -> Result<()> {
        let p = self.dataset.progress();
        writeln!(
            out,
            "{} rows; left to annotate: {} (contents {}, determinants {})",
            p.total_rows, p.pending_any, p.pending_content, p.pending_determinant
        )?;
        Ok(())
    }

    /// Reports a failed command and keeps the session going. The dataset
    /// in memory is untouched, so nothing recorded so far is lost.
    fn complain<W: Write>(&self, err: CoreError, out: &mut W) -> Result<()> {
        if err.is_recoverable() {
            tracing::debug!(error = %err, "command rejected");
        } else {
            tracing::warn!(error = %err, "command failed");
        }
        writeln!(out, "! {}", err)?;
        Ok(())
    }

    fn nothing_left<W: Write>(&self, out: &mut W) -> Result<()> {
        writeln!(out, "nothing to annotate in {}", self.state.category)?;
        Ok(())
    }
}
