//! Line-based terminal surfaces.
//!
//! A terminal cannot report single key presses without raw mode, so each
//! line the participant enters counts as one key: an empty line is `space`,
//! `l`/`a` are `left`, `r`/`d` are `right`. Anything else is passed through
//! lowercased, and the session ignores it.

use slotlab::participant::IntakeForm;
use slotlab::surface::{IntakePrompt, Presenter};
use slotlab::error::SurfaceError;
use std::io::{BufRead, Write};
use std::path::Path;

const MACHINES: &str = r"
     .-----------.        .-----------.
     |  7  $  7  |        |  $  7  $  |
     |-----------|        |-----------|
     |   [===]   |        |   [===]   |
     '-----------'        '-----------'
         LEFT                 RIGHT
";

/// Map one entered line to a key name.
pub fn resolve_key(line: &str) -> String {
    let key = line.trim().to_ascii_lowercase();
    match key.as_str() {
        "" => "space".to_string(),
        "l" | "a" | "left" => "left".to_string(),
        "r" | "d" | "right" => "right".to_string(),
        _ => key,
    }
}

fn read_line<R: BufRead>(input: &mut R) -> Result<Option<String>, SurfaceError> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}

pub struct TerminalPresenter<R, W> {
    input: R,
    output: W,
    continue_key: String,
}

impl<R: BufRead, W: Write> TerminalPresenter<R, W> {
    pub fn new(input: R, output: W, continue_key: impl Into<String>) -> Self {
        Self {
            input,
            output,
            continue_key: continue_key.into(),
        }
    }

    fn continue_hint(&self) -> String {
        if self.continue_key == "space" {
            "[press Enter to continue]".to_string()
        } else {
            format!("[type '{}' to continue]", self.continue_key)
        }
    }

    #[cfg(test)]
    fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> Presenter for TerminalPresenter<R, W> {
    fn show_text(&mut self, text: &str) -> Result<(), SurfaceError> {
        let hint = self.continue_hint();
        writeln!(self.output, "\n{}\n\n{}", text.trim(), hint)?;
        self.output.flush()?;
        Ok(())
    }

    fn show_image(&mut self, asset: &Path) -> Result<(), SurfaceError> {
        writeln!(self.output, "{}", MACHINES)?;
        writeln!(self.output, "({})  left [l] / right [r]: ", asset.display())?;
        self.output.flush()?;
        Ok(())
    }

    fn next_key(&mut self) -> Result<String, SurfaceError> {
        match read_line(&mut self.input)? {
            Some(line) => Ok(resolve_key(&line)),
            None => Err(SurfaceError::Closed),
        }
    }
}

/// Operator intake on the terminal. `:q` or end of input cancels.
pub struct TerminalIntake<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> TerminalIntake<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> IntakePrompt for TerminalIntake<R, W> {
    fn prompt_fields(&mut self, form: &IntakeForm) -> Result<Option<Vec<String>>, SurfaceError> {
        writeln!(self.output, "== {} ==  (:q to cancel)", form.title)?;

        let mut answers = Vec::with_capacity(form.fields.len());
        for field in &form.fields {
            for (i, choice) in field.choices.iter().enumerate() {
                writeln!(self.output, "  {}) {}", i + 1, choice)?;
            }
            loop {
                write!(self.output, "{} ", field.label)?;
                self.output.flush()?;

                let Some(line) = read_line(&mut self.input)? else {
                    return Ok(None);
                };
                let answer = line.trim();
                if answer == ":q" {
                    return Ok(None);
                }
                if field.choices.is_empty() {
                    answers.push(answer.to_string());
                    break;
                }
                if answer.is_empty() {
                    continue;
                }
                let picked = answer
                    .parse::<usize>()
                    .ok()
                    .and_then(|n| n.checked_sub(1))
                    .and_then(|i| field.choices.get(i))
                    .or_else(|| {
                        field
                            .choices
                            .iter()
                            .find(|c| c.eq_ignore_ascii_case(answer))
                    });
                answers.push(picked.cloned().unwrap_or_else(|| answer.to_string()));
                break;
            }
        }
        Ok(Some(answers))
    }
}
