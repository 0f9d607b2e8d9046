//! Rendering of results.

use std::io::{self, Write};

use serde::Serialize;

use cfg_membership::{RecognitionResult, Verdict};

/// One checked string, as printed with `--json`.
#[derive(Serialize, Debug)]
pub struct Report<'a> {
    pub input: &'a str,
    pub verdict: Verdict,
    #[serde(flatten)]
    pub result: &'a RecognitionResult,
}

pub fn write_json<W: Write>(
    out: &mut W,
    inputs: &[String],
    results: &[RecognitionResult],
) -> Result<(), serde_json::Error> {
    let reports: Vec<Report> = inputs
        .iter()
        .zip(results)
        .map(|(input, result)| Report {
            input,
            verdict: result.verdict(),
            result,
        })
        .collect();
    serde_json::to_writer_pretty(&mut *out, &reports)?;
    writeln!(out).map_err(serde_json::Error::io)
}

pub fn write_text<W: Write>(
    out: &mut W,
    inputs: &[String],
    results: &[RecognitionResult],
) -> io::Result<()> {
    for (input, result) in inputs.iter().zip(results) {
        writeln!(out, "{:?}: {}", input, result.verdict())?;
        if !result.derivation.is_empty() {
            write_derivation(out, result)?;
        }
    }
    Ok(())
}

fn write_derivation<W: Write>(out: &mut W, result: &RecognitionResult) -> io::Result<()> {
    let forms = result.derivation.sentential_forms();
    let rows: Vec<[String; 3]> = result
        .derivation
        .iter()
        .zip(forms)
        .map(|(step, form)| [step.rule(), step.application(), form])
        .collect();
    let header = ["Rule", "Application", "Sentential form"];
    let mut widths = header.map(|title| title.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }
    let header = header.map(str::to_string);
    for row in std::iter::once(&header).chain(&rows) {
        writeln!(
            out,
            "    {:<w0$}  {:<w1$}  {}",
            row[0],
            row[1],
            row[2],
            w0 = widths[0],
            w1 = widths[1],
        )?;
    }
    Ok(())
}
