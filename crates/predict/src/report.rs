use std::io::Write;

use serde::Serialize;
use strum::{Display, EnumString};

use crate::error::Result;

/// One measured contour.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ObjectResult {
    /// Score of the detection the contour came from
    pub score: f32,
    /// Enclosed area in pixels
    pub area: f32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum ReportFormat {
    /// One `物件{i}: Score=.., PixelArea=..` line per result
    #[default]
    Text,
    /// A JSON array of `{ index, score, area }`
    Json,
}

/// The text line for the `index`-th (1-based) result. Downstream tooling
/// parses this exact layout.
pub fn format_line(index: usize, result: &ObjectResult) -> String {
    format!(
        "物件{}: Score={:.2}, PixelArea={:.0}",
        index, result.score, result.area
    )
}

#[derive(Serialize)]
struct JsonEntry {
    index: usize,
    score: f32,
    area: f32,
}

pub struct Report<'a> {
    results: &'a [ObjectResult],
    format: ReportFormat,
}

impl<'a> Report<'a> {
    pub fn new(results: &'a [ObjectResult], format: ReportFormat) -> Self {
        Self { results, format }
    }

    pub fn write_to<W: Write>(&self, mut out: W) -> Result<()> {
        match self.format {
            ReportFormat::Text => {
                for (i, result) in self.results.iter().enumerate() {
                    writeln!(out, "{}", format_line(i + 1, result))?;
                }
            }
            ReportFormat::Json => {
                let entries: Vec<JsonEntry> = self
                    .results
                    .iter()
                    .enumerate()
                    .map(|(i, r)| JsonEntry {
                        index: i + 1,
                        score: r.score,
                        area: r.area,
                    })
                    .collect();
                serde_json::to_writer_pretty(&mut out, &entries)?;
                writeln!(out)?;
            }
        }
        out.flush()?;
        Ok(())
    }

    pub fn render(&self) -> Result<String> {
        let mut buffer = Vec::new();
        self.write_to(&mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}
