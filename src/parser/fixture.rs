//! Synthetic comparison pages shaped like the live AKC markup.

use std::fmt::Write;

const ROWS: usize = 38;

#[derive(Debug, Clone)]
pub struct CandidateHtml {
    pub personality: String,
    pub size: String,
    pub life_exp: String,
    pub trainability: String,
    pub grooming: Option<u32>,
    pub shedding: Option<u32>,
    pub activity_level: String,
    pub barking: Option<u32>,
}

impl Default for CandidateHtml {
    fn default() -> Self {
        Self {
            personality: "Friendly, Outgoing".into(),
            size: "Medium".into(),
            life_exp: "10-12 years".into(),
            trainability: "Agreeable".into(),
            grooming: Some(40),
            shedding: Some(60),
            activity_level: "Energetic".into(),
            barking: Some(60),
        }
    }
}

pub struct ComparisonPage {
    candidates: Vec<CandidateHtml>,
    empty_rows: Vec<usize>,
}

impl ComparisonPage {
    pub fn new(candidates: Vec<CandidateHtml>) -> Self {
        Self { candidates, empty_rows: Vec::new() }
    }

    /// Render row `row` (1-based) with no candidate cells.
    pub fn empty_row(mut self, row: usize) -> Self {
        self.empty_rows.push(row);
        self
    }

    pub fn render(&self) -> String {
        let mut html = String::from(
            "<!DOCTYPE html>\n<html><head><title>Compare</title></head><body>\n<div class=\"breed-results-comparison\">\n",
        );
        for row in 1..=ROWS {
            html.push_str("<div class=\"breed-results-comparison__row\">\n");
            if self.empty_rows.contains(&row) {
                html.push_str("</div>\n");
                continue;
            }
            for cand in &self.candidates {
                html.push_str(&cell(row, cand));
                html.push('\n');
            }
            html.push_str("</div>\n");
        }
        html.push_str("</div>\n</body></html>");
        html
    }
}

fn cell(row: usize, c: &CandidateHtml) -> String {
    match row {
        5 => format!("<div class=\"cell\">\n\t\t{}\n\t</div>", c.personality),
        14 => format!("<div class=\"cell\">\n<span>{}</span>\n</div>", c.size),
        17 => format!("<div class=\"cell\">{}</div>", c.life_exp),
        23 => format!("<div class=\"cell\">\n  {}\n</div>", c.trainability),
        29 => bar("Grooming", c.grooming),
        32 => bar("Shedding", c.shedding),
        35 => format!("<div class=\"cell\">\n  {}\n</div>", c.activity_level),
        38 => bar("Barking", c.barking),
        _ => "<div class=\"cell\"><!-- unused --></div>".to_string(),
    }
}

fn bar(label: &str, width: Option<u32>) -> String {
    let mut out = String::from("<div class=\"cell\">\n<div class=\"bar-graph\">\n");
    let _ = writeln!(out, "<span>{label}</span>");
    if let Some(w) = width {
        let _ = write!(
            out,
            "<div class=\"bar-graph__bg\">\n<div class=\"bar-graph__section\" style=\"width: {w}%;\"></div>\n</div>\n"
        );
    }
    out.push_str("</div>\n</div>");
    out
}
