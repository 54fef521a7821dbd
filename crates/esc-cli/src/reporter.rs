use colored::Colorize;
use rustc_hash::FxHashMap;
use serde::Serialize;

use esc_common::{Diagnostic, DiagnosticCategory, LineMap};

use crate::driver::CompilationResult;

/// Renders diagnostics the way tsc does: `file(line,col): error TS1234: msg`,
/// or in pretty mode `file:line:col - error TS1234: msg` followed by the
/// source line and an underline.
pub struct Reporter {
    pretty: bool,
    sources: FxHashMap<String, (String, LineMap)>,
}

impl Reporter {
    pub fn new(pretty: bool) -> Self {
        Reporter {
            pretty,
            sources: FxHashMap::default(),
        }
    }

    /// Register the text of a file so positions and snippets can be shown.
    pub fn add_source(&mut self, file_name: &str, source: &str) {
        self.sources
            .insert(file_name.to_string(), (source.to_string(), LineMap::build(source)));
    }

    pub fn add_sources(&mut self, result: &CompilationResult) {
        for file in &result.files {
            self.add_source(&file.file_name, &file.source);
        }
    }

    pub fn render(&self, diagnostics: &[Diagnostic]) -> String {
        let mut out = String::new();
        for (index, diagnostic) in diagnostics.iter().enumerate() {
            if index > 0 {
                out.push('\n');
                if self.pretty {
                    out.push('\n');
                }
            }
            out.push_str(&self.format_diagnostic(diagnostic));
        }
        out
    }

    pub fn format_diagnostic(&self, diagnostic: &Diagnostic) -> String {
        let category = self.format_category(diagnostic.category);
        let code = self.format_code(diagnostic.code);
        let mut output = self.format_location(&diagnostic.file, diagnostic.start);
        output.push_str(if self.pretty { " - " } else { ": " });
        output.push_str(&category);
        output.push(' ');
        output.push_str(&code);
        output.push_str(": ");
        output.push_str(&diagnostic.message_text);

        if self.pretty
            && let Some(snippet) =
                self.format_snippet(&diagnostic.file, diagnostic.start, diagnostic.length)
        {
            output.push_str(&snippet);
        }
        output
    }

    /// Closing line, e.g. `Found 2 errors.`
    pub fn format_summary(&self, count: usize) -> String {
        match count {
            0 => "Found 0 errors.".to_string(),
            1 => "Found 1 error.".to_string(),
            n => format!("Found {n} errors."),
        }
    }

    /// 1-based line and column of `offset` in `file`.
    pub fn position_for(&self, file: &str, offset: u32) -> Option<(u32, u32)> {
        let (source, line_map) = self.sources.get(file)?;
        let position = line_map.offset_to_position(offset, source);
        Some((position.line + 1, position.character + 1))
    }

    fn format_location(&self, file: &str, offset: u32) -> String {
        let Some((line, column)) = self.position_for(file, offset) else {
            return file.to_string();
        };
        if !self.pretty {
            return format!("{file}({line},{column})");
        }
        format!(
            "{}:{}:{}",
            file.cyan(),
            line.to_string().yellow(),
            column.to_string().yellow()
        )
    }

    /// Source line with the span underlined:
    ///     3   f();
    ///         ~~~
    fn format_snippet(&self, file: &str, start: u32, length: u32) -> Option<String> {
        let (source, line_map) = self.sources.get(file)?;
        let line = line_map.line_of(start);
        let line_start = line_map.line_start(line)?;
        let line_text = source.get(line_start as usize..)?.lines().next().unwrap_or("");

        let column = start.saturating_sub(line_start) as usize;
        let visible = line_text.len().saturating_sub(column).max(1);
        let underline = "~".repeat((length as usize).clamp(1, visible));

        let mut snippet = String::new();
        snippet.push_str(&format!("\n\n  {:>3}   {}", line + 1, line_text));
        snippet.push_str(&format!("\n        {}{}", " ".repeat(column), underline.red()));
        Some(snippet)
    }

    fn format_category(&self, category: DiagnosticCategory) -> String {
        let label = category.as_str();
        if !self.pretty {
            return label.to_string();
        }
        match category {
            DiagnosticCategory::Error => label.red().to_string(),
            DiagnosticCategory::Warning => label.yellow().to_string(),
            DiagnosticCategory::Suggestion => label.blue().to_string(),
            DiagnosticCategory::Message => label.cyan().to_string(),
        }
    }

    fn format_code(&self, code: u32) -> String {
        let label = format!("TS{code}");
        if self.pretty {
            label.bright_black().to_string()
        } else {
            label
        }
    }

    /// JSON report: every diagnostic with its 1-based position.
    pub fn render_json(&self, diagnostics: &[Diagnostic]) -> serde_json::Result<String> {
        let entries: Vec<JsonDiagnostic<'_>> = diagnostics
            .iter()
            .map(|diagnostic| {
                let (line, column) = self
                    .position_for(&diagnostic.file, diagnostic.start)
                    .unwrap_or((0, 0));
                JsonDiagnostic {
                    line,
                    column,
                    diagnostic,
                }
            })
            .collect();
        serde_json::to_string_pretty(&JsonReport {
            error_count: diagnostics.len(),
            diagnostics: entries,
        })
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonReport<'a> {
    error_count: usize,
    diagnostics: Vec<JsonDiagnostic<'a>>,
}

#[derive(Serialize)]
struct JsonDiagnostic<'a> {
    line: u32,
    column: u32,
    #[serde(flatten)]
    diagnostic: &'a Diagnostic,
}
