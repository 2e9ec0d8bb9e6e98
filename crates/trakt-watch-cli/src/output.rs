use clap::ValueEnum;
use owo_colors::OwoColorize;
use serde_json::{json, Value};
use tracing::warn;
use trakt_watch_core::display::history_lines;
use trakt_watch_core::summarize_response;
use trakt_watch_models::HistoryEntry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
    #[value(name = "json-pretty")]
    JsonPretty,
}

pub struct Output {
    format: OutputFormat,
    quiet: bool,
}

impl Output {
    pub fn new(format: OutputFormat, quiet: bool) -> Self {
        Self { format, quiet }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    pub fn success(&self, msg: impl AsRef<str>) {
        if self.quiet {
            return;
        }

        match self.format {
            OutputFormat::Human => println!("{} {}", "✓".green(), msg.as_ref()),
            OutputFormat::Json | OutputFormat::JsonPretty => {
                self.print_json(&json!({"type": "success", "message": msg.as_ref()}));
            }
        }
    }

    /// Always shown, even in quiet mode
    pub fn error(&self, msg: impl AsRef<str>) {
        match self.format {
            OutputFormat::Human => eprintln!("{}", msg.as_ref().red()),
            OutputFormat::Json | OutputFormat::JsonPretty => {
                self.print_json(&json!({"type": "error", "message": msg.as_ref()}));
            }
        }
    }

    pub fn warn(&self, msg: impl AsRef<str>) {
        if self.quiet {
            return;
        }

        match self.format {
            OutputFormat::Human => eprintln!("{}", msg.as_ref().yellow()),
            OutputFormat::Json | OutputFormat::JsonPretty => {
                self.print_json(&json!({"type": "warning", "message": msg.as_ref()}));
            }
        }
    }

    pub fn println(&self, msg: impl AsRef<str>) {
        if self.quiet {
            return;
        }

        match self.format {
            OutputFormat::Human => println!("{}", msg.as_ref()),
            OutputFormat::Json | OutputFormat::JsonPretty => {
                self.print_json(&json!({"type": "info", "message": msg.as_ref()}));
            }
        }
    }

    pub fn json(&self, data: &Value) {
        if self.quiet && self.format != OutputFormat::Human {
            return;
        }

        self.print_json(data);
    }

    fn print_json(&self, data: &Value) {
        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string(data).unwrap_or_default()),
            OutputFormat::JsonPretty => {
                println!("{}", serde_json::to_string_pretty(data).unwrap_or_default())
            }
            OutputFormat::Human => println!("{}", data),
        }
    }

    /// Print a mutation response, falling back to the raw JSON on stderr
    /// when it does not have the usual `added`/`deleted` shape.
    pub fn response(&self, response: &Value, rating: bool) {
        if self.format != OutputFormat::Human {
            self.json(response);
            return;
        }

        let Some(summary) = summarize_response(response, rating) else {
            warn!("Unrecognized response shape, printing it as-is");
            eprintln!(
                "{}",
                serde_json::to_string_pretty(response).unwrap_or_else(|_| response.to_string())
            );
            return;
        };
        if self.quiet {
            return;
        }

        if let Some(heading) = &summary.heading {
            println!("{}", format!("{}:", heading).green().bold());
            for (label, count) in &summary.counts {
                println!("{}: {}", label, count);
            }
        }
        if !summary.not_found.is_empty() {
            eprintln!("{}", "Not found:".red().bold());
            for line in &summary.not_found {
                println!("{}", line);
            }
        }
        println!();
    }

    pub fn history(&self, entries: &[HistoryEntry], include_id: bool, show_urls: bool) {
        if self.format != OutputFormat::Human {
            self.json(&json!(entries));
            return;
        }
        if self.quiet {
            return;
        }

        println!("{}", "Recent history:".bold());
        for line in history_lines(entries, include_id, show_urls) {
            println!("{}", line);
        }
    }
}
