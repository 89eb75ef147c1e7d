//! Terminal rendering of query snapshots, one card per recommendation.

use client_core::presenter::{self, ScoreBand, ViewItem};
use client_core::SessionSnapshot;

const PLACEHOLDER: &str = "Enter a description and click Get Recommendations.";

pub struct ConsoleRenderer {
    pub use_color: bool,
}

impl ConsoleRenderer {
    pub fn new(use_color: bool) -> Self {
        Self { use_color }
    }

    fn color_start(&self, band: ScoreBand) -> &'static str {
        if !self.use_color {
            return "";
        }
        match band {
            ScoreBand::High => "\x1b[32m",       // emerald
            ScoreBand::HighMedium => "\x1b[92m", // lime
            ScoreBand::Medium => "\x1b[33m",     // amber
            ScoreBand::Low => "\x1b[31m",        // rose
        }
    }

    fn error_start(&self) -> &'static str {
        if self.use_color {
            "\x1b[31m"
        } else {
            ""
        }
    }

    fn bold_start(&self) -> &'static str {
        if self.use_color {
            "\x1b[1m"
        } else {
            ""
        }
    }

    fn dim_start(&self) -> &'static str {
        if self.use_color {
            "\x1b[2m"
        } else {
            ""
        }
    }

    fn color_end(&self) -> &'static str {
        if self.use_color {
            "\x1b[0m"
        } else {
            ""
        }
    }

    pub fn header(&self) -> String {
        format!(
            "{}Road Safety Intelligence{}\n{}Intervention Recommender{}\n\n",
            self.dim_start(),
            self.color_end(),
            self.bold_start(),
            self.color_end()
        )
    }

    pub fn status_line(&self, prompt: &str) -> String {
        format!(
            "{}Analyzing…{} {prompt}\n\n",
            self.dim_start(),
            self.color_end()
        )
    }

    pub fn footer(&self, backend_base: &str) -> String {
        format!(
            "{}Built for safer streets • Evidence-led interventions{}\nCheck Backend / DB: {backend_base}/test\n",
            self.dim_start(),
            self.color_end()
        )
    }

    pub fn render(&self, snapshot: &SessionSnapshot) -> String {
        let mut output = String::new();

        if let Some(error) = &snapshot.last_error {
            output.push_str(&format!(
                "{}{error}{}\n\n",
                self.error_start(),
                self.color_end()
            ));
        }

        output.push_str(&format!(
            "{}Recommendations{}\n",
            self.bold_start(),
            self.color_end()
        ));

        match &snapshot.last_response {
            None => {
                output.push_str(PLACEHOLDER);
                output.push_str("\n\n");
            }
            Some(response) => {
                let view = presenter::present(response);
                if let Some(filters) = &view.filters_summary {
                    output.push_str(&format!(
                        "{}Parsed: {filters}{}\n",
                        self.dim_start(),
                        self.color_end()
                    ));
                }
                output.push('\n');
                for (index, item) in view.items.iter().enumerate() {
                    self.push_item(&mut output, index + 1, item);
                }
            }
        }

        output
    }

    fn push_item(&self, output: &mut String, position: usize, item: &ViewItem) {
        output.push_str(&format!(
            "{position}. {}{}{}",
            self.bold_start(),
            item.name,
            self.color_end()
        ));
        if let Some(raw) = &item.raw_score {
            output.push_str(&format!(
                "  {}Score {raw}{}",
                self.dim_start(),
                self.color_end()
            ));
        }
        output.push('\n');
        output.push_str(&format!("   {}\n", item.description));
        output.push_str(&format!(
            "   Match score [{}{}{}] {}% {}{}{}\n",
            self.color_start(item.band),
            score_bar(item.score_percent),
            self.color_end(),
            item.score_percent,
            self.color_start(item.band),
            item.band.label(),
            self.color_end()
        ));
        output.push_str(&format!("   Why suggested: {}\n", item.why_suggested));
        if !item.tags.is_empty() {
            let tags = item
                .tags
                .iter()
                .map(|tag| format!("[{tag}]"))
                .collect::<Vec<_>>()
                .join(" ");
            output.push_str(&format!("   Applicability: {tags}\n"));
        }
        if !item.references.is_empty() {
            output.push_str("   References:\n");
            for reference in &item.references {
                let mut line = format!(
                    "     - {}{}{}",
                    self.bold_start(),
                    reference.title,
                    self.color_end()
                );
                if let Some(attribution) = &reference.attribution {
                    line.push(' ');
                    line.push_str(attribution);
                }
                if let Some(url) = &reference.url {
                    line.push_str(&format!(" <{url}>"));
                }
                output.push_str(&line);
                output.push('\n');
                if let Some(excerpt) = &reference.excerpt {
                    output.push_str(&format!(
                        "       {}{excerpt}{}\n",
                        self.dim_start(),
                        self.color_end()
                    ));
                }
            }
        }
        if let Some(constraints) = &item.constraints {
            output.push_str(&format!("   Constraints: {constraints}\n"));
        }
        output.push('\n');
    }
}

/// Ten-cell bar, one cell per ten percent.
fn score_bar(percent: u8) -> String {
    let filled = usize::from(percent / 10);
    let mut bar = "█".repeat(filled);
    bar.push_str(&"░".repeat(10 - filled));
    bar
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
