//! Pruning summary table

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;

use crate::pipeline::PruneOutcome;

/// Summary of a pruning run
#[derive(Debug, Default)]
pub struct PruneSummary {
    pub initial_features: usize,
    pub final_features: usize,
    /// Removed features in elimination order, with the feature each one was paired with
    pub removed: Vec<(String, String, f64)>,
    pub elapsed: Option<std::time::Duration>,
}

impl PruneSummary {
    pub fn from_outcome(outcome: &PruneOutcome) -> Self {
        Self {
            initial_features: outcome.n_variables,
            final_features: outcome.n_variables - outcome.removed.len(),
            removed: outcome
                .steps
                .iter()
                .map(|step| {
                    (
                        outcome.label(step.removed),
                        outcome.label(step.kept),
                        step.correlation,
                    )
                })
                .collect(),
            elapsed: None,
        }
    }

    pub fn set_elapsed(&mut self, elapsed: std::time::Duration) {
        self.elapsed = Some(elapsed);
    }

    /// Build the counts table
    pub fn counts_table(&self) -> Table {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Metric").add_attribute(Attribute::Bold),
            Cell::new("Value").add_attribute(Attribute::Bold),
        ]);

        table.add_row(vec![
            Cell::new("📁 Initial Features"),
            Cell::new(self.initial_features),
        ]);

        table.add_row(vec![
            Cell::new("🔗 Dropped (Correlation)"),
            Cell::new(self.removed.len()).fg(if self.removed.is_empty() {
                Color::White
            } else {
                Color::Red
            }),
        ]);

        table.add_row(vec![
            Cell::new("✅ Final Features"),
            Cell::new(self.final_features)
                .fg(Color::Green)
                .add_attribute(Attribute::Bold),
        ]);

        if let Some(elapsed) = self.elapsed {
            table.add_row(vec![
                Cell::new("⏱  Pruning Time"),
                Cell::new(format!("{:.2?}", elapsed)),
            ]);
        }

        table
    }

    /// Build the ordered removal table
    pub fn removal_table(&self) -> Table {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("#").add_attribute(Attribute::Bold),
            Cell::new("Removed").add_attribute(Attribute::Bold),
            Cell::new("Correlated With").add_attribute(Attribute::Bold),
            Cell::new("|r|").add_attribute(Attribute::Bold),
        ]);

        for (order, (removed, kept, correlation)) in self.removed.iter().enumerate() {
            table.add_row(vec![
                Cell::new(order + 1),
                Cell::new(removed).fg(Color::Red),
                Cell::new(kept),
                Cell::new(format!("{:.4}", correlation)),
            ]);
        }

        table
    }

    pub fn display(&self) {
        println!();
        println!(
            "    {} {}",
            style("📋").cyan(),
            style("PRUNING SUMMARY").white().bold()
        );
        println!("    {}", style("─".repeat(50)).dim());
        println!();

        for line in self.counts_table().to_string().lines() {
            println!("    {}", line);
        }

        if !self.removed.is_empty() {
            println!();
            for line in self.removal_table().to_string().lines() {
                println!("    {}", line);
            }
        }
    }
}
