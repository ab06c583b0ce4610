//! Output formatting for the CLI.

use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use rocket_cart::Notifier;
use rocket_core::Cart;

/// Output handler for CLI messages.
#[derive(Debug, Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    /// Create a new output handler.
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    /// Print an info message.
    pub fn info(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("ℹ").blue(), msg);
    }

    /// Print a success message.
    pub fn success(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("✓").green(), msg);
    }

    /// Print an error message.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
            return;
        }
        eprintln!("{} {}", style("✗").red(), style(msg).red());
    }

    /// Print a cart notification. Shown in JSON mode too, on stderr.
    pub fn notify(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "notification": msg }));
            return;
        }
        eprintln!("{} {}", style("!").yellow().bold(), style(msg).yellow());
    }

    /// Print a debug message (only in verbose mode).
    pub fn debug(&self, msg: &str) {
        if !self.verbose || self.json {
            return;
        }
        eprintln!("{} {}", style("→").dim(), style(msg).dim());
    }

    /// Print a header/title.
    pub fn header(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print JSON output.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string_pretty(value) {
            println!("{}", json);
        }
    }

    /// Print a key-value pair.
    pub fn kv(&self, key: &str, value: &str) {
        if self.json {
            return;
        }
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a table row.
    pub fn table_row(&self, cols: &[&str], widths: &[usize]) {
        if self.json {
            return;
        }
        let formatted: Vec<String> = cols
            .iter()
            .zip(widths.iter())
            .map(|(col, width)| format!("{:width$}", col, width = width))
            .collect();
        println!("  {}", formatted.join("  "));
    }

    /// Print the cart as a table.
    pub fn cart_table(&self, cart: &Cart) {
        if self.json {
            return;
        }
        if cart.is_empty() {
            self.info("Cart is empty");
            return;
        }

        const WIDTHS: [usize; 4] = [6, 32, 6, 10];
        println!();
        self.table_row(&["ID", "PRODUCT", "QTY", "PRICE"], &WIDTHS);
        for item in cart.items() {
            let id = item.id().to_string();
            let title = truncate(&item.product.title, WIDTHS[1]);
            let amount = item.amount.to_string();
            let price = format_price(item.product.price);
            self.table_row(&[&id, &title, &amount, &price], &WIDTHS);
        }

        println!("\n  {} units", cart.item_count());
    }

    /// Create a spinner for indeterminate progress.
    pub fn spinner(&self, msg: &str) -> ProgressBar {
        if self.json {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }

    /// Check if verbose mode is enabled.
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Check if JSON mode is enabled.
    pub fn is_json(&self) -> bool {
        self.json
    }
}

/// Prints cart notifications to the terminal without tearing a running spinner.
pub struct ConsoleNotifier {
    output: Output,
    progress: ProgressBar,
}

impl ConsoleNotifier {
    pub fn new(output: Output, progress: ProgressBar) -> Self {
        Self { output, progress }
    }
}

impl Notifier for ConsoleNotifier {
    fn report_error(&self, message: &str) {
        self.progress.suspend(|| self.output.notify(message));
    }
}

/// Format a price with two decimals.
pub fn format_price(value: f64) -> String {
    format!("{:.2}", value)
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut out: String = text.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(139.9), "139.90");
        assert_eq!(format_price(0.0), "0.00");
        assert_eq!(format_price(1234.567), "1234.57");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Tênis", 10), "Tênis");
        assert_eq!(truncate("Tênis de Caminhada", 8), "Tênis d…");
        assert_eq!(truncate("Tênis de Caminhada", 8).chars().count(), 8);
    }
}
