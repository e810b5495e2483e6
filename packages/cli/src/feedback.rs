use colored::Colorize;
use gallery_editor::{Notifier, Toast};

/// Prints toasts to stderr
#[derive(Debug, Default)]
pub struct CliNotifier;

impl Notifier for CliNotifier {
    fn push_toast(&self, toast: Toast) {
        eprintln!("{} {}", "!".red().bold(), toast.message);
    }
}
