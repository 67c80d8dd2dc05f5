use colored::Colorize;
use pagesflow_core::{MessageLevel, MessageSink};

/// 端末へメッセージを出力する
pub struct TerminalSink;

impl MessageSink for TerminalSink {
    fn add(&self, level: MessageLevel, text: &str) {
        match level {
            MessageLevel::Status => println!("{} {}", "✓".green(), text.green().bold()),
            MessageLevel::Error => eprintln!("{} {}", "✗".red(), text.red()),
        }
    }
}
