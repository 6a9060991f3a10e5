//! Terminal presentation: banner, menu table and live progress

use crate::downloader::progress::{DownloadEvent, ProgressReporter};
use crate::utils::dependencies::{DependencyPrompt, ExternalTool, InstallCommand};
use console::style;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::collections::HashMap;
use std::io::{self, BufRead, Write};
use std::sync::Mutex;
use std::time::Duration;

const MENU_ITEMS: [(&str, &str); 5] = [
    ("1", "Download YouTube Playlist"),
    ("2", "Download Single Video"),
    ("3", "Configure Settings"),
    ("4", "Launch GUI"),
    ("5", "Exit"),
];

/// Welcome banner
pub fn banner() -> String {
    let lines = [
        format!("{}", style("YT to MP3 / Video Downloader").bold().blue()),
        String::new(),
        format!("{} {}", style("Version:").green(), env!("CARGO_PKG_VERSION")),
        format!(
            "{} Download YouTube videos and playlists as MP3 or video,",
            style("Description:").green()
        ),
        "             from the terminal or a desktop window.".to_string(),
    ];
    boxed("Welcome", &lines)
}

/// Numbered menu options
pub fn menu_table() -> String {
    let lines: Vec<String> = MENU_ITEMS
        .iter()
        .map(|(key, label)| format!("{}  {}", style(format!("[{}]", key)).cyan(), label))
        .collect();
    boxed("Menu Options", &lines)
}

fn boxed(title: &str, lines: &[String]) -> String {
    let width = lines
        .iter()
        .map(|l| console::measure_text_width(l))
        .max()
        .unwrap_or(0)
        .max(title.len() + 2);

    let mut out = String::new();
    let fill = width - title.len() - 1;
    out.push_str(&format!("╭─ {} {}╮\n", style(title).bold(), "─".repeat(fill)));
    for line in lines {
        let pad = width - console::measure_text_width(line);
        out.push_str(&format!("│ {}{} │\n", line, " ".repeat(pad)));
    }
    out.push_str(&format!("╰{}╯\n", "─".repeat(width + 2)));
    out
}

/// Live terminal progress: one spinner per in-flight video
pub struct TerminalReporter {
    multi: MultiProgress,
    bars: Mutex<HashMap<usize, ProgressBar>>,
}

impl Default for TerminalReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            bars: Mutex::new(HashMap::new()),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::with_template("{spinner:.green} {msg} [{elapsed}]")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn println(&self, line: String) {
        self.multi.suspend(|| println!("{}", line));
    }

    fn with_bar(&self, index: usize, f: impl FnOnce(&ProgressBar)) {
        if let Ok(bars) = self.bars.lock() {
            if let Some(bar) = bars.get(&index) {
                f(bar);
            }
        }
    }

    fn start_bar(&self, index: usize, message: String) {
        let bar = self.multi.add(ProgressBar::new_spinner());
        bar.set_style(Self::spinner_style());
        bar.set_message(message);
        bar.enable_steady_tick(Duration::from_millis(100));

        if let Ok(mut bars) = self.bars.lock() {
            if let Some(old) = bars.insert(index, bar) {
                old.finish_and_clear();
            }
        }
    }

    fn clear_bar(&self, index: usize) {
        if let Ok(mut bars) = self.bars.lock() {
            if let Some(bar) = bars.remove(&index) {
                bar.finish_and_clear();
                self.multi.remove(&bar);
            }
        }
    }
}

impl ProgressReporter for TerminalReporter {
    fn report(&self, event: DownloadEvent) {
        let text = event.status_text();
        match event {
            DownloadEvent::Preparing { .. } => {
                self.println(format!("\n{}\n", style(format!("[+] {}", text)).yellow()))
            }
            DownloadEvent::Probed { .. } | DownloadEvent::VideoStarted { .. } => {
                self.println(format!("{}", style(format!("[+] {}", text)).cyan()))
            }
            DownloadEvent::AttemptStarted { index, .. } => {
                self.start_bar(index, format!("{}", style(text).green()))
            }
            DownloadEvent::Output { index, line } => self.with_bar(index, |bar| bar.set_message(line)),
            DownloadEvent::RateLimited { index } => {
                self.with_bar(index, |bar| bar.set_message(format!("{}", style(text).red())))
            }
            DownloadEvent::AttemptFailed { index, .. } => {
                self.clear_bar(index);
                self.println(format!("{}", style(format!("❌ {}", text)).red()));
            }
            DownloadEvent::VideoCompleted { index, .. } => {
                self.clear_bar(index);
                self.println(format!("{}", style(format!("✅ {}", text)).green()));
            }
            DownloadEvent::VideoFailed { index, .. } => {
                self.clear_bar(index);
                self.println(format!("{}", style(format!("❌ {}", text)).red()));
            }
            DownloadEvent::Finished(_) => {
                self.println(format!("\n{}", style(format!("✅ {}", text)).green().bold()))
            }
        }
    }
}

/// Asks on the terminal before installing a missing tool
pub struct TerminalDependencyPrompt<R> {
    input: R,
}

impl TerminalDependencyPrompt<io::StdinLock<'static>> {
    pub fn stdin() -> Self {
        Self {
            input: io::stdin().lock(),
        }
    }
}

impl<R: BufRead> TerminalDependencyPrompt<R> {
    pub fn new(input: R) -> Self {
        Self { input }
    }
}

impl<R: BufRead> DependencyPrompt for TerminalDependencyPrompt<R> {
    fn confirm_install(&mut self, tool: ExternalTool, install: Option<&InstallCommand>) -> bool {
        eprintln!("{}", style(format!("[!] {} not found.", tool)).red());

        let Some(install) = install else {
            eprintln!(
                "{}",
                style(format!("[-] {} is required and cannot be installed automatically. Exiting...", tool)).red()
            );
            return false;
        };

        print!("Do you want to install {} with `{}`? (y/n): ", tool, install);
        let _ = io::stdout().flush();

        let mut answer = String::new();
        if self.input.read_line(&mut answer).is_err() {
            return false;
        }

        let yes = answer.trim().eq_ignore_ascii_case("y");
        if !yes {
            eprintln!("{}", style(format!("[-] {} is required. Exiting...", tool)).red());
        }
        yes
    }

    fn installing(&mut self, tool: ExternalTool) {
        println!("{}", style(format!("[+] Installing {}...", tool)).yellow());
    }

    fn installed(&mut self, tool: ExternalTool) {
        println!("{}", style(format!("[+] {} installed successfully!", tool)).green());
    }

    fn install_failed(&mut self, tool: ExternalTool, error: &str) {
        eprintln!("{}", style(format!("[-] Failed to install {}: {}", tool, error)).red());
    }
}
