use std::thread::JoinHandle;

use crossbeam_channel::{unbounded, Receiver, Sender};
use log::debug;

#[cfg(feature = "colorized_output")]
use console::style;

use fdsn_features::fetcher::{FetcherEvent, Severity};

/// Prints fetcher events to stderr from a background thread
pub struct Reporter {
    sender: Sender<FetcherEvent>,
    handle: JoinHandle<()>,
}

impl Reporter {
    /// Start the printing thread
    pub fn spawn() -> Self {
        let (sender, receiver) = unbounded();
        let handle = std::thread::spawn(move || report(receiver));
        Self { sender, handle }
    }

    /// A sender to hand to a fetcher
    pub fn sender(&self) -> Sender<FetcherEvent> {
        self.sender.clone()
    }

    /// Wait until every sender is gone and all events are printed
    pub fn join(self) {
        drop(self.sender);
        if self.handle.join().is_err() {
            eprintln!("Report thread panicked");
        }
    }
}

fn report(receiver: Receiver<FetcherEvent>) {
    for event in receiver {
        match event {
            FetcherEvent::State(state) => debug!("State: {:?}", state),
            FetcherEvent::Progress { received, overall, .. } => {
                debug!("Received {} bytes ({:.0}% overall)", received, overall * 100.0)
            }
            FetcherEvent::Message { severity, text } => eprintln!("{}", format_message(severity, &text)),
            FetcherEvent::LimitExceeded(limit) => {
                let strategies: Vec<_> = limit.strategies.iter().map(|s| format!("{:?}", s)).collect();
                eprintln!(
                    "{}",
                    format_message(
                        Severity::Warning,
                        &format!(
                            "Limit of {} records reached; split with: {}",
                            limit.limit,
                            strategies.join(", ")
                        )
                    )
                );
            }
            FetcherEvent::Finished { records } => debug!("Finished with {} records", records),
            FetcherEvent::Failed(reason) => eprintln!("{}", format_message(Severity::Critical, &reason)),
            FetcherEvent::Cancelled => eprintln!("{}", format_message(Severity::Warning, "Cancelled")),
        }
    }
}

/// One message line, colored by severity when the console feature is on
pub fn format_message(severity: Severity, text: &str) -> String {
    #[cfg(feature = "colorized_output")]
    {
        let label = match severity {
            Severity::Info => style("INFO").green().bold(),
            Severity::Warning => style("WARNING").yellow().bold(),
            Severity::Critical => style("CRITICAL").red().bold(),
        };
        format!("[{}] {}", label, text)
    }

    #[cfg(not(feature = "colorized_output"))]
    {
        let label = match severity {
            Severity::Info => "INFO",
            Severity::Warning => "WARNING",
            Severity::Critical => "CRITICAL",
        };
        format!("[{}] {}", label, text)
    }
}
