use crossbeam::channel::{Sender, unbounded};
use indicatif::ProgressBar;
use std::thread;
use std::time::Duration;

/// Message sent from the import worker to the progress consumer
#[derive(Clone, Debug)]
pub enum ImportMessage {
    Started { total: usize },
    /// Running count of committed records
    Committed(usize),
    Finished,
}

/// Drives an import progress bar from a channel of committed counts.
///
/// The store's import observer sends on the channel; a consumer thread owns
/// the bar. Dropping every sender ends the thread.
pub struct ProgressManager {
    bar: ProgressBar,
    _handle: thread::JoinHandle<()>,
}

impl ProgressManager {
    pub fn new(total: usize) -> (Self, Sender<ImportMessage>) {
        let (tx, rx) = unbounded::<ImportMessage>();

        let bar = ProgressBar::new(total as u64).with_message("Importing fields");
        let bar = if console::Term::stdout().is_term() {
            bar
        } else {
            ProgressBar::hidden()
        };

        let bar_clone = bar.clone();
        let handle = thread::spawn(move || {
            for msg in rx {
                match msg {
                    ImportMessage::Started { total } => {
                        bar_clone.set_length(total as u64);
                    }
                    ImportMessage::Committed(count) => {
                        bar_clone.set_position(count as u64);
                    }
                    ImportMessage::Finished => {
                        bar_clone.finish_with_message("Done");
                    }
                }
            }
        });

        (
            Self {
                bar,
                _handle: handle,
            },
            tx,
        )
    }

    pub fn clear(&self) {
        self.bar.finish_and_clear();
    }
}

pub struct Spinner {
    pb: ProgressBar,
}

impl Spinner {
    pub fn new(message: &str) -> Self {
        let pb = ProgressBar::new_spinner();
        pb.set_message(message.to_string());
        if console::Term::stdout().is_term() {
            pb.enable_steady_tick(Duration::from_millis(100));
        }
        Self { pb }
    }

    pub fn set_message(&self, msg: &str) {
        self.pb.set_message(msg.to_string());
    }

    pub fn finish_with_message(&self, msg: &str) {
        self.pb.finish_with_message(msg.to_string());
    }

    pub fn finish_and_clear(&self) {
        self.pb.finish_and_clear();
    }
}
