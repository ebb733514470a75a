mod notifier;

pub use notifier::{INotifier, InMemoryNotifier, LogNotifier, SentNotification, SmtpNotifier};
