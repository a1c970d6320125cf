//! Collaborators the handlers talk to: a yes/no prompt and a notification sink.

/// Blocking yes/no question to the user.
pub trait ConfirmPrompt {
    fn confirm(&mut self, message: &str) -> bool;
}

/// Fire-and-forget message display.
pub trait Notifier {
    fn notify(&mut self, message: &str);
}

/// Answers every question the same way. Useful for scripted sessions.
#[derive(Debug, Clone, Copy)]
pub struct FixedAnswer(pub bool);

impl ConfirmPrompt for FixedAnswer {
    fn confirm(&mut self, message: &str) -> bool {
        tracing::debug!(message, answer = self.0, "confirmation answered automatically");
        self.0
    }
}

/// Collects notifications in memory.
#[derive(Debug, Clone, Default)]
pub struct NotificationLog {
    pub messages: Vec<String>,
}

impl Notifier for NotificationLog {
    fn notify(&mut self, message: &str) {
        self.messages.push(message.to_string());
    }
}
