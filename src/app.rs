use tokio::task::JoinHandle;

use crate::config::Config;
use crate::inference::{InferenceClient, InferenceError};
use crate::menu::{self, MenuItem};
use crate::pipeline;
use crate::theme::Theme;

#[derive(Debug, Clone)]
pub struct Message {
    pub text: String,
    pub from_bot: bool,
}

/// Per-submission state machine. `Submitting` means one generation request
/// is in flight; further submissions are ignored until it resolves.
/// Resolution returns to `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Idle,
    Submitting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing,
}

pub struct App {
    pub should_quit: bool,
    pub input_mode: InputMode,

    // Conversation state (append-only, insertion order is display order)
    pub messages: Vec<Message>,
    pub current_item: Option<&'static MenuItem>,
    pub pipeline: PipelineState,

    // Input line state
    pub input: String,
    pub cursor: usize, // char index into input

    // Chat viewport (dimensions updated during render)
    pub chat_scroll: u16,
    pub chat_height: u16,
    pub chat_width: u16,

    // Loading indicator animation, 0-2 for the ellipsis
    pub animation_frame: u8,

    pub theme: Theme,

    pub client: InferenceClient,
    pub inference_task: Option<JoinHandle<Result<Option<String>, InferenceError>>>,

    // Raw text of the in-flight submission, for fallback resolution
    pending_text: Option<String>,
}

impl App {
    pub fn new(config: &Config) -> Self {
        let client = InferenceClient::new(&config.resolve_endpoint(), config.resolve_token());

        Self {
            should_quit: false,
            input_mode: InputMode::Normal,

            messages: vec![Message {
                text: pipeline::WELCOME.to_string(),
                from_bot: true,
            }],
            current_item: None,
            pipeline: PipelineState::Idle,

            input: String::new(),
            cursor: 0,

            chat_scroll: 0,
            chat_height: 0,
            chat_width: 0,

            animation_frame: 0,

            theme: Theme::new(),

            client,
            inference_task: None,

            pending_text: None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.pipeline == PipelineState::Submitting
    }

    /// Start one submission from the current input line. Returns the text
    /// to send to the inference endpoint, or `None` when the submission is
    /// rejected (blank input, or a request already in flight).
    ///
    /// Appends the user message, re-runs item detection (clearing any
    /// previously displayed item), and enters `Submitting`.
    pub fn begin_submission(&mut self) -> Option<String> {
        if self.pipeline != PipelineState::Idle || self.input.trim().is_empty() {
            return None;
        }

        let text = std::mem::take(&mut self.input);
        self.cursor = 0;

        self.messages.push(Message {
            text: text.clone(),
            from_bot: false,
        });
        self.current_item = menu::find_item(&text);
        self.pipeline = PipelineState::Submitting;
        self.pending_text = Some(text.clone());
        self.scroll_to_bottom();

        Some(text)
    }

    /// Finish the in-flight submission: append exactly one bot reply and
    /// return to `Idle`. Every outcome, including failure, produces a
    /// conversational reply.
    pub fn resolve(&mut self, outcome: Result<Option<String>, InferenceError>) {
        let input = self.pending_text.take().unwrap_or_default();
        let reply = pipeline::resolve_reply(outcome, &input, self.current_item);

        self.messages.push(Message {
            text: reply,
            from_bot: true,
        });
        self.pipeline = PipelineState::Idle;
        self.scroll_to_bottom();
    }

    /// Advance the "Typing..." ellipsis while a request is in flight.
    pub fn tick_animation(&mut self) {
        if self.is_loading() {
            self.animation_frame = (self.animation_frame + 1) % 3;
        }
    }

    pub fn scroll_up(&mut self) {
        self.chat_scroll = self.chat_scroll.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        self.chat_scroll = self.chat_scroll.saturating_add(1);
    }

    /// Scroll the chat so the newest message (and the loading indicator)
    /// is visible.
    pub fn scroll_to_bottom(&mut self) {
        let wrap_width = if self.chat_width > 0 {
            self.chat_width as usize
        } else {
            50
        };

        let mut total_lines: u16 = 0;
        for msg in &self.messages {
            total_lines += 1; // sender line
            for line in msg.text.lines() {
                let char_count = line.chars().count();
                if char_count == 0 {
                    total_lines += 1;
                } else {
                    total_lines += ((char_count / wrap_width) + 1) as u16;
                }
            }
            total_lines += 1; // blank line between messages
        }

        if self.is_loading() {
            total_lines += 2; // sender line + "Typing..."
        }

        let visible = if self.chat_height > 0 {
            self.chat_height
        } else {
            20
        };

        self.chat_scroll = total_lines.saturating_sub(visible);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    fn test_app() -> App {
        App::new(&Config::new())
    }

    #[test]
    fn starts_idle_with_the_welcome_message() {
        let app = test_app();
        assert_eq!(app.pipeline, PipelineState::Idle);
        assert_eq!(app.messages.len(), 1);
        assert!(app.messages[0].from_bot);
        assert_eq!(
            app.messages[0].text,
            "Welcome to Pizza Hut! 🍕 How can I help you today?"
        );
    }

    #[test]
    fn blank_input_is_a_no_op() {
        let mut app = test_app();
        for input in ["", "   ", "\t \n"] {
            app.input = input.to_string();
            assert!(app.begin_submission().is_none());
            assert_eq!(app.messages.len(), 1);
            assert_eq!(app.pipeline, PipelineState::Idle);
        }
    }

    #[test]
    fn submission_appends_user_message_and_enters_submitting() {
        let mut app = test_app();
        app.input = "I want a large pizza".to_string();

        let sent = app.begin_submission().unwrap();
        assert_eq!(sent, "I want a large pizza");
        assert_eq!(app.messages.len(), 2);
        assert!(!app.messages[1].from_bot);
        assert_eq!(app.pipeline, PipelineState::Submitting);
        assert!(app.input.is_empty());

        let item = app.current_item.unwrap();
        assert_eq!(item.name, "Large Pizza");
        assert_eq!(item.price, 1500);
    }

    #[test]
    fn submission_while_in_flight_is_ignored() {
        let mut app = test_app();
        app.input = "hello".to_string();
        assert!(app.begin_submission().is_some());

        app.input = "hello again".to_string();
        assert!(app.begin_submission().is_none());
        assert_eq!(app.messages.len(), 2);
        // The rejected text stays in the input line.
        assert_eq!(app.input, "hello again");
    }

    #[test]
    fn each_submission_grows_the_conversation_by_exactly_two() {
        let mut app = test_app();
        app.input = "hello".to_string();
        app.begin_submission().unwrap();
        app.resolve(Ok(Some("Hi there!".into())));

        assert_eq!(app.messages.len(), 3);
        assert_eq!(app.pipeline, PipelineState::Idle);
        assert!(!app.is_loading());
        assert_eq!(app.messages[2].text, "Hi there!");
    }

    #[test]
    fn rate_limited_order_confirms_item_and_price() {
        let mut app = test_app();
        app.input = "I want a large pizza".to_string();
        app.begin_submission().unwrap();
        app.resolve(Err(InferenceError::Rejected(StatusCode::TOO_MANY_REQUESTS)));

        assert_eq!(
            app.messages.last().unwrap().text,
            "Great choice! Here is your Large Pizza. That will be 1500 PKR. 😋"
        );
        assert_eq!(app.current_item.unwrap().price, 1500);
    }

    #[test]
    fn network_failure_resolves_with_the_apology_and_stops_loading() {
        let mut app = test_app();
        app.input = "hello".to_string();
        app.begin_submission().unwrap();
        assert!(app.is_loading());

        app.resolve(Err(InferenceError::TaskFailed));
        assert!(!app.is_loading());
        assert_eq!(
            app.messages.last().unwrap().text,
            "Sorry, I'm having trouble connecting right now, but I can still take your order!"
        );
    }

    #[test]
    fn new_submission_clears_the_previous_display_item() {
        let mut app = test_app();
        app.input = "a small pizza".to_string();
        app.begin_submission().unwrap();
        app.resolve(Ok(Some("ok".into())));
        assert!(app.current_item.is_some());

        app.input = "thanks".to_string();
        app.begin_submission().unwrap();
        assert!(app.current_item.is_none());
    }

    #[test]
    fn repeated_submissions_are_evaluated_fresh() {
        let mut app = test_app();
        for _ in 0..2 {
            app.input = "what's on the menu".to_string();
            app.begin_submission().unwrap();
            app.resolve(Err(InferenceError::Rejected(StatusCode::UNAUTHORIZED)));
        }

        assert_eq!(app.messages.len(), 5);
        let menu_reply =
            "We have Large Pizza (1500), Medium (1000), Small (500), and delicious Burgers! 🍔";
        assert_eq!(app.messages[2].text, menu_reply);
        assert_eq!(app.messages[4].text, menu_reply);
    }
}
