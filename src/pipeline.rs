//! Reply resolution for one chat submission: turn the outcome of the
//! remote generation attempt into exactly one bot reply. The chat never
//! shows a technical error; every failure is absorbed into a scripted
//! conversational reply.

use crate::inference::InferenceError;
use crate::menu::MenuItem;

/// First bot message of every session.
pub const WELCOME: &str = "Welcome to Pizza Hut! 🍕 How can I help you today?";

/// Stand-in when the endpoint answered 2xx but the body had no usable text.
const PLACEHOLDER_REPLY: &str = "I'm not sure, but I can get you some pizza!";

const GREETING_REPLY: &str = "Hello! 👋 Welcome to Pizza Hut. What would you like to order?";

const MENU_REPLY: &str =
    "We have Large Pizza (1500), Medium (1000), Small (500), and delicious Burgers! 🍔";

const UPSELL_REPLY: &str = "I'd love to help you order! We have pizzas, burgers, and drinks. 🍕🍔🥤";

/// Shown when the request never reached the endpoint at all.
const OFFLINE_REPLY: &str =
    "Sorry, I'm having trouble connecting right now, but I can still take your order!";

/// Resolve the bot reply for a submission. `input` is the raw submitted
/// text and `item` the menu item matched during submission, if any.
///
/// Remote rejections (non-2xx) fall through to the scripted ladder;
/// transport failures get the fixed connectivity apology instead.
pub fn resolve_reply(
    outcome: Result<Option<String>, InferenceError>,
    input: &str,
    item: Option<&MenuItem>,
) -> String {
    match outcome {
        Ok(Some(text)) => text,
        Ok(None) => PLACEHOLDER_REPLY.to_string(),
        Err(InferenceError::Rejected(_)) => fallback_reply(input, item),
        Err(InferenceError::Transport(_)) | Err(InferenceError::TaskFailed) => {
            OFFLINE_REPLY.to_string()
        }
    }
}

/// Scripted fallback ladder. Rules are checked in priority order and
/// exactly one fires.
fn fallback_reply(input: &str, item: Option<&MenuItem>) -> String {
    let lower = input.to_lowercase();
    if let Some(item) = item {
        format!(
            "Great choice! Here is your {}. That will be {} PKR. 😋",
            item.name, item.price
        )
    } else if lower.contains("hello") || lower.contains("hi") {
        GREETING_REPLY.to_string()
    } else if lower.contains("price") || lower.contains("menu") {
        MENU_REPLY.to_string()
    } else {
        UPSELL_REPLY.to_string()
    }
}
