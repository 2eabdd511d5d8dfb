pub mod channel_banned_phrase;
pub mod flagged_message;
