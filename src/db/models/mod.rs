mod channel_banned_phrase;
mod flagged_message;

pub use channel_banned_phrase::ChannelBannedPhrase;
pub use flagged_message::{FlagAction, FlaggedMessage};
