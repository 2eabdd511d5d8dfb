pub mod filter;
pub mod moderation;
