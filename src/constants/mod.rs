pub mod embeds;
pub mod filter;
