pub mod banned;
