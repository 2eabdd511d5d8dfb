pub mod action_service;
pub mod policy;
