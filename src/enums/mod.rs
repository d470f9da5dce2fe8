pub mod commands;
pub mod ecosystem;
pub mod alert_action;
pub mod gemini_error;
