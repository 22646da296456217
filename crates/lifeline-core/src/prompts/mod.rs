//! Prompt templates for the assist flow.

pub mod assist;

pub use assist::{assist_user_prompt, ASSIST_SYSTEM, ASSIST_USER_TEMPLATE};
