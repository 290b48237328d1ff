//! Emotion Support - Emotional support chat backend
//!
//! Each user turn records self-reported emotion data, analyzes the recent
//! pattern for trend and crisis risk, builds an ordered internal plan for the
//! reply, and hands plan, memory, and retrieved context to a language-model
//! agent.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
