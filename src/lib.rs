//! # Connect Four
//!
//! A two-player Connect Four game for the terminal, built with Ratatui.
//! Moves can be undone, scores and player names persist between runs, and a
//! win is celebrated with confetti.
//!
//! ## Modules
//!
//! - [`game`] — Core game logic: board, player, state machine, command session
//! - [`scores`] — Score tally and player names over a key-value store
//! - [`ui`] — Terminal UI: game view, confetti
//! - [`config`] — TOML configuration loading and validation
//! - [`error`] — Structured error types

pub mod config;
pub mod error;
pub mod game;
pub mod scores;
pub mod ui;
