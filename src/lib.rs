//! Mental-health companion: concern analysis, reply selection and content
//! recommendation for a chatbot, plus the small HTTP API that serves them.

pub mod catalog;
pub mod config;
pub mod db;
pub mod domain;
pub mod middleware;
pub mod services;
pub mod state;
pub mod web;
