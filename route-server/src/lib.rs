//! Bus route planner server.
//!
//! A web application that answers: "Which bus do I take from this stop to
//! that one, and where do I change?"

pub mod config;
pub mod distance;
pub mod domain;
pub mod logger;
pub mod planner;
pub mod store;
pub mod web;
