//! Services module
//!
//! This module contains external collaborators of the conversation flow

pub mod forms;

pub use forms::FormService;
