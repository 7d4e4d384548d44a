//! Author Chat
//!
//! WhatsApp service that lets users talk to an author. Every question is
//! answered once per book the author wrote, and the answers are merged into a
//! single reply in the author's voice.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod shared;
