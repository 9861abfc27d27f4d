//! Domain services used by websocket and HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own the membership registry and persistence concerns so
//! route handlers can stay focused on protocol translation.

pub mod room;
pub mod session;
