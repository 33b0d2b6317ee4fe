//! Data types used throughout the figtok library.
//!
//! This module is organized by domain:
//! - [`figma`] - Figma document tree types (input)
//! - [`token`] - Token records (output and snapshot)

pub mod figma;
pub mod token;

pub use figma::{Color, DesignNode, Effect, Paint, Rect, TypeStyle, Vector};
pub use token::{Property, Token, TokenKind, TokenValue};
