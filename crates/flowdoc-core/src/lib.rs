//! Flowdoc Core Types and Drawing Primitives
//!
//! This crate provides the foundational types for rendering Flowdoc
//! flowcharts. It includes:
//!
//! - **Colors**: CSS color parsing and conversion ([`color::Color`])
//! - **Geometry**: Points, sizes and bounds in page space ([`geometry`] module)
//! - **Fonts**: Base-14 font metrics and WinAnsi text encoding ([`font`] module)
//! - **Draw**: Shape, arrow, stroke and text definitions together with the
//!   [`draw::Canvas`] trait they render onto ([`draw`] module)

pub mod color;
pub mod draw;
pub mod font;
pub mod geometry;
