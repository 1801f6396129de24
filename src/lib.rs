// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits (thresholds in clippy.toml)
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Procedurally animated robot eyes for small bitmap displays.
//!
//! Two rounded-rectangle eyes glance around, blink, close, squint into
//! expressions and, in curious mode, swell toward whatever they look at.
//! Everything is drawn on the CPU and handed to a [`sink::DisplaySink`].
//!
//! # Key entry points
//!
//! - [`engine::FaceEngine`] - spawns the render thread and returns a
//!   [`engine::FaceHandle`] for issuing commands
//! - [`options::Options`] - runtime configuration (screen, render, eye
//!   shapes, idle behavior)
//! - [`sink::DriverRegistry`] - builds a sink from the `[screen]` section
//! - [`script::Script`] - TOML command sequences, including the built-in
//!   demo
//!
//! # Architecture
//!
//! A single `face-render` thread owns the face state through an
//! [`animation::FaceAnimator`]. Each tick it advances the active command by
//! one step, publishes a snapshot through a lock-free triple buffer,
//! rasterizes the state with [`renderer::FaceRenderer`] using the pure
//! functions in [`geometry`], and presents the frame. Commands and frames
//! advance in lockstep, so motion speed is measured in pixels per frame.

pub mod animation;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod options;
pub mod renderer;
pub mod script;
pub mod sink;
pub mod util;
