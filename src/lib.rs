//! # pageflow
//!
//! Headless, deterministic page-interaction controllers: scroll-spy
//! navigation, transient notifications, counter animations, a keyed modal,
//! declarative form validation, theme persistence, and rotating content.
//!
//! pageflow models a page as a flat slotmap arena of elements with classes,
//! text, and geometry, and drives all interactive state through explicit
//! controller objects. Every deferred behavior runs on a virtual-time timer
//! wheel, so nothing here sleeps and everything is testable to the
//! millisecond.
//!
//! ## Core Systems
//!
//! - **[`page`]** — Slotmap-backed element arena with classes and queries
//! - **[`geometry`]** — Bounds, viewport, and visible-fraction math
//! - **[`event`]** — Backend-neutral synthetic input events
//! - **[`timer`]** — Virtual-time timer wheel with typed tasks
//! - **[`notify`]** — Single-slot notifications with timed auto-dismiss
//! - **[`counter`]** — One-shot count-up animations for stat displays
//! - **[`scrollspy`]** — Active-section tracking, header compaction, back-to-top
//! - **[`viewport`]** — Visibility watches for reveals and counter triggers
//! - **[`modal`]** — Four-state modal fed from a keyed content source
//! - **[`form`]** — Rule-driven validation and simulated submission
//! - **[`theme`]** — Light/dark themes with pluggable persistence
//! - **[`rotator`]** — Auto-advancing rotating content with dots
//! - **[`app`]** — Application context tying everything together
//! - **[`testing`]** — Headless [`Harness`](testing::Harness) driver

// Foundation
pub mod event;
pub mod geometry;
pub mod page;
pub mod timer;

// Controllers
pub mod counter;
pub mod form;
pub mod modal;
pub mod notify;
pub mod rotator;
pub mod scrollspy;
pub mod theme;
pub mod viewport;

// Application
pub mod app;

// Test utilities
pub mod testing;
