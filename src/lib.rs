//! 3-D tilt and drag interaction engine for a rectangular card.
//!
//! Given a card's bounding rectangle and the pointer events aimed at it, this
//! crate computes the rotation (axis plus fraction of a turn) a renderer
//! should apply, and tracks the idle → pressed → dragging gesture that decides
//! how raw pointer deltas become tilt. The host owns event capture and
//! rendering; it forwards events in and applies the returned
//! [`card::Action`]s.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`geometry`] | Pure rectangle/cursor → rotation math |
//! | [`input`] | Pointer events, interaction state, transition hints |
//! | [`card`] | The per-card state machine and [`card::RectangleProvider`] |
//! | [`ticker`] | Cancellable per-card animation tick task |
//! | [`deck`] | Many independent cards keyed by id |
//! | [`config`] | Limits and timings, with environment overrides |
//! | [`error`] | Configuration errors |
//! | [`consts`] | Default limits and durations |

pub mod card;
pub mod config;
pub mod consts;
pub mod deck;
pub mod error;
pub mod geometry;
pub mod input;
pub mod ticker;
