//! Navigation core for the bi4bi configuration wizard.
//!
//! This crate owns the pieces of the wizard that are independent of any
//! rendering toolkit:
//!
//! - **[`ScreenId`]** — the fixed set of wizard screens and their query
//!   channel wire values (`home` / `choose_tool` / `configure`).
//! - **[`NavigationState`]** — per-session screen state, mutated only
//!   through explicit transition operations ([`begin`](NavigationState::begin),
//!   [`select_tool`](NavigationState::select_tool),
//!   [`back`](NavigationState::back), [`home`](NavigationState::home)).
//! - **[`QueryChannel`]** — an external event inbox carrying deep-link
//!   requests (`page=` / `tool=`), drained once per render cycle by
//!   [`NavigationState::reconcile`].
//! - **[`catalog`]** — the fixed list of BI tools and which of them have a
//!   backend adapter.
//!
//! No I/O happens here; the host (the TUI binary) feeds the channel and
//! drives render cycles.

pub mod catalog;
pub mod nav;
pub mod screen;

pub use catalog::{DEFAULT_TOOL, TOOLS, Tool, find_tool};
pub use nav::{BackPolicy, NavigationState, QueryChannel, SelectOutcome};
pub use screen::ScreenId;
