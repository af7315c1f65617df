//! Navigation state machine and query-channel reconciliation.
//!
//! The wizard has two sources of truth for "which screen is shown": the
//! in-memory [`NavigationState`] mutated by user actions, and an external
//! [`QueryChannel`] carrying deep-link requests (the moral equivalent of
//! URL query parameters). The channel always wins: it is drained into the
//! state in a single [`reconcile`](NavigationState::reconcile) step at the
//! start of each render cycle, then cleared so the same request is never
//! applied twice.

use tracing::debug;

use crate::catalog::{Tool, find_tool};
use crate::screen::ScreenId;

/// What leaving the Configure screen via "Back" does to `selected_tool`.
///
/// The reference behavior keeps the selection so re-entering Configure
/// lands on the same tool; clearing is available as a policy knob.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackPolicy {
    #[default]
    KeepSelection,
    ClearSelection,
}

/// Result of selecting a tool on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    /// The tool has an adapter — the wizard moved to the Configure screen.
    Configure,
    /// No adapter yet — a one-shot notice was queued, screen unchanged.
    ComingSoon,
}

/// External event inbox for deep links.
///
/// Writers (CLI flags at startup, in-UI shortcuts) set `page` and
/// optionally `tool`; [`NavigationState::reconcile`] drains both keys at
/// once. Single-session, single-writer — no locking needed.
#[derive(Debug, Clone, Default)]
pub struct QueryChannel {
    page: Option<String>,
    tool: Option<String>,
}

impl QueryChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a deep-link request. `None` keys are left untouched so a
    /// bare `tool=` request keeps working.
    pub fn request(&mut self, page: Option<&str>, tool: Option<&str>) {
        if let Some(p) = page {
            self.page = Some(p.to_owned());
        }
        if let Some(t) = tool {
            self.tool = Some(t.to_owned());
        }
    }

    /// Whether anything is queued.
    pub fn is_empty(&self) -> bool {
        self.page.is_none() && self.tool.is_none()
    }

    fn take(&mut self) -> (Option<String>, Option<String>) {
        (self.page.take(), self.tool.take())
    }
}

/// Per-session navigation state. Constructed once at session start and
/// mutated only through the transition operations below.
#[derive(Debug, Clone)]
pub struct NavigationState {
    current: ScreenId,
    selected_tool: Option<String>,
    pending_notice: Option<String>,
    back_policy: BackPolicy,
}

impl Default for NavigationState {
    fn default() -> Self {
        Self::new(BackPolicy::default())
    }
}

impl NavigationState {
    pub fn new(back_policy: BackPolicy) -> Self {
        Self {
            current: ScreenId::Home,
            selected_tool: None,
            pending_notice: None,
            back_policy,
        }
    }

    /// The screen shown this render cycle.
    pub fn current(&self) -> ScreenId {
        self.current
    }

    /// Tool chosen on the grid, if any.
    pub fn selected_tool(&self) -> Option<&str> {
        self.selected_tool.as_deref()
    }

    // ── Transition operations ────────────────────────────────────────

    /// "Begin" on the landing screen: Home → ChooseTool.
    pub fn begin(&mut self) {
        debug!(from = %self.current, "begin → choose_tool");
        self.current = ScreenId::ChooseTool;
    }

    /// Select a tool on the grid. With an adapter this moves to
    /// Configure and records the selection; without one it queues a
    /// one-shot notice and stays on the grid.
    pub fn select_tool(&mut self, tool: &Tool) -> SelectOutcome {
        if tool.adapter_key.is_some() {
            debug!(tool = tool.name, "select → configure");
            self.selected_tool = Some(tool.name.to_owned());
            self.current = ScreenId::Configure;
            SelectOutcome::Configure
        } else {
            debug!(tool = tool.name, "select → coming soon");
            self.pending_notice = Some(tool.name.to_owned());
            self.current = ScreenId::ChooseTool;
            SelectOutcome::ComingSoon
        }
    }

    /// Select a tool by free-text identifier (deep links). Unknown
    /// identifiers behave like tools without an adapter: notice, grid.
    pub fn select_tool_named(&mut self, identifier: &str) -> SelectOutcome {
        match find_tool(identifier) {
            Some(tool) => self.select_tool(tool),
            None => {
                debug!(tool = identifier, "unknown tool in deep link");
                self.pending_notice = Some(identifier.trim().to_owned());
                self.current = ScreenId::ChooseTool;
                SelectOutcome::ComingSoon
            }
        }
    }

    /// "Back": one step toward the landing screen. Whether leaving
    /// Configure drops the selection is governed by [`BackPolicy`].
    pub fn back(&mut self) {
        match self.current {
            ScreenId::Configure => {
                if self.back_policy == BackPolicy::ClearSelection {
                    self.selected_tool = None;
                }
                self.current = ScreenId::ChooseTool;
            }
            ScreenId::ChooseTool => self.current = ScreenId::Home,
            ScreenId::Home => {}
        }
    }

    /// "Home": jump to the landing screen from anywhere. Leaving
    /// Configure always drops the selection on this path.
    pub fn home(&mut self) {
        if self.current == ScreenId::Configure {
            self.selected_tool = None;
        }
        self.current = ScreenId::Home;
    }

    /// Consume the one-shot notice, if any. The owning screen calls this
    /// on its next render; afterwards the notice is gone.
    pub fn take_notice(&mut self) -> Option<String> {
        self.pending_notice.take()
    }

    // ── Reconciliation ───────────────────────────────────────────────

    /// Drain the external channel into this state.
    ///
    /// Returns `true` when anything was adopted — the caller must restart
    /// the render cycle so the new screen is dispatched immediately. A
    /// `page` equal to the current screen (with no `tool`) is a no-op and
    /// leaves the channel untouched, matching the reference behavior;
    /// once a request has been adopted the channel is cleared, so feeding
    /// the same value twice never restarts twice.
    pub fn reconcile(&mut self, channel: &mut QueryChannel) -> bool {
        let page_differs = channel
            .page
            .as_deref()
            .is_some_and(|p| ScreenId::from_param(p) != self.current);
        if !page_differs && channel.tool.is_none() {
            return false;
        }

        let (page, tool) = channel.take();
        if let Some(raw) = page {
            let target = ScreenId::from_param(&raw);
            if target != self.current {
                debug!(from = %self.current, to = %target, "adopting deep link");
                self.current = target;
            }
        }
        // A tool identifier bypasses the grid: perform the equivalent of
        // the grid selection directly.
        if let Some(identifier) = tool {
            self.select_tool_named(&identifier);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{BackPolicy, NavigationState, QueryChannel, SelectOutcome};
    use crate::catalog::find_tool;
    use crate::screen::ScreenId;

    fn nav() -> NavigationState {
        NavigationState::default()
    }

    #[test]
    fn begin_moves_home_to_choose_tool() {
        let mut state = nav();
        state.begin();
        assert_eq!(state.current(), ScreenId::ChooseTool);
    }

    #[test]
    fn selecting_adapter_tool_opens_configure() {
        let mut state = nav();
        state.begin();
        let tableau = find_tool("Tableau").expect("catalog");
        assert_eq!(state.select_tool(tableau), SelectOutcome::Configure);
        assert_eq!(state.current(), ScreenId::Configure);
        assert_eq!(state.selected_tool(), Some("Tableau"));
    }

    #[test]
    fn selecting_unimplemented_tool_queues_notice_and_stays() {
        let mut state = nav();
        state.begin();
        let powerbi = find_tool("Power BI").expect("catalog");
        assert_eq!(state.select_tool(powerbi), SelectOutcome::ComingSoon);
        assert_eq!(state.current(), ScreenId::ChooseTool);
        assert_eq!(state.take_notice().as_deref(), Some("Power BI"));
        // One-shot: consumed on first take.
        assert_eq!(state.take_notice(), None);
    }

    #[test]
    fn back_keeps_selection_by_default() {
        let mut state = nav();
        state.begin();
        state.select_tool(find_tool("Tableau").expect("catalog"));
        state.back();
        assert_eq!(state.current(), ScreenId::ChooseTool);
        assert_eq!(state.selected_tool(), Some("Tableau"));
    }

    #[test]
    fn back_clears_selection_under_clear_policy() {
        let mut state = NavigationState::new(BackPolicy::ClearSelection);
        state.begin();
        state.select_tool(find_tool("Tableau").expect("catalog"));
        state.back();
        assert_eq!(state.current(), ScreenId::ChooseTool);
        assert_eq!(state.selected_tool(), None);
    }

    #[test]
    fn home_from_configure_clears_selection() {
        let mut state = nav();
        state.begin();
        state.select_tool(find_tool("Tableau").expect("catalog"));
        state.home();
        assert_eq!(state.current(), ScreenId::Home);
        assert_eq!(state.selected_tool(), None);
    }

    #[test]
    fn reconcile_adopts_differing_page_and_clears_channel() {
        let mut state = nav();
        let mut channel = QueryChannel::new();
        channel.request(Some("choose_tool"), None);

        assert!(state.reconcile(&mut channel));
        assert_eq!(state.current(), ScreenId::ChooseTool);
        assert!(channel.is_empty());

        // Second cycle: channel cleared, no restart signal.
        assert!(!state.reconcile(&mut channel));
    }

    #[test]
    fn reconcile_same_page_is_a_no_op() {
        let mut state = nav();
        let mut channel = QueryChannel::new();
        channel.request(Some("home"), None);
        assert!(!state.reconcile(&mut channel));
        assert_eq!(state.current(), ScreenId::Home);
    }

    #[test]
    fn reconcile_fails_closed_on_bogus_page() {
        let mut state = nav();
        state.begin();
        let mut channel = QueryChannel::new();
        channel.request(Some("bogus"), None);
        assert!(state.reconcile(&mut channel));
        assert_eq!(state.current(), ScreenId::Home);
    }

    #[test]
    fn reconcile_with_tool_bypasses_the_grid() {
        let mut state = nav();
        let mut channel = QueryChannel::new();
        channel.request(Some("configure"), Some("tableau"));

        assert!(state.reconcile(&mut channel));
        assert_eq!(state.current(), ScreenId::Configure);
        assert_eq!(state.selected_tool(), Some("Tableau"));
        assert!(channel.is_empty());
    }

    #[test]
    fn reconcile_with_unimplemented_tool_lands_on_grid_with_notice() {
        let mut state = nav();
        let mut channel = QueryChannel::new();
        channel.request(Some("configure"), Some("Cognos"));

        assert!(state.reconcile(&mut channel));
        assert_eq!(state.current(), ScreenId::ChooseTool);
        assert_eq!(state.take_notice().as_deref(), Some("Cognos"));
    }

    #[test]
    fn reconcile_with_unknown_tool_notices_the_raw_identifier() {
        let mut state = nav();
        let mut channel = QueryChannel::new();
        channel.request(None, Some("Qlik"));

        assert!(state.reconcile(&mut channel));
        assert_eq!(state.current(), ScreenId::ChooseTool);
        assert_eq!(state.take_notice().as_deref(), Some("Qlik"));
    }

    /// The end-to-end walkthrough from the wizard's expected use.
    #[test]
    fn wizard_walkthrough() {
        let mut state = nav();
        assert_eq!(state.current(), ScreenId::Home);

        state.begin();
        assert_eq!(state.current(), ScreenId::ChooseTool);

        let powerbi = find_tool("Power BI").expect("catalog");
        state.select_tool(powerbi);
        assert_eq!(state.current(), ScreenId::ChooseTool);
        assert_eq!(state.take_notice().as_deref(), Some("Power BI"));

        let tableau = find_tool("Tableau").expect("catalog");
        state.select_tool(tableau);
        assert_eq!(state.current(), ScreenId::Configure);
        assert_eq!(state.selected_tool(), Some("Tableau"));
    }
}
