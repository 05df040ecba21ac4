//! # Debounced client search
//!
//! [`SearchState`] is the state machine behind [`ClientSearch`], the
//! autocomplete used wherever an admin picks a client (project creation,
//! invoice upload). It knows nothing about timers or rendering; the component
//! drives it with four events:
//!
//! | Event | Method | Effect |
//! |-------|--------|--------|
//! | keystroke | [`input`](SearchState::input) | Short query: clear candidates, close dropdown. Otherwise re-arm the [`DebounceSlot`] and return its [`Ticket`]. |
//! | quiet period elapsed | [`timer_fired`](SearchState::timer_fired) | If the ticket is still current, enter `Loading` and return the query to send. |
//! | response | [`resolved`](SearchState::resolved) | If the ticket is still current, show results (or the empty message). Errors clear the candidates. |
//! | click outside | [`outside_click`](SearchState::outside_click) | Close the dropdown, keep text and candidates. |
//! | pick a row | [`select`](SearchState::select) | Close the dropdown, copy the name into the input, return the candidate once. |
//!
//! Every keystroke bumps the slot's generation before anything is sent, so a
//! timer or response that belongs to an older keystroke can never touch the
//! state. The component additionally cancels the superseded timer task.

use std::time::Duration;

use api::{ApiError, SearchCandidate};
use dioxus::prelude::*;

use crate::context::{use_api, use_config};
use crate::icons::FaMagnifyingGlass;
use crate::timer::sleep;
use crate::Icon;

/// Identifies one armed lookup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ticket(u64);

/// Single-slot "latest pending operation" token.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DebounceSlot {
    generation: u64,
    armed: bool,
}

impl DebounceSlot {
    /// Invalidate any outstanding ticket and hand out a new one.
    pub fn arm(&mut self) -> Ticket {
        self.generation += 1;
        self.armed = true;
        Ticket(self.generation)
    }

    /// Invalidate any outstanding ticket.
    pub fn invalidate(&mut self) {
        self.generation += 1;
        self.armed = false;
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.armed && ticket.0 == self.generation
    }

    /// Consume `ticket` if it is current.
    fn settle(&mut self, ticket: Ticket) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.armed = false;
        true
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SearchPhase {
    #[default]
    Idle,
    Debouncing,
    Loading,
    ShowingResults,
    ShowingEmpty,
}

/// Result of a keystroke.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputOutcome {
    /// Query too short: nothing will be sent.
    Cleared,
    /// A lookup should run after the quiet period with this ticket.
    Scheduled(Ticket),
}

/// What the dropdown should render.
#[derive(Clone, Debug, PartialEq)]
pub enum Dropdown {
    Hidden,
    Results(Vec<SearchCandidate>),
    Empty,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SearchState {
    query: String,
    candidates: Vec<SearchCandidate>,
    phase: SearchPhase,
    dropdown_open: bool,
    slot: DebounceSlot,
    min_len: usize,
}

impl Default for SearchState {
    fn default() -> Self {
        Self::new(2)
    }
}

impl SearchState {
    pub fn new(min_len: usize) -> Self {
        Self {
            query: String::new(),
            candidates: Vec::new(),
            phase: SearchPhase::Idle,
            dropdown_open: false,
            slot: DebounceSlot::default(),
            min_len,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn phase(&self) -> SearchPhase {
        self.phase
    }

    pub fn candidates(&self) -> &[SearchCandidate] {
        &self.candidates
    }

    pub fn is_loading(&self) -> bool {
        self.phase == SearchPhase::Loading
    }

    pub fn is_dropdown_open(&self) -> bool {
        self.dropdown_open
    }

    fn long_enough(&self) -> bool {
        self.query.trim().chars().count() >= self.min_len
    }

    pub fn input(&mut self, text: impl Into<String>) -> InputOutcome {
        self.query = text.into();
        if !self.long_enough() {
            self.slot.invalidate();
            self.candidates.clear();
            self.dropdown_open = false;
            self.phase = SearchPhase::Idle;
            return InputOutcome::Cleared;
        }
        self.phase = SearchPhase::Debouncing;
        InputOutcome::Scheduled(self.slot.arm())
    }

    /// The quiet period for `ticket` elapsed. Returns the query to send, or
    /// `None` if a newer keystroke superseded it.
    pub fn timer_fired(&mut self, ticket: Ticket) -> Option<String> {
        if !self.slot.is_current(ticket) || self.phase != SearchPhase::Debouncing {
            return None;
        }
        self.phase = SearchPhase::Loading;
        Some(self.query.trim().to_string())
    }

    /// Apply a lookup response. Returns `false` when the response was stale
    /// and ignored.
    pub fn resolved(
        &mut self,
        ticket: Ticket,
        result: Result<Vec<SearchCandidate>, ApiError>,
    ) -> bool {
        if self.phase != SearchPhase::Loading || !self.slot.settle(ticket) {
            return false;
        }
        match result {
            Ok(candidates) => {
                self.phase = if candidates.is_empty() {
                    SearchPhase::ShowingEmpty
                } else {
                    SearchPhase::ShowingResults
                };
                self.candidates = candidates;
                self.dropdown_open = true;
            }
            Err(e) => {
                tracing::error!("Client search failed: {e}");
                self.candidates.clear();
                self.phase = SearchPhase::ShowingEmpty;
            }
        }
        true
    }

    pub fn outside_click(&mut self) {
        self.dropdown_open = false;
    }

    /// Pick the candidate with `id` from the open dropdown.
    pub fn select(&mut self, id: &str) -> Option<SearchCandidate> {
        if !self.dropdown_open {
            return None;
        }
        let candidate = self.candidates.iter().find(|c| c.id == id)?.clone();
        self.query = candidate.name.clone();
        self.dropdown_open = false;
        self.slot.invalidate();
        self.phase = SearchPhase::Idle;
        Some(candidate)
    }

    /// Drop everything, e.g. when the surrounding form is reset.
    pub fn reset(&mut self) {
        let min_len = self.min_len;
        self.slot.invalidate();
        let slot = self.slot.clone();
        *self = Self::new(min_len);
        self.slot = slot;
    }

    pub fn dropdown(&self) -> Dropdown {
        if !self.dropdown_open {
            return Dropdown::Hidden;
        }
        if !self.candidates.is_empty() {
            return Dropdown::Results(self.candidates.clone());
        }
        if !self.is_loading() && self.long_enough() {
            return Dropdown::Empty;
        }
        Dropdown::Hidden
    }
}

/// Client autocomplete: type at least two characters, pick a client.
#[component]
pub fn ClientSearch(
    on_select: EventHandler<SearchCandidate>,
    #[props(default = "Client Name *".to_string())] label: String,
    #[props(default = "Search by name or phone...".to_string())] placeholder: String,
) -> Element {
    let api = use_api();
    let config = use_config();
    let debounce: Duration = config.search.debounce();
    let mut state = use_signal(move || SearchState::new(config.search.min_query_len));
    let mut pending = use_signal(|| Option::<Task>::None);

    // Tasks spawned here belong to this component and are dropped with it,
    // so a response that lands after unmount is never applied.
    let oninput = move |evt: FormEvent| {
        if let Some(task) = pending.take() {
            task.cancel();
        }
        let outcome = state.write().input(evt.value());
        if let InputOutcome::Scheduled(ticket) = outcome {
            let task = spawn(async move {
                sleep(debounce).await;
                let Some(query) = state.write().timer_fired(ticket) else {
                    return;
                };
                tracing::debug!("Searching clients for {query:?}");
                let result = api.client().search_users(&query).await;
                state.write().resolved(ticket, result);
            });
            pending.set(Some(task));
        }
    };

    let (query, loading, dropdown) = {
        let s = state.read();
        (s.query().to_string(), s.is_loading(), s.dropdown())
    };

    let show_backdrop = dropdown != Dropdown::Hidden;
    let dropdown_el = match dropdown {
        Dropdown::Hidden => rsx! {},
        Dropdown::Empty => rsx! {
            div { class: "client-search-dropdown client-search-empty", "No clients found" }
        },
        Dropdown::Results(candidates) => rsx! {
            div {
                class: "client-search-dropdown",
                for candidate in candidates {
                    button {
                        key: "{candidate.id}",
                        r#type: "button",
                        class: "client-search-option",
                        onclick: {
                            let id = candidate.id.clone();
                            move |_| {
                                let picked = state.write().select(&id);
                                if let Some(candidate) = picked {
                                    on_select.call(candidate);
                                }
                            }
                        },
                        div { class: "client-search-name", "{candidate.name}" }
                        div { class: "client-search-email", "{candidate.email}" }
                        if let Some(phone) = &candidate.phone {
                            div { class: "client-search-phone", "{phone}" }
                        }
                    }
                }
            }
        },
    };

    rsx! {
        div {
            class: "client-search",
            label { class: "field-label", "{label}" }
            div {
                class: "client-search-input",
                span {
                    class: "client-search-icon",
                    Icon { icon: FaMagnifyingGlass, width: 14, height: 14 }
                }
                input {
                    r#type: "text",
                    class: "field-input with-icon",
                    value: "{query}",
                    placeholder: "{placeholder}",
                    autocomplete: "off",
                    oninput: oninput,
                }
                if loading {
                    span { class: "spinner spinner-sm client-search-spinner" }
                }
            }

            if show_backdrop {
                div {
                    class: "client-search-backdrop",
                    onclick: move |_| state.write().outside_click(),
                }
            }

            {dropdown_el}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(id: &str, name: &str) -> SearchCandidate {
        SearchCandidate {
            id: id.to_string(),
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            phone: None,
        }
    }

    #[test]
    fn test_short_query_never_schedules() {
        let mut state = SearchState::new(2);
        assert_eq!(state.input("a"), InputOutcome::Cleared);
        assert_eq!(state.input(" a "), InputOutcome::Cleared);
        assert_eq!(state.input(""), InputOutcome::Cleared);
        assert_eq!(state.phase(), SearchPhase::Idle);
        assert_eq!(state.dropdown(), Dropdown::Hidden);
    }

    #[test]
    fn test_two_characters_schedule_a_lookup() {
        let mut state = SearchState::new(2);
        let InputOutcome::Scheduled(ticket) = state.input("al") else {
            panic!("length 2 must schedule a lookup");
        };
        assert_eq!(state.phase(), SearchPhase::Debouncing);
        assert_eq!(state.timer_fired(ticket).as_deref(), Some("al"));
        assert!(state.is_loading());
    }

    #[test]
    fn test_rapid_keystrokes_send_only_the_last_query() {
        let mut state = SearchState::new(2);
        let tickets: Vec<Ticket> = ["al", "ali", "alic"]
            .into_iter()
            .filter_map(|q| match state.input(q) {
                InputOutcome::Scheduled(t) => Some(t),
                InputOutcome::Cleared => None,
            })
            .collect();
        assert_eq!(tickets.len(), 3);

        let sent: Vec<String> = tickets
            .iter()
            .filter_map(|t| state.timer_fired(*t))
            .collect();
        assert_eq!(sent, vec!["alic".to_string()]);
    }

    #[test]
    fn test_shortening_below_minimum_cancels_pending_lookup() {
        let mut state = SearchState::new(2);
        let InputOutcome::Scheduled(ticket) = state.input("al") else {
            panic!("expected a lookup");
        };
        assert_eq!(state.input("a"), InputOutcome::Cleared);
        assert!(state.timer_fired(ticket).is_none());
    }

    #[test]
    fn test_results_and_empty() {
        let mut state = SearchState::new(2);
        let InputOutcome::Scheduled(t) = state.input("al") else {
            panic!("expected a lookup");
        };
        state.timer_fired(t);
        assert!(state.resolved(t, Ok(vec![candidate("1", "Alice")])));
        assert_eq!(state.phase(), SearchPhase::ShowingResults);
        assert_eq!(state.dropdown(), Dropdown::Results(vec![candidate("1", "Alice")]));

        let InputOutcome::Scheduled(t) = state.input("zz") else {
            panic!("expected a lookup");
        };
        state.timer_fired(t);
        assert!(state.resolved(t, Ok(vec![])));
        assert_eq!(state.phase(), SearchPhase::ShowingEmpty);
        assert_eq!(state.dropdown(), Dropdown::Empty);
    }

    #[test]
    fn test_error_clears_candidates() {
        let mut state = SearchState::new(2);
        let InputOutcome::Scheduled(t) = state.input("al") else {
            panic!("expected a lookup");
        };
        state.timer_fired(t);
        state.resolved(t, Ok(vec![candidate("1", "Alice")]));

        let InputOutcome::Scheduled(t) = state.input("alx") else {
            panic!("expected a lookup");
        };
        state.timer_fired(t);
        assert!(state.resolved(t, Err(ApiError::Network("offline".into()))));
        assert!(state.candidates().is_empty());
        assert!(!matches!(state.dropdown(), Dropdown::Results(_)));
    }

    #[test]
    fn test_stale_response_ignored() {
        let mut state = SearchState::new(2);
        let InputOutcome::Scheduled(old) = state.input("al") else {
            panic!("expected a lookup");
        };
        state.timer_fired(old);

        let InputOutcome::Scheduled(new) = state.input("bo") else {
            panic!("expected a lookup");
        };
        assert!(!state.resolved(old, Ok(vec![candidate("1", "Alice")])));
        assert!(state.candidates().is_empty());
        assert_eq!(state.phase(), SearchPhase::Debouncing);

        state.timer_fired(new);
        assert!(state.resolved(new, Ok(vec![candidate("2", "Bob")])));
        assert!(!state.resolved(new, Ok(vec![])), "a ticket settles once");
        assert_eq!(state.candidates()[0].name, "Bob");
    }

    #[test]
    fn test_select_fires_once_and_closes() {
        let mut state = SearchState::new(2);
        let InputOutcome::Scheduled(t) = state.input("al") else {
            panic!("expected a lookup");
        };
        state.timer_fired(t);
        state.resolved(t, Ok(vec![candidate("1", "Alice"), candidate("2", "Alan")]));

        let picked = state.select("2").expect("candidate should be selectable");
        assert_eq!(picked.name, "Alan");
        assert_eq!(state.query(), "Alan");
        assert!(!state.is_dropdown_open());
        assert_eq!(state.dropdown(), Dropdown::Hidden);
        assert!(state.select("2").is_none(), "closed dropdown yields nothing");
    }

    #[test]
    fn test_outside_click_collapses_without_clearing() {
        let mut state = SearchState::new(2);
        let InputOutcome::Scheduled(t) = state.input("al") else {
            panic!("expected a lookup");
        };
        state.timer_fired(t);
        state.resolved(t, Ok(vec![candidate("1", "Alice")]));

        state.outside_click();
        assert_eq!(state.dropdown(), Dropdown::Hidden);
        assert_eq!(state.query(), "al");
        assert_eq!(state.candidates().len(), 1);
    }

    #[test]
    fn test_reset_invalidates_in_flight_lookup() {
        let mut state = SearchState::new(2);
        let InputOutcome::Scheduled(t) = state.input("al") else {
            panic!("expected a lookup");
        };
        state.timer_fired(t);
        state.reset();
        assert!(!state.resolved(t, Ok(vec![candidate("1", "Alice")])));
        assert_eq!(state.query(), "");
    }

    #[tokio::test]
    async fn test_debounced_driver_sends_once() {
        use std::cell::RefCell;
        use std::rc::Rc;

        // Mimics the component: each keystroke re-arms, each armed ticket
        // sleeps, and only the survivor reaches the backend.
        let state = Rc::new(RefCell::new(SearchState::new(2)));
        let sent = Rc::new(RefCell::new(Vec::<String>::new()));
        let quiet = Duration::from_millis(20);

        let mut timers = Vec::new();
        for text in ["a", "al", "ali", "alic", "alice"] {
            if let InputOutcome::Scheduled(ticket) = state.borrow_mut().input(text) {
                let state = state.clone();
                let sent = sent.clone();
                timers.push(async move {
                    sleep(quiet).await;
                    let query = state.borrow_mut().timer_fired(ticket);
                    if let Some(q) = query {
                        sent.borrow_mut().push(q);
                    }
                });
            }
        }
        run_in_order(timers).await;

        assert_eq!(*sent.borrow(), vec!["alice".to_string()]);
    }

    async fn run_in_order<F: std::future::Future<Output = ()>>(futures: Vec<F>) {
        for f in futures {
            f.await;
        }
    }
}
