//! A set of independent cards keyed by id.
//!
//! Each card keeps its own mode, velocity and press origin; the deck only
//! routes events and owns each card's optional tick task. Removing a card
//! cancels its ticker.

#[cfg(test)]
#[path = "deck_test.rs"]
mod deck_test;

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use tracing::{debug, warn};
use uuid::Uuid;

use crate::card::{Action, Card};
use crate::config::TiltConfig;
use crate::geometry::Rect;
use crate::input::PointerEvent;
use crate::ticker::{self, TickHandle};

/// Unique identifier for a card in a [`Deck`].
pub type CardId = Uuid;

/// Type-erased rectangle source so one deck can hold cards laid out differently.
pub type BoxedProvider = Box<dyn Fn() -> Rect>;

/// A card shared between the deck and its tick task.
pub type SharedCard = Rc<RefCell<Card<BoxedProvider>>>;

struct Slot {
    card: SharedCard,
    latest_tick: Rc<Cell<Option<Action>>>,
    ticker: Option<TickHandle>,
}

/// Cards plus their tick tasks.
#[derive(Default)]
pub struct Deck {
    config: TiltConfig,
    cards: HashMap<CardId, Slot>,
}

impl Deck {
    /// Empty deck whose cards share `config`, or the defaults if it does
    /// not validate.
    #[must_use]
    pub fn new(config: TiltConfig) -> Self {
        Self {
            config: config.or_default(),
            cards: HashMap::new(),
        }
    }

    /// Add a card whose layout is read from `provider`.
    pub fn insert<F>(&mut self, provider: F) -> CardId
    where
        F: Fn() -> Rect + 'static,
    {
        let id = Uuid::new_v4();
        let card = Card::with_config(Box::new(provider) as BoxedProvider, self.config);
        self.cards.insert(
            id,
            Slot {
                card: Rc::new(RefCell::new(card)),
                latest_tick: Rc::new(Cell::new(None)),
                ticker: None,
            },
        );
        debug!(%id, "card added");
        id
    }

    /// Add a card with a fixed layout.
    pub fn insert_fixed(&mut self, rect: Rect) -> CardId {
        self.insert(move || rect)
    }

    /// Route `event` to one card. Unknown ids yield no actions.
    pub fn dispatch(&mut self, id: &CardId, event: PointerEvent) -> Vec<Action> {
        let Some(slot) = self.cards.get(id) else {
            warn!(%id, "event for unknown card");
            return Vec::new();
        };
        match slot.card.try_borrow_mut() {
            Ok(mut card) => card.handle(event),
            Err(err) => {
                warn!(%id, %err, "card busy, dropping event");
                Vec::new()
            }
        }
    }

    /// Start the tick task for one card. Returns `false` for unknown ids;
    /// starting an already ticking card leaves the existing task in place.
    pub fn start_ticking(&mut self, id: &CardId) -> bool {
        let period = self.config.tick_interval;
        let Some(slot) = self.cards.get_mut(id) else {
            return false;
        };
        if slot.ticker.is_none() {
            let latest = Rc::clone(&slot.latest_tick);
            let handle = ticker::spawn_ticker(
                Rc::clone(&slot.card),
                period,
                move |actions: &[Action]| {
                    if let Some(last) = actions.last() {
                        latest.set(Some(*last));
                    }
                },
            );
            slot.ticker = Some(handle);
        }
        true
    }

    /// Start tick tasks for every card that has none.
    pub fn start_all(&mut self) {
        let ids: Vec<CardId> = self.cards.keys().copied().collect();
        for id in ids {
            self.start_ticking(&id);
        }
    }

    /// Take the most recent action emitted by a card's ticker since the last call.
    pub fn take_tick_action(&self, id: &CardId) -> Option<Action> {
        self.cards.get(id).and_then(|slot| slot.latest_tick.take())
    }

    /// Shared handle to a card, for queries.
    #[must_use]
    pub fn card(&self, id: &CardId) -> Option<SharedCard> {
        self.cards.get(id).map(|slot| Rc::clone(&slot.card))
    }

    /// Whether the card has a running tick task.
    #[must_use]
    pub fn is_ticking(&self, id: &CardId) -> bool {
        self.cards
            .get(id)
            .and_then(|slot| slot.ticker.as_ref())
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Remove a card and cancel its ticker.
    pub fn remove(&mut self, id: &CardId) -> bool {
        let removed = self.cards.remove(id).is_some();
        if removed {
            debug!(%id, "card removed");
        }
        removed
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Cancel every ticker and wait for each task to finish.
    pub async fn shutdown(mut self) {
        for (_, slot) in self.cards.drain() {
            if let Some(handle) = slot.ticker {
                handle.shutdown().await;
            }
        }
    }
}
