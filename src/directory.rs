/*
 * Copyright (C) 2020 Oakes, Gregory <gregoryoakes@fastmail.com>
 * Author: Oakes, Gregory <gregory.oakes@fastmail.com>
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as
 * published by the Free Software Foundation, either version 3 of the
 * License, or (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU Affero General Public License for more details.
 *
 * You should have received a copy of the GNU Affero General Public License
 * along with this program.  If not, see <http://www.gnu.org/licenses/>.
 */

//! The in-memory store behind every endpoint.
//!
//! Profiles, cards and decks are kept per user, each behind its own mutex, so
//! work on different users never waits on the same lock. Only registration
//! and renames take the username index for writing.

use std::{collections::HashMap, iter, sync::Arc};

use rand::{distributions::Alphanumeric, thread_rng, Rng};
use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use crate::Error;

const TOKEN_LEN: usize = 22;

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: Uuid,
    pub username: String,
    pub wins: u32,
    pub losses: u32,
}

/// A partial profile update. Absent fields keep their current value.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub username: Option<String>,
    pub wins: Option<u32>,
    pub losses: Option<u32>,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct UserSummary {
    pub username: String,
    pub id: Uuid,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: Uuid,
    pub name: String,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deck {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub card_ids: Vec<Uuid>,
}

/// Per-user slots. The outer lock only guards slot lookup and creation.
struct Shelf<V> {
    slots: RwLock<HashMap<Uuid, Arc<Mutex<V>>>>,
}

impl<V> Shelf<V> {
    fn new() -> Self {
        Shelf {
            slots: RwLock::new(HashMap::new()),
        }
    }

    async fn get(&self, owner: Uuid) -> Option<Arc<Mutex<V>>> {
        self.slots.read().await.get(&owner).cloned()
    }

    async fn get_or_insert_with<F>(&self, owner: Uuid, init: F) -> Arc<Mutex<V>>
    where
        F: FnOnce() -> V,
    {
        if let Some(slot) = self.get(owner).await {
            return slot;
        }
        self.slots
            .write()
            .await
            .entry(owner)
            .or_insert_with(|| Arc::new(Mutex::new(init())))
            .clone()
    }
}

impl<T: Clone> Shelf<Vec<T>> {
    async fn snapshot(&self, owner: Uuid) -> Vec<T> {
        match self.get(owner).await {
            Some(slot) => slot.lock().await.clone(),
            None => Vec::new(),
        }
    }
}

/// Lock order: `ids_by_name`, then the `profiles` slot map, then a single
/// profile slot. Nothing holding a profile slot waits on the index.
pub struct Directory {
    ids_by_name: RwLock<HashMap<String, Uuid>>,
    profiles: Shelf<Profile>,
    tokens: RwLock<HashMap<String, Uuid>>,
    cards: Shelf<Vec<Card>>,
    decks: Shelf<Vec<Deck>>,
}

impl Default for Directory {
    fn default() -> Self {
        Directory::new()
    }
}

impl Directory {
    pub fn new() -> Self {
        Directory {
            ids_by_name: RwLock::new(HashMap::new()),
            profiles: Shelf::new(),
            tokens: RwLock::new(HashMap::new()),
            cards: Shelf::new(),
            decks: Shelf::new(),
        }
    }

    /// Registers `username`, or returns the id it is already registered under.
    ///
    /// The password is accepted for interface compatibility only. It is
    /// neither stored nor checked anywhere.
    pub async fn register(&self, username: &str, _password: &str) -> Uuid {
        let mut ids_by_name = self.ids_by_name.write().await;
        if let Some(id) = ids_by_name.get(username) {
            return *id;
        }
        let id = Uuid::new_v4();
        self.profiles
            .get_or_insert_with(id, || Profile {
                id,
                username: username.to_string(),
                wins: 0,
                losses: 0,
            })
            .await;
        ids_by_name.insert(username.to_string(), id);
        id
    }

    /// Mints a new session token for `username`. Earlier tokens stay valid.
    pub async fn login(&self, username: &str, _password: &str) -> Result<String, Error> {
        let user_id = self
            .ids_by_name
            .read()
            .await
            .get(username)
            .copied()
            .ok_or(Error::InvalidCredentials)?;

        let mut tokens = self.tokens.write().await;
        loop {
            let token = random_string(TOKEN_LEN);
            if !tokens.contains_key(&token) {
                tokens.insert(token.clone(), user_id);
                return Ok(token);
            }
        }
    }

    pub async fn resolve_token(&self, token: &str) -> Result<Uuid, Error> {
        self.tokens
            .read()
            .await
            .get(token)
            .copied()
            .ok_or(Error::InvalidToken)
    }

    pub async fn user_id(&self, username: &str) -> Result<Uuid, Error> {
        self.ids_by_name
            .read()
            .await
            .get(username)
            .copied()
            .ok_or(Error::NotFound("user"))
    }

    pub async fn users(&self) -> Vec<UserSummary> {
        let mut users: Vec<UserSummary> = self
            .ids_by_name
            .read()
            .await
            .iter()
            .map(|(username, id)| UserSummary {
                username: username.clone(),
                id: *id,
            })
            .collect();
        users.sort_by(|a, b| a.username.cmp(&b.username));
        users
    }

    pub async fn profile(&self, id: Uuid) -> Result<Profile, Error> {
        let slot = self.profiles.get(id).await.ok_or(Error::NotFound("user"))?;
        let profile = slot.lock().await.clone();
        Ok(profile)
    }

    /// Applies `update` to the profile of `id`.
    ///
    /// Counter-only updates lock just that user's profile. A new username
    /// must not belong to another user; the old name is released and the new
    /// one claimed while both the index and the profile are locked.
    pub async fn update_profile(
        &self,
        id: Uuid,
        update: ProfileUpdate,
    ) -> Result<Profile, Error> {
        let ProfileUpdate {
            username,
            wins,
            losses,
        } = update;

        let mut ids_by_name = match username {
            Some(_) => Some(self.ids_by_name.write().await),
            None => None,
        };
        let slot = self.profiles.get(id).await.ok_or(Error::NotFound("user"))?;
        let mut profile = slot.lock().await;

        if let (Some(username), Some(ids_by_name)) = (username, ids_by_name.as_mut()) {
            if username != profile.username {
                match ids_by_name.get(&username) {
                    Some(holder) if *holder != id => return Err(Error::UsernameTaken(username)),
                    _ => {}
                }
                ids_by_name.remove(&profile.username);
                ids_by_name.insert(username.clone(), id);
                profile.username = username;
            }
        }
        if let Some(wins) = wins {
            profile.wins = wins;
        }
        if let Some(losses) = losses {
            profile.losses = losses;
        }
        Ok(profile.clone())
    }

    pub async fn owned_cards(&self, user_id: Uuid) -> Vec<Card> {
        self.cards.snapshot(user_id).await
    }

    pub async fn add_owned_card(&self, user_id: Uuid, name: &str) -> Card {
        let card = Card {
            id: Uuid::new_v4(),
            name: name.to_string(),
        };
        self.cards
            .get_or_insert_with(user_id, Vec::new)
            .await
            .lock()
            .await
            .push(card.clone());
        card
    }

    pub async fn create_deck(&self, owner_id: Uuid, name: &str) -> Deck {
        let deck = Deck {
            id: Uuid::new_v4(),
            owner_id,
            name: name.to_string(),
            card_ids: Vec::new(),
        };
        self.decks
            .get_or_insert_with(owner_id, Vec::new)
            .await
            .lock()
            .await
            .push(deck.clone());
        deck
    }

    pub async fn decks(&self, owner_id: Uuid) -> Vec<Deck> {
        self.decks.snapshot(owner_id).await
    }

    /// Appends `add` to the deck, then drops every occurrence of any id in
    /// `remove`. An id in both lists ends up removed.
    ///
    /// The deck is looked up under `owner_id` only.
    pub async fn modify_deck_cards(
        &self,
        owner_id: Uuid,
        deck_id: Uuid,
        add: &[Uuid],
        remove: &[Uuid],
    ) -> Result<Deck, Error> {
        let slot = self
            .decks
            .get(owner_id)
            .await
            .ok_or(Error::NotFound("deck"))?;
        let mut decks = slot.lock().await;
        let deck = decks
            .iter_mut()
            .find(|d| d.id == deck_id)
            .ok_or(Error::NotFound("deck"))?;

        deck.card_ids.extend_from_slice(add);
        deck.card_ids.retain(|id| !remove.contains(id));
        Ok(deck.clone())
    }
}

fn random_string(len: usize) -> String {
    let mut rng = thread_rng();
    iter::repeat(())
        .map(|()| rng.sample(Alphanumeric))
        .map(char::from)
        .take(len)
        .collect::<String>()
}
