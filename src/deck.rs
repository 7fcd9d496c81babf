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

//! Deck composition. Decks are always addressed through their owner.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use warp::{
    reply::{json, Json},
    Filter, Rejection, Reply,
};

use crate::{directory::Directory, guard};

pub use crate::directory::Deck;

pub fn api(
    directory: Arc<Directory>,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    let list = warp::path!("decks")
        .and(warp::get())
        .and(guard::owner_query())
        .and(guard::with_directory(directory.clone()))
        .and_then(list_decks);

    let create = warp::path!("decks")
        .and(warp::post())
        .and(guard::json_body())
        .and(guard::with_directory(directory.clone()))
        .and_then(create_deck);

    let modify = warp::path!("decks" / Uuid / "cards")
        .and(warp::post())
        .and(guard::owner_query())
        .and(guard::json_body())
        .and(guard::with_directory(directory))
        .and_then(modify_deck_cards);

    list.or(create).or(modify)
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDeck {
    pub owner_id: Uuid,
    pub name: String,
}

/// Card ids to append to a deck, then card ids to strip from it.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModifyDeckCards {
    #[serde(default)]
    pub add_card_ids: Vec<Uuid>,
    #[serde(default)]
    pub remove_card_ids: Vec<Uuid>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckResp {
    pub id: Uuid,
    pub name: String,
    pub card_ids: Vec<Uuid>,
}

impl From<Deck> for DeckResp {
    fn from(deck: Deck) -> Self {
        DeckResp {
            id: deck.id,
            name: deck.name,
            card_ids: deck.card_ids,
        }
    }
}

async fn list_decks(owner_id: Uuid, directory: Arc<Directory>) -> Result<Json, Rejection> {
    Ok(json(&directory.decks(owner_id).await))
}

async fn create_deck(form: CreateDeck, directory: Arc<Directory>) -> Result<Json, Rejection> {
    let deck = directory.create_deck(form.owner_id, &form.name).await;
    tracing::info!(owner_id = %deck.owner_id, deck_id = %deck.id, "created deck");
    Ok(json(&DeckResp::from(deck)))
}

async fn modify_deck_cards(
    deck_id: Uuid,
    owner_id: Uuid,
    change: ModifyDeckCards,
    directory: Arc<Directory>,
) -> Result<Json, Rejection> {
    let deck = directory
        .modify_deck_cards(
            owner_id,
            deck_id,
            &change.add_card_ids,
            &change.remove_card_ids,
        )
        .await?;
    Ok(json(&DeckResp::from(deck)))
}
