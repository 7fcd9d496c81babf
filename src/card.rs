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

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use warp::{
    reply::{json, Json},
    Filter, Rejection, Reply,
};

use crate::{directory::Directory, guard};

pub use crate::directory::Card;

pub fn api(
    directory: Arc<Directory>,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    let list = warp::path!("cards")
        .and(warp::get())
        .and(guard::owner_query())
        .and(guard::with_directory(directory.clone()))
        .and_then(list_owned_cards);

    let create = warp::path!("cards")
        .and(warp::post())
        .and(warp::query::<NewCard>())
        .and(guard::with_directory(directory))
        .and_then(create_owned_card);

    list.or(create)
}

/// The response type of a card listing.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnedCardsResp {
    pub user_id: Uuid,
    pub cards: Vec<Card>,
}

/// Query parameters of a mock card grant.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCard {
    pub owner_id: Uuid,
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResp {
    pub message: String,
}

async fn list_owned_cards(owner_id: Uuid, directory: Arc<Directory>) -> Result<Json, Rejection> {
    let cards = directory.owned_cards(owner_id).await;
    Ok(json(&OwnedCardsResp {
        user_id: owner_id,
        cards,
    }))
}

async fn create_owned_card(card: NewCard, directory: Arc<Directory>) -> Result<Json, Rejection> {
    let created = directory.add_owned_card(card.owner_id, &card.name).await;
    tracing::debug!(owner_id = %card.owner_id, card_id = %created.id, "granted card");
    Ok(json(&MessageResp {
        message: format!("Card '{}' added to user {}", created.name, card.owner_id),
    }))
}
