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

use uuid::Uuid;

use user_directory::{card, deck, ErrorResponse};

mod common;

#[tokio::test]
async fn card_flow() {
    let api = common::api();
    let owner = Uuid::new_v4();

    // A never-seen owner has no cards.
    let res = warp::test::request()
        .method("GET")
        .path(&format!("/cards?ownerId={}", owner))
        .reply(&api)
        .await;
    assert_eq!(res.status(), 200);
    let listing: card::OwnedCardsResp = common::decode(res.body());
    assert_eq!(listing.user_id, owner);
    assert!(listing.cards.is_empty());

    let res = warp::test::request()
        .method("POST")
        .path(&format!("/cards?ownerId={}&name=Fireball", owner))
        .reply(&api)
        .await;
    assert_eq!(res.status(), 200);
    let msg: card::MessageResp = common::decode(res.body());
    assert!(msg.message.contains("Fireball"));

    let res = warp::test::request()
        .method("GET")
        .path(&format!("/cards?ownerId={}", owner))
        .reply(&api)
        .await;
    let listing: card::OwnedCardsResp = common::decode(res.body());
    assert_eq!(listing.cards.len(), 1);
    assert_eq!(listing.cards[0].name, "Fireball");
}

#[tokio::test]
async fn cards_require_owner() {
    let api = common::api();

    let res = warp::test::request()
        .method("GET")
        .path("/cards?ownerId=not-a-uuid")
        .reply(&api)
        .await;
    assert_eq!(res.status(), 400);
    let err: ErrorResponse = common::decode(res.body());
    assert_eq!(err.error, "BAD_REQUEST");
}

#[tokio::test]
async fn deck_flow() {
    let api = common::api();
    let owner = Uuid::new_v4();
    let (a, b, c) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());

    let res = warp::test::request()
        .method("POST")
        .path("/decks")
        .json(&deck::CreateDeck {
            owner_id: owner,
            name: "burn".to_string(),
        })
        .reply(&api)
        .await;
    assert_eq!(res.status(), 200);
    let created: deck::DeckResp = common::decode(res.body());
    assert_eq!(created.name, "burn");
    assert!(created.card_ids.is_empty());

    let res = warp::test::request()
        .method("POST")
        .path(&format!("/decks/{}/cards?ownerId={}", created.id, owner))
        .json(&deck::ModifyDeckCards {
            add_card_ids: vec![a, b],
            remove_card_ids: vec![],
        })
        .reply(&api)
        .await;
    assert_eq!(res.status(), 200);

    let res = warp::test::request()
        .method("POST")
        .path(&format!("/decks/{}/cards?ownerId={}", created.id, owner))
        .json(&deck::ModifyDeckCards {
            add_card_ids: vec![c],
            remove_card_ids: vec![a],
        })
        .reply(&api)
        .await;
    assert_eq!(res.status(), 200);
    let modified: deck::DeckResp = common::decode(res.body());
    assert_eq!(modified.card_ids, vec![b, c], "added first, then removed");

    let res = warp::test::request()
        .method("GET")
        .path(&format!("/decks?ownerId={}", owner))
        .reply(&api)
        .await;
    assert_eq!(res.status(), 200);
    let decks: Vec<deck::Deck> = common::decode(res.body());
    assert_eq!(decks.len(), 1);
    assert_eq!(decks[0].owner_id, owner);
    assert_eq!(decks[0].card_ids, vec![b, c]);
}

#[tokio::test]
async fn deck_under_wrong_owner() {
    let api = common::api();
    let owner = Uuid::new_v4();

    let res = warp::test::request()
        .method("POST")
        .path("/decks")
        .json(&deck::CreateDeck {
            owner_id: owner,
            name: "burn".to_string(),
        })
        .reply(&api)
        .await;
    let created: deck::DeckResp = common::decode(res.body());

    let res = warp::test::request()
        .method("POST")
        .path(&format!(
            "/decks/{}/cards?ownerId={}",
            created.id,
            Uuid::new_v4()
        ))
        .json(&deck::ModifyDeckCards {
            add_card_ids: vec![Uuid::new_v4()],
            remove_card_ids: vec![],
        })
        .reply(&api)
        .await;
    assert_eq!(res.status(), 404);
    let err: ErrorResponse = common::decode(res.body());
    assert_eq!(err.error, "NOT_FOUND");
}

#[tokio::test]
async fn empty_deck_change_is_accepted() {
    let api = common::api();
    let owner = Uuid::new_v4();

    let res = warp::test::request()
        .method("POST")
        .path("/decks")
        .json(&deck::CreateDeck {
            owner_id: owner,
            name: "burn".to_string(),
        })
        .reply(&api)
        .await;
    let created: deck::DeckResp = common::decode(res.body());

    let res = warp::test::request()
        .method("POST")
        .path(&format!("/decks/{}/cards?ownerId={}", created.id, owner))
        .header("Content-Type", "application/json")
        .body("{}")
        .reply(&api)
        .await;
    assert_eq!(res.status(), 200);
    let modified: deck::DeckResp = common::decode(res.body());
    assert!(modified.card_ids.is_empty());
}
