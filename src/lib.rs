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

use std::{convert::Infallible, sync::Arc};

use warp::{Filter, Reply};

pub mod guard;

pub mod auth;
pub mod card;
pub mod config;
pub mod controller;
pub mod deck;
pub mod directory;
pub mod user;

mod error;
pub use error::{handle_rejects, Error, ErrorResponse};

pub use config::Config;
pub use controller::Controller;
pub use directory::Directory;

/// Every route of the service, with rejections rendered as JSON error bodies.
pub fn app(
    directory: Arc<Directory>,
    controller: Controller,
) -> impl Filter<Extract = (impl Reply,), Error = Infallible> + Clone {
    let auth_api = auth::api(directory.clone());
    let user_api = user::api(directory.clone());
    let card_api = card::api(directory.clone());
    let deck_api = deck::api(directory);
    let health_api = controller::api(controller);

    health_api
        .or(auth_api)
        .or(user_api)
        .or(card_api)
        .or(deck_api)
        .with(warp::trace::request())
        .recover(error::handle_rejects)
}
