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

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use warp::Filter;

use crate::{controller::Controller, directory::Directory};

const JSON_BODY_LIMIT: u64 = 16 * 1024;

pub fn with_directory(
    directory: Arc<Directory>,
) -> impl Filter<Extract = (Arc<Directory>,), Error = Infallible> + Clone {
    warp::any().map(move || directory.clone())
}

pub fn with_controller(
    controller: Controller,
) -> impl Filter<Extract = (Controller,), Error = Infallible> + Clone {
    warp::any().map(move || controller.clone())
}

/// A size-limited JSON request body.
pub fn json_body<T>() -> impl Filter<Extract = (T,), Error = warp::Rejection> + Clone
where
    T: serde::de::DeserializeOwned + Send,
{
    warp::body::content_length_limit(JSON_BODY_LIMIT).and(warp::body::json())
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerQuery {
    pub owner_id: Uuid,
}

/// Extracts the `ownerId` query parameter.
pub fn owner_query() -> impl Filter<Extract = (Uuid,), Error = warp::Rejection> + Clone {
    warp::query::<OwnerQuery>().map(|q: OwnerQuery| q.owner_id)
}
