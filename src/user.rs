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

use uuid::Uuid;
use warp::{
    reply::{json, Json},
    Filter, Rejection, Reply,
};

use crate::{
    directory::{Directory, ProfileUpdate},
    guard,
};

pub use crate::directory::{Profile, UserSummary};

pub fn api(
    directory: Arc<Directory>,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    let list = warp::path!("users")
        .and(warp::get())
        .and(guard::with_directory(directory.clone()))
        .and_then(list_users);

    let read = warp::path!("users" / Uuid)
        .and(warp::get())
        .and(guard::with_directory(directory.clone()))
        .and_then(read_profile);

    let update = warp::path!("users" / Uuid)
        .and(warp::put())
        .and(guard::json_body())
        .and(guard::with_directory(directory))
        .and_then(update_profile);

    list.or(read).or(update)
}

async fn list_users(directory: Arc<Directory>) -> Result<Json, Rejection> {
    Ok(json(&directory.users().await))
}

async fn read_profile(id: Uuid, directory: Arc<Directory>) -> Result<Json, Rejection> {
    Ok(json(&directory.profile(id).await?))
}

async fn update_profile(
    id: Uuid,
    update: ProfileUpdate,
    directory: Arc<Directory>,
) -> Result<Json, Rejection> {
    let profile = directory.update_profile(id, update).await?;
    tracing::debug!(user_id = %id, username = %profile.username, "updated profile");
    Ok(json(&profile))
}
