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

//! Registration, login and token resolution.
//!
//! Passwords travel in the request bodies but are never stored or checked.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use warp::{
    reply::{json, Json},
    Filter, Rejection, Reply,
};

use crate::{directory::Directory, guard};

pub fn api(
    directory: Arc<Directory>,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    let register = warp::path!("users" / "register")
        .and(warp::post())
        .and(guard::json_body())
        .and(guard::with_directory(directory.clone()))
        .and_then(register_user);

    let login = warp::path!("users" / "login")
        .and(warp::post())
        .and(guard::json_body())
        .and(guard::with_directory(directory.clone()))
        .and_then(login_user);

    let resolve = warp::path!("auth" / "resolve")
        .and(warp::post())
        .and(guard::json_body())
        .and(guard::with_directory(directory))
        .and_then(resolve_token);

    register.or(login).or(resolve)
}

/// The input data type of a register request.
#[derive(Debug, Serialize, Deserialize)]
pub struct Register {
    pub username: String,
    pub password: String,
}

/// The response type of a register request.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResp {
    pub user_id: Uuid,
    pub username: String,
}

/// The input data type of a login request.
#[derive(Debug, Serialize, Deserialize)]
pub struct Login {
    pub username: String,
    pub password: String,
}

/// The response type of a login request.
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResp {
    pub token: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Resolve {
    pub token: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveResp {
    pub user_id: Uuid,
}

async fn register_user(form: Register, directory: Arc<Directory>) -> Result<Json, Rejection> {
    let user_id = directory.register(&form.username, &form.password).await;
    tracing::info!(%user_id, username = %form.username, "registered user");
    Ok(json(&RegisterResp {
        user_id,
        username: form.username,
    }))
}

async fn login_user(form: Login, directory: Arc<Directory>) -> Result<Json, Rejection> {
    let token = directory.login(&form.username, &form.password).await?;
    tracing::info!(username = %form.username, "issued session token");
    Ok(json(&LoginResp { token }))
}

async fn resolve_token(form: Resolve, directory: Arc<Directory>) -> Result<Json, Rejection> {
    let user_id = directory.resolve_token(&form.token).await?;
    Ok(json(&ResolveResp { user_id }))
}
