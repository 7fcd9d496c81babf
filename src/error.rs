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

use std::convert::Infallible;

use serde::{Deserialize, Serialize};
use warp::{http::StatusCode, reject, reply, Rejection, Reply};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("unknown user or wrong password")]
    InvalidCredentials,
    #[error("invalid or unknown token")]
    InvalidToken,
    #[error("username {0:?} is already taken")]
    UsernameTaken(String),
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error(transparent)]
    AddrParse(#[from] std::net::AddrParseError),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    Server(#[from] warp::Error),
}

impl Error {
    pub fn status(&self) -> StatusCode {
        match self {
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::InvalidCredentials | Error::InvalidToken => StatusCode::UNAUTHORIZED,
            Error::UsernameTaken(_) => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Error::NotFound(_) => "NOT_FOUND",
            Error::InvalidCredentials => "INVALID_CREDENTIALS",
            Error::InvalidToken => "INVALID_TOKEN",
            Error::UsernameTaken(_) => "USERNAME_TAKEN",
            _ => "INTERNAL",
        }
    }
}

impl reject::Reject for Error {}

/// The body of every failed response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    pub message: String,
}

fn error_reply(
    status: StatusCode,
    code: &str,
    message: String,
) -> reply::WithStatus<reply::Json> {
    let body = ErrorResponse {
        success: false,
        error: code.to_string(),
        message,
    };
    reply::with_status(reply::json(&body), status)
}

pub async fn handle_rejects(err: Rejection) -> Result<impl Reply, Infallible> {
    let (status, code, message) = if let Some(e) = err.find::<Error>() {
        (e.status(), e.code(), e.to_string())
    } else if let Some(e) = err.find::<warp::filters::body::BodyDeserializeError>() {
        (StatusCode::BAD_REQUEST, "BAD_REQUEST", e.to_string())
    } else if let Some(e) = err.find::<reject::InvalidQuery>() {
        (StatusCode::BAD_REQUEST, "BAD_REQUEST", e.to_string())
    } else if let Some(e) = err.find::<reject::UnsupportedMediaType>() {
        (
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            "UNSUPPORTED_MEDIA_TYPE",
            e.to_string(),
        )
    } else if let Some(e) = err.find::<reject::LengthRequired>() {
        (StatusCode::LENGTH_REQUIRED, "LENGTH_REQUIRED", e.to_string())
    } else if let Some(e) = err.find::<reject::PayloadTooLarge>() {
        (StatusCode::PAYLOAD_TOO_LARGE, "PAYLOAD_TOO_LARGE", e.to_string())
    } else if err.is_not_found() {
        (StatusCode::NOT_FOUND, "NOT_FOUND", "route not found".to_string())
    } else if let Some(_) = err.find::<reject::MethodNotAllowed>() {
        (
            StatusCode::METHOD_NOT_ALLOWED,
            "METHOD_NOT_ALLOWED",
            "method not allowed".to_string(),
        )
    } else {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "INTERNAL",
            "internal server error".to_string(),
        )
    };

    if status.is_server_error() {
        tracing::error!(%status, %message, ?err, "request failed");
    } else {
        tracing::debug!(%status, code, %message, "request rejected");
    }
    Ok(error_reply(status, code, message))
}
