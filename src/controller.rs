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

//! Liveness and the upstream controller probe.

use serde::{Deserialize, Serialize};
use warp::{
    reply::{json, Json},
    Filter, Rejection, Reply,
};

use crate::{config::Config, guard, Error};

const SERVICE_NAME: &str = "UserService";

/// An HTTP client bound to the controller's base URL.
#[derive(Clone, Debug)]
pub struct Controller {
    client: reqwest::Client,
    base_url: String,
}

impl Controller {
    pub fn new(config: &Config) -> Result<Controller, Error> {
        let client = reqwest::Client::builder()
            .timeout(config.controller_timeout)
            .build()?;
        Ok(Controller {
            client,
            base_url: config.controller_url.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Requests the controller root and reports the status code it answered
    /// with, or the kind of failure when it did not answer.
    pub async fn ping(&self) -> Ping {
        let controller = self.base_url.clone();
        let url = format!("{}/", self.base_url.trim_end_matches('/'));
        match self.client.get(url.as_str()).send().await {
            Ok(resp) => Ping {
                controller,
                status: Some(resp.status().as_u16()),
                error: None,
            },
            Err(e) => Ping {
                controller,
                status: None,
                error: Some(failure_kind(&e).to_string()),
            },
        }
    }
}

fn failure_kind(e: &reqwest::Error) -> &'static str {
    if e.is_timeout() {
        "Timeout"
    } else if e.is_connect() {
        "Connect"
    } else if e.is_builder() {
        "Builder"
    } else {
        "Request"
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Health {
    pub status: String,
    pub service: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Ping {
    pub controller: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub fn api(
    controller: Controller,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    let health = warp::path!("_health")
        .and(warp::get())
        .map(|| {
            json(&Health {
                status: "ok".to_string(),
                service: SERVICE_NAME.to_string(),
            })
        });

    let ping = warp::path!("_controller" / "ping")
        .and(warp::get())
        .and(guard::with_controller(controller))
        .and_then(ping_controller);

    health.or(ping)
}

async fn ping_controller(controller: Controller) -> Result<Json, Rejection> {
    let ping = controller.ping().await;
    match &ping.error {
        Some(kind) => {
            tracing::warn!(controller = %ping.controller, %kind, "controller unreachable")
        }
        None => {
            tracing::debug!(
                controller = %ping.controller,
                status = ?ping.status,
                "controller answered"
            )
        }
    }
    Ok(json(&ping))
}
