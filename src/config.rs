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

use std::{env, net::SocketAddr, time::Duration};

use crate::Error;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_CONTROLLER_URL: &str = "http://localhost:5099";
const DEFAULT_CONTROLLER_TIMEOUT_SECS: u64 = 5;

#[derive(Clone, Debug)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub controller_url: String,
    pub controller_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Config, Error> {
        let bind_addr = env::var("BIND_ADDR")
            .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
            .parse()?;
        let controller_url =
            env::var("CONTROLLER_URL").unwrap_or_else(|_| DEFAULT_CONTROLLER_URL.to_string());
        let controller_timeout = match env::var("CONTROLLER_TIMEOUT_SECS") {
            Ok(secs) => Duration::from_secs(secs.parse().map_err(|_| {
                Error::Config(format!("CONTROLLER_TIMEOUT_SECS is not a number: {:?}", secs))
            })?),
            Err(_) => Duration::from_secs(DEFAULT_CONTROLLER_TIMEOUT_SECS),
        };

        Ok(Config {
            bind_addr,
            controller_url,
            controller_timeout,
        })
    }
}
