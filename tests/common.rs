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

use std::{convert::Infallible, sync::Arc, time::Duration};

use serde::de::DeserializeOwned;
use warp::{Filter, Reply};

use user_directory::{app, Config, Controller, Directory};

/// Nothing listens on the discard port, so controller probes fail fast.
const UNREACHABLE_CONTROLLER: &str = "http://127.0.0.1:9";

pub fn config() -> Config {
    Config {
        bind_addr: ([127, 0, 0, 1], 0).into(),
        controller_url: UNREACHABLE_CONTROLLER.to_string(),
        controller_timeout: Duration::from_secs(2),
    }
}

pub fn api() -> impl Filter<Extract = (impl Reply,), Error = Infallible> + Clone + 'static {
    let controller = Controller::new(&config()).expect("controller client built");
    app(Arc::new(Directory::new()), controller)
}

pub fn decode<T: DeserializeOwned>(body: &[u8]) -> T {
    serde_json::from_slice(body).unwrap_or_else(|e| {
        panic!(
            "invalid response body {:?}: {}",
            String::from_utf8_lossy(body),
            e
        )
    })
}
