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

use tokio::signal;
use tracing_subscriber::EnvFilter;

use user_directory::{app, Config, Controller, Directory, Error};

const DEFAULT_LOG_FILTER: &str = "user_directory=info,warp=info";

#[tokio::main]
async fn main() -> Result<(), Error> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let config = Config::from_env()?;
    let controller = Controller::new(&config)?;
    tracing::info!(controller = %controller.base_url(), "controller configured");

    let directory = Arc::new(Directory::new());
    let (addr, server) =
        warp::serve(app(directory, controller)).try_bind_with_graceful_shutdown(
            config.bind_addr,
            async {
                match signal::ctrl_c().await {
                    Ok(()) => tracing::info!("shutdown signal received"),
                    Err(e) => tracing::error!(error = %e, "error listening for shutdown"),
                }
            },
        )?;

    tracing::info!(%addr, "user directory listening");
    server.await;
    tracing::info!("server stopped");
    Ok(())
}
