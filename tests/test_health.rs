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

use user_directory::{controller, ErrorResponse};

mod common;

#[tokio::test]
async fn health() {
    let api = common::api();

    let res = warp::test::request()
        .method("GET")
        .path("/_health")
        .reply(&api)
        .await;
    assert_eq!(res.status(), 200);
    let health: controller::Health = common::decode(res.body());
    assert_eq!(health.status, "ok");
    assert_eq!(health.service, "UserService");
}

#[tokio::test]
async fn unreachable_controller() {
    let api = common::api();

    let res = warp::test::request()
        .method("GET")
        .path("/_controller/ping")
        .reply(&api)
        .await;
    assert_eq!(res.status(), 200, "probe failures are reported in the body");
    let ping: controller::Ping = common::decode(res.body());
    assert_eq!(ping.controller, common::config().controller_url);
    assert!(ping.status.is_none());
    assert!(ping.error.is_some());
}

#[tokio::test]
async fn unknown_route() {
    let api = common::api();

    let res = warp::test::request()
        .method("GET")
        .path("/nowhere")
        .reply(&api)
        .await;
    assert_eq!(res.status(), 404);
    let err: ErrorResponse = common::decode(res.body());
    assert!(!err.success);
    assert_eq!(err.error, "NOT_FOUND");
}
