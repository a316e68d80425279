#![allow(clippy::new_without_default)]

use app::{App, AppError, AppResult};
use contracts::ErrorBody;
use hyper::{
    header::{HeaderValue, CONTENT_TYPE},
    Body, Request, Response, StatusCode,
};
use route::Route;
use serde::Serialize;
use std::{net::IpAddr, sync::Arc, time};

pub mod app;
pub mod auth;
pub mod controller;
pub mod route;

#[macro_use]
extern crate log;

#[derive(Clone, Debug)]
pub struct AppSettings {
    pub host: IpAddr,
    pub port: u16,
}

pub async fn entry_point(
    webserver: Arc<Webserver>,
    request: Request<Body>,
) -> Result<Response<Body>, hyper::Error> {
    Ok(webserver.handle_request(request).await)
}

pub struct Webserver {
    app: Arc<App>,
}

impl Webserver {
    pub fn new(app: Arc<App>) -> Self {
        Self { app }
    }

    pub async fn handle_request(&self, request: Request<Body>) -> Response<Body> {
        let timer = time::Instant::now();
        let method = request.method().clone();
        let path = request.uri().path().to_owned();

        let result = match Route::from_parts(&method, &path) {
            Ok(route) => {
                trace!("matched '{} {}' to {:?}", method, path, route);
                self.app.handle_single(route, request).await
            }
            Err(error) => Err(error),
        };

        let response = match result {
            Ok(response) => response,
            Err(error) => {
                match &error.context {
                    Some(context) => error!(
                        "error handling '{} {}': '{}' with context: {}",
                        method, path, error.message, context
                    ),
                    None => warn!("rejected '{} {}': '{}'", method, path, error.message),
                }
                error_response(&error)
            }
        };

        info!(
            "handled '{} {}' with status {} in {:?}",
            method,
            path,
            response.status(),
            timer.elapsed()
        );

        response
    }
}

/// Serializes `body` into a json response with the given status.
pub(crate) fn json_response<T>(body: &T, status: StatusCode) -> AppResult<Response<Body>>
where
    T: Serialize,
{
    let b = serde_json::to_vec(body)?;
    Ok(build_response(Body::from(b), status, true))
}

pub(crate) fn empty_response(status: StatusCode) -> Response<Body> {
    build_response(Body::empty(), status, false)
}

pub(crate) fn ping_pong_response() -> Response<Body> {
    build_response(Body::from("pong"), StatusCode::OK, false)
}

fn error_response(error: &AppError) -> Response<Body> {
    let body = ErrorBody::new(error.message.clone());
    let b = serde_json::to_vec(&body).unwrap_or_default();
    build_response(Body::from(b), error.status, true)
}

fn build_response(body: Body, status: StatusCode, json: bool) -> Response<Body> {
    let mut response = Response::new(body);
    *response.status_mut() = status;
    if json {
        response
            .headers_mut()
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    }
    response
}
