//! User operations on top of the transport adapter.
//!
//! # Design
//! Each operation is an adapter call followed by a `parse_*` method that
//! consumes the `HttpResponse`. The parse step holds all status and body
//! interpretation, so it can be exercised with canned responses. Non-2xx
//! statuses are rejected on every operation; a 404 on get-by-id keeps its own
//! error kind. Creation checks the status before touching the body, so an
//! HTML error page on a 500 reports the failed creation rather than a JSON
//! syntax error.

use serde::de::DeserializeOwned;
use tracing::warn;

use crate::adapter::ReqResAdapter;
use crate::error::ApiError;
use crate::http::{HttpResponse, HttpTransport};
use crate::types::{CreatedUser, CreatedUserBody, NewUser, SingleUser, UserPage};

const GET_USER: &str = "Cannot get user";
const GET_USERS: &str = "Cannot get users";
const CREATE_USER: &str = "Could not create user";

/// Page requested when the caller has no preference.
pub const FIRST_PAGE: u32 = 1;

/// Synchronous client for the users endpoints.
///
/// Holds only the adapter, so one instance can serve any number of
/// independent calls (and threads, when the transport allows it).
#[derive(Debug, Clone)]
pub struct UserService<T> {
    adapter: ReqResAdapter<T>,
}

impl<T: HttpTransport> UserService<T> {
    pub fn new(adapter: ReqResAdapter<T>) -> Self {
        Self { adapter }
    }

    pub fn adapter(&self) -> &ReqResAdapter<T> {
        &self.adapter
    }

    /// `GET users/{id}`.
    ///
    /// Fails with `CannotFindUser` on 404 and with `Request` on transport
    /// failure or any other non-2xx status.
    pub fn get_user_by_id(&self, id: i64) -> Result<SingleUser, ApiError> {
        let response = self
            .adapter
            .get(&format!("users/{id}"), &[])
            .map_err(|e| ApiError::transport(GET_USER, e))?;
        self.parse_get_user(id, response)
    }

    /// `GET users?page={page}`.
    pub fn get_users(&self, page: u32) -> Result<UserPage, ApiError> {
        let response = self
            .adapter
            .get("users", &[("page", page.to_string())])
            .map_err(|e| ApiError::transport(GET_USERS, e))?;
        self.parse_get_users(response)
    }

    pub fn get_first_page(&self) -> Result<UserPage, ApiError> {
        self.get_users(FIRST_PAGE)
    }

    /// `POST users` with `{name, job}`; returns the id assigned upstream.
    pub fn create_user(&self, name: &str, job: &str) -> Result<i64, ApiError> {
        self.create_user_details(name, job).map(|created| created.id)
    }

    /// Like `create_user`, but keeps the whole creation echo.
    pub fn create_user_details(&self, name: &str, job: &str) -> Result<CreatedUser, ApiError> {
        let input = NewUser {
            name: name.to_string(),
            job: job.to_string(),
        };
        let body = serde_json::to_value(&input).map_err(ApiError::Serialization)?;
        let response = self
            .adapter
            .post("users", &body)
            .map_err(|e| ApiError::transport(CREATE_USER, e))?;
        self.parse_create_user(response)
    }

    pub fn parse_get_user(&self, id: i64, response: HttpResponse) -> Result<SingleUser, ApiError> {
        if response.status == 404 {
            return Err(ApiError::CannotFindUser { id });
        }
        check_success(&response, GET_USER)?;
        decode(&response, GET_USER)
    }

    pub fn parse_get_users(&self, response: HttpResponse) -> Result<UserPage, ApiError> {
        check_success(&response, GET_USERS)?;
        decode(&response, GET_USERS)
    }

    pub fn parse_create_user(&self, response: HttpResponse) -> Result<CreatedUser, ApiError> {
        if response.status != 201 {
            warn!(status = response.status, "user creation was not acknowledged");
            return Err(ApiError::request(format!(
                "{CREATE_USER}, an unknown error occurred"
            )));
        }
        let body: CreatedUserBody = decode(&response, CREATE_USER)?;
        body.into_created()
            .ok_or_else(|| ApiError::request(format!("{CREATE_USER}: ID not found in response")))
    }
}

fn check_success(response: &HttpResponse, context: &str) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    warn!(status = response.status, context, "unexpected response status");
    Err(ApiError::unexpected_status(context, response.status))
}

fn decode<D: DeserializeOwned>(response: &HttpResponse, context: &'static str) -> Result<D, ApiError> {
    serde_json::from_str(&response.body).map_err(|source| ApiError::Decode { context, source })
}
