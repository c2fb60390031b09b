use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{debug, info};

pub const PER_PAGE: usize = 6;

const SUPPORT_URL: &str = "https://contentcaddy.io?utm_source=reqres&utm_medium=json&utm_campaign=referral";
const SUPPORT_TEXT: &str = "Tired of writing endless social media content? Let Content Caddy generate it for you.";

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub avatar: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Support {
    pub url: String,
    pub text: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SingleUser {
    pub data: User,
    pub support: Support,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UserPage {
    pub page: usize,
    pub per_page: usize,
    pub total: usize,
    pub total_pages: usize,
    pub data: Vec<User>,
    pub support: Support,
}

#[derive(Deserialize)]
pub struct CreateUser {
    pub name: String,
    pub job: String,
}

/// Creation echo. Like reqres, the id is a numeric string.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CreatedUser {
    pub name: String,
    pub job: String,
    pub id: String,
    #[serde(rename = "createdAt")]
    pub created_at: String,
}

#[derive(Deserialize)]
pub struct ListParams {
    pub page: Option<usize>,
}

pub struct Store {
    users: BTreeMap<i64, User>,
    next_id: i64,
}

impl Store {
    /// The twelve users reqres serves.
    pub fn seeded() -> Self {
        let names = [
            ("George", "Bluth"),
            ("Janet", "Weaver"),
            ("Emma", "Wong"),
            ("Eve", "Holt"),
            ("Charles", "Morris"),
            ("Tracey", "Ramos"),
            ("Michael", "Lawson"),
            ("Lindsay", "Ferguson"),
            ("Tobias", "Funke"),
            ("Byron", "Fields"),
            ("George", "Edwards"),
            ("Rachel", "Howell"),
        ];
        let users: BTreeMap<i64, User> = names
            .iter()
            .zip(1..)
            .map(|((first, last), id)| {
                let user = User {
                    id,
                    email: format!("{}.{}@reqres.in", first.to_lowercase(), last.to_lowercase()),
                    first_name: first.to_string(),
                    last_name: last.to_string(),
                    avatar: format!("https://reqres.in/img/faces/{id}-image.jpg"),
                };
                (id, user)
            })
            .collect();
        let next_id = users.len() as i64 + 1;
        Self { users, next_id }
    }
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::seeded()));
    Router::new()
        .route("/api/users", get(list_users).post(create_user))
        .route("/api/users/{id}", get(get_user))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "mock reqres server listening");
    }
    axum::serve(listener, app()).await
}

fn support() -> Support {
    Support {
        url: SUPPORT_URL.to_string(),
        text: SUPPORT_TEXT.to_string(),
    }
}

async fn list_users(State(db): State<Db>, Query(params): Query<ListParams>) -> Json<UserPage> {
    let store = db.read().await;
    let page = params.page.unwrap_or(1).max(1);
    let total = store.users.len();
    let data: Vec<User> = store
        .users
        .values()
        .skip((page - 1).saturating_mul(PER_PAGE))
        .take(PER_PAGE)
        .cloned()
        .collect();
    debug!(page, returned = data.len(), "list users");
    Json(UserPage {
        page,
        per_page: PER_PAGE,
        total,
        total_pages: total.div_ceil(PER_PAGE),
        data,
        support: support(),
    })
}

async fn get_user(
    State(db): State<Db>,
    Path(id): Path<i64>,
) -> Result<Json<SingleUser>, (StatusCode, Json<Value>)> {
    let store = db.read().await;
    match store.users.get(&id) {
        Some(user) => Ok(Json(SingleUser {
            data: user.clone(),
            support: support(),
        })),
        None => {
            debug!(id, "user not found");
            Err((StatusCode::NOT_FOUND, Json(json!({}))))
        }
    }
}

async fn create_user(
    State(db): State<Db>,
    Json(input): Json<CreateUser>,
) -> (StatusCode, Json<CreatedUser>) {
    let mut store = db.write().await;
    let id = store.next_id;
    store.next_id += 1;
    info!(id, name = %input.name, "created user");
    let created = CreatedUser {
        name: input.name,
        job: input.job,
        id: id.to_string(),
        created_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    };
    (StatusCode::CREATED, Json(created))
}
