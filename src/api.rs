// src/api.rs
use crate::controller::{PortfolioBrowser, UserForm};
use crate::error::CustomError;
use crate::view::render_page;
use log::{error, info};
use serde::Deserialize;
use std::convert::Infallible;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;
use warp::http::{StatusCode, Uri};
use warp::{Filter, Rejection, Reply};

pub type SharedBrowser = Arc<RwLock<PortfolioBrowser>>;

const MAX_FORM_BYTES: u64 = 16 * 1024;

#[derive(Deserialize)]
struct SelectForm {
    #[serde(rename = "userId", default)]
    user_id: String,
}

/// Posted by a "View" button. It submits the edit form as well, so values
/// typed but not saved are kept on screen.
#[derive(Deserialize)]
struct ViewStockForm {
    #[serde(flatten)]
    user: UserForm,
    #[serde(default)]
    symbol: String,
}

pub fn routes(
    browser: SharedBrowser,
    logos_dir: PathBuf,
) -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
    let index = warp::path::end()
        .and(warp::get())
        .and(with_browser(browser.clone()))
        .and_then(index_handler);

    let select = warp::path!("users" / "select")
        .and(warp::post())
        .and(with_browser(browser.clone()))
        .and(form_body::<SelectForm>())
        .and_then(select_user_handler);

    let save = warp::path!("users" / "save")
        .and(warp::post())
        .and(with_browser(browser.clone()))
        .and(form_body::<UserForm>())
        .and_then(save_user_handler);

    let delete = warp::path!("users" / "delete")
        .and(warp::post())
        .and(with_browser(browser.clone()))
        .and(form_body::<UserForm>())
        .and_then(delete_user_handler);

    let view_stock = warp::path!("stocks" / "view")
        .and(warp::post())
        .and(with_browser(browser.clone()))
        .and(form_body::<ViewStockForm>())
        .and_then(view_stock_handler);

    let users_json = warp::path!("api" / "users")
        .and(warp::get())
        .and(with_browser(browser.clone()))
        .and_then(users_json_handler);

    let stocks_json = warp::path!("api" / "stocks")
        .and(warp::get())
        .and(with_browser(browser))
        .and_then(stocks_json_handler);

    let logos = warp::path("logos").and(warp::fs::dir(logos_dir));

    index
        .or(select)
        .or(save)
        .or(delete)
        .or(view_stock)
        .or(users_json)
        .or(stocks_json)
        .or(logos)
}

fn with_browser(
    browser: SharedBrowser,
) -> impl Filter<Extract = (SharedBrowser,), Error = Infallible> + Clone {
    warp::any().map(move || browser.clone())
}

fn form_body<T>() -> impl Filter<Extract = (T,), Error = Rejection> + Clone
where
    T: for<'de> Deserialize<'de> + Send,
{
    warp::body::content_length_limit(MAX_FORM_BYTES).and(warp::body::form())
}

fn back_to_page() -> impl Reply {
    warp::redirect::see_other(Uri::from_static("/"))
}

async fn index_handler(browser: SharedBrowser) -> Result<impl Reply, Rejection> {
    let browser = browser.read().await;
    match render_page(&browser) {
        Ok(html) => Ok(warp::reply::html(html)),
        Err(e) => {
            error!("Failed to render page: {}", e);
            Err(warp::reject::custom(CustomError::from(e)))
        }
    }
}

async fn select_user_handler(
    browser: SharedBrowser,
    form: SelectForm,
) -> Result<impl Reply, Rejection> {
    if browser.write().await.select_user(&form.user_id) {
        info!("Selected user {}.", form.user_id);
    }
    Ok(back_to_page())
}

async fn save_user_handler(
    browser: SharedBrowser,
    form: UserForm,
) -> Result<impl Reply, Rejection> {
    let user_id = form.user_id.clone();
    if browser.write().await.save_user(form) {
        info!("User {} saved successfully.", user_id);
    }
    Ok(back_to_page())
}

async fn delete_user_handler(
    browser: SharedBrowser,
    form: UserForm,
) -> Result<impl Reply, Rejection> {
    let user_id = form.user_id.clone();
    if browser.write().await.delete_user(form) {
        info!("User {} deleted successfully.", user_id);
    }
    Ok(back_to_page())
}

async fn view_stock_handler(
    browser: SharedBrowser,
    form: ViewStockForm,
) -> Result<impl Reply, Rejection> {
    let mut browser = browser.write().await;
    browser.keep_form(form.user);
    if browser.show_stock_details(&form.symbol) {
        info!("Showing stock {}.", form.symbol);
    }
    Ok(back_to_page())
}

async fn users_json_handler(browser: SharedBrowser) -> Result<impl Reply, Rejection> {
    let browser = browser.read().await;
    Ok(warp::reply::json(&browser.users()))
}

async fn stocks_json_handler(browser: SharedBrowser) -> Result<impl Reply, Rejection> {
    let browser = browser.read().await;
    Ok(warp::reply::json(&browser.stocks()))
}

pub async fn handle_rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    let (status, message) = if err.is_not_found() {
        (StatusCode::NOT_FOUND, "Not found".to_string())
    } else if let Some(e) = err.find::<CustomError>() {
        (StatusCode::INTERNAL_SERVER_ERROR, e.message.clone())
    } else if err.find::<warp::reject::PayloadTooLarge>().is_some() {
        (StatusCode::PAYLOAD_TOO_LARGE, "Form too large".to_string())
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        (StatusCode::METHOD_NOT_ALLOWED, "Method not allowed".to_string())
    } else {
        error!("Unhandled rejection: {:?}", err);
        (StatusCode::BAD_REQUEST, "Bad request".to_string())
    };
    Ok(warp::reply::with_status(message, status))
}
