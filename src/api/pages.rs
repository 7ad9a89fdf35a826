use axum::{
    Form,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use crate::{types::PlaylistSummary, utils};

const HOME_LINK: &str = "<a href='/home'>Home</a>";

pub async fn index() -> Html<&'static str> {
    Html("Hello! <a href='/login'>Login with Spotify</a>")
}

pub async fn home() -> Html<&'static str> {
    Html(
        "<a href='/playlists'>Lists of playlists on your account</a>\
         <br>\
         <a href='/geturl'>Get new recommended playlists</a>\
         <br>\
         <a href='/suggestions'>Get new music suggestions</a>\
         <br>\
         <a href='/logout'>Log out</a>",
    )
}

#[derive(Debug, Deserialize)]
pub struct PlaylistUrlForm {
    url: String,
}

pub async fn get_url_form() -> Html<String> {
    Html(url_form(None))
}

/// Turns a pasted playlist link into a redirect to its recommendations.
pub async fn submit_url(Form(form): Form<PlaylistUrlForm>) -> Response {
    match utils::parse_playlist_id(&form.url) {
        Some(id) => Redirect::to(&format!("/recommendations/{}", id)).into_response(),
        None => (
            StatusCode::BAD_REQUEST,
            Html(url_form(Some("That does not look like a Spotify playlist link."))),
        )
            .into_response(),
    }
}

fn url_form(error: Option<&str>) -> String {
    let error = error
        .map(|e| format!("<p>{}</p>", utils::escape_html(e)))
        .unwrap_or_default();

    format!(
        "{error}<form method='post' action='/geturl'>\
         <label for='url'>Playlist link</label> \
         <input type='text' id='url' name='url' placeholder='https://open.spotify.com/playlist/...'> \
         <button type='submit'>Get recommendations</button>\
         </form>\
         <br>\
         {HOME_LINK}"
    )
}

/// Success page: a one-line message followed by the Home link.
pub fn message_page(message: &str) -> Html<String> {
    Html(format!(
        "<a>{}</a><br>{}",
        utils::escape_html(message),
        HOME_LINK
    ))
}

/// Failure page: a one-line error message followed by the Home link.
pub fn error_page(status: StatusCode, message: &str) -> Response {
    (
        status,
        Html(format!(
            "<a>Error: {}</a><br>{}",
            utils::escape_html(message),
            HOME_LINK
        )),
    )
        .into_response()
}

/// Renders playlist names with their indented track names.
pub fn playlists_page(playlists: &[PlaylistSummary]) -> Html<String> {
    let mut body = String::new();
    for playlist in playlists {
        body.push_str(&format!("{}:<br>", utils::escape_html(playlist.name())));
        for track in playlist.tracks() {
            body.push_str(&format!("&emsp;{}<br>", utils::escape_html(track)));
        }
        body.push_str("<br>");
    }

    Html(format!("{}<br><a>{}</a>", HOME_LINK, body))
}
