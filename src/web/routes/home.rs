use askama::Template;
use axum::response::Html;

#[derive(Template)]
#[template(path = "home.html")]
pub struct HomeTemplate;

pub async fn home_handler() -> Html<String> {
    let template = HomeTemplate;
    Html(template.render().unwrap())
}
