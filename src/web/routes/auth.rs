use askama::Template;
use axum::{
    extract::Query,
    http::header,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use cookie::Cookie;
use serde::Deserialize;
use tracing::error;

use crate::api::auth_api;

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
    pub registered: bool,
}

#[derive(Template)]
#[template(path = "register.html")]
pub struct RegisterTemplate {
    pub error: Option<String>,
    pub email: String,
}

#[derive(Deserialize)]
pub struct LoginQuery {
    pub registered: Option<String>,
}

#[derive(Deserialize)]
pub struct LoginForm {
    email: String,
    password: String,
}

#[derive(Deserialize)]
pub struct RegisterForm {
    email: String,
    password: String,
    confirm_password: String,
}

pub async fn login_page(Query(query): Query<LoginQuery>) -> Html<String> {
    let template = LoginTemplate {
        error: None,
        registered: query.registered.is_some(),
    };
    Html(template.render().unwrap())
}

pub async fn login_handler(Form(form): Form<LoginForm>) -> Result<Response, Html<String>> {
    println!("📝 LOGIN ATTEMPT: email={}", form.email);

    match auth_api::login(&form.email, &form.password).await {
        Ok(tokens) => {
            // Maak de sessie-cookie
            let mut access_cookie = Cookie::new("access_token", tokens.access_token);
            access_cookie.set_path("/");
            access_cookie.set_http_only(true);
            access_cookie.set_same_site(cookie::SameSite::Lax);

            let mut response = Redirect::to("/matches").into_response();
            response.headers_mut().append(
                header::SET_COOKIE,
                access_cookie.to_string().parse().unwrap(),
            );

            println!("✅ LOGIN SUCCESS!");
            Ok(response)
        }
        Err(e) => {
            println!("❌ Login failed: status={}", e.status);
            error!("Login against backend failed: {}", e.status);
            let template = LoginTemplate {
                error: Some(
                    e.detail()
                        .unwrap_or_else(|| "Login failed. Check your email and password.".to_string()),
                ),
                registered: false,
            };
            Err(Html(template.render().unwrap()))
        }
    }
}

pub async fn register_page() -> Html<String> {
    let template = RegisterTemplate {
        error: None,
        email: String::new(),
    };
    Html(template.render().unwrap())
}

pub async fn register_handler(Form(form): Form<RegisterForm>) -> Result<Response, Html<String>> {
    if form.password != form.confirm_password {
        let template = RegisterTemplate {
            error: Some("Passwords do not match.".to_string()),
            email: form.email,
        };
        return Err(Html(template.render().unwrap()));
    }
    if form.password.len() < 8 {
        let template = RegisterTemplate {
            error: Some("Password must be at least 8 characters.".to_string()),
            email: form.email,
        };
        return Err(Html(template.render().unwrap()));
    }

    match auth_api::register(&form.email, &form.password).await {
        Ok(account) => {
            println!("✅ REGISTERED: user_id={}", account.user_id);
            Ok(Redirect::to("/login?registered=1").into_response())
        }
        Err(e) => {
            error!("Registration against backend failed: {}", e.status);
            let template = RegisterTemplate {
                error: Some(
                    e.detail()
                        .unwrap_or_else(|| "Registration failed. Please try again.".to_string()),
                ),
                email: form.email,
            };
            Err(Html(template.render().unwrap()))
        }
    }
}

pub async fn logout_handler() -> Response {
    // Clear the session cookie
    let mut access_cookie = Cookie::new("access_token", "");
    access_cookie.set_path("/");
    access_cookie.set_http_only(true);
    access_cookie.set_same_site(cookie::SameSite::Lax);
    access_cookie.set_max_age(None);

    let mut response = Redirect::to("/login").into_response();
    response.headers_mut().append(
        header::SET_COOKIE,
        access_cookie.to_string().parse().unwrap(),
    );

    response
}
