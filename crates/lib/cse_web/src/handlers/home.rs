use axum::extract::State;
use axum::response::Response;
use axum_extra::extract::CookieJar;

use crate::AppState;
use crate::handlers::{Page, render};
use crate::middleware::session::Session;

const HERO: &str = r#"<section id="hero">
<h2>DMC Delorean</h2>
<ul><li>3 Cup holders</li><li>Superman doors</li><li>Fuzzy dice!</li></ul>
<a href="/inventory/type/1" class="cta" title="Browse our inventory">Own Today</a>
</section>
<section id="reviews">
<h2>DMC Delorean Reviews</h2>
<ul>
<li>"So fast it's almost like traveling in time." (4/5)</li>
<li>"Coolest ride on the road." (4/5)</li>
<li>"I'm feeling Marty McFly!" (5/5)</li>
</ul>
</section>"#;

/// `GET /`
pub async fn home(State(state): State<AppState>, session: Session, jar: CookieJar) -> Response {
    render(&state, &session, jar, Page::new("Welcome to CSE Motors!", HERO.to_string())).await
}
