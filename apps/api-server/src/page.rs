//! Server-rendered landing page.

use domain::{CatalogSearch, EnrichedTalk, Speaker};
use http_common::html_escape;

/// Render the full landing page for one search.
pub fn render_index(search: &CatalogSearch) -> String {
    let event = &search.event;
    let has_query = !search.query.is_empty();

    let schedule_html = if search.schedule.is_empty() {
        r#"<p class="empty">No se encontraron eventos en la agenda.</p>"#.to_string()
    } else {
        search.schedule.iter().map(render_talk).collect()
    };

    let speakers_html = if search.speakers.is_empty() {
        r#"<p class="empty">No se encontraron ponentes.</p>"#.to_string()
    } else {
        search.speakers.iter().map(render_speaker_card).collect()
    };

    let no_results_html = if has_query && search.schedule.is_empty() && search.speakers.is_empty()
    {
        format!(
            r#"<div class="no-results" role="status">No hay resultados para &quot;{}&quot;. <a href="/">Limpiar búsqueda</a></div>"#,
            html_escape(&search.query)
        )
    } else {
        String::new()
    };

    let clear_html = if has_query {
        r#"<a href="/" class="clear-search" aria-label="Limpiar búsqueda">&times;</a>"#
    } else {
        ""
    };

    format!(
        r##"<!DOCTYPE html>
<html lang="es">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <link rel="stylesheet" href="/static/styles.css">
</head>
<body>
    <header>
        <form id="search-form" method="get" action="/">
            <input id="search-input" type="search" name="q" value="{query}" placeholder="Buscar charlas, categorías o ponentes">
            {clear}
            <button type="submit">Buscar</button>
        </form>
    </header>
    <main>
        <section id="event-info">
            <h2>{title}</h2>
            <p class="lead">{description}</p>
            <div class="event-details">
                <div class="detail-item"><span class="icon">📅</span><span>{date}</span></div>
                <div class="detail-item"><span class="icon">📍</span><span>{location}</span></div>
            </div>
        </section>
        {no_results}
        <section id="schedule">
            <h3>Agenda</h3>
            <div id="schedule-timeline">{schedule}</div>
        </section>
        <section id="speakers">
            <h3>Ponentes</h3>
            <div id="speakers-grid">{speakers}</div>
        </section>
    </main>
</body>
</html>"##,
        title = html_escape(&event.title),
        description = html_escape(&event.description),
        date = html_escape(&event.date),
        location = html_escape(&event.location),
        query = html_escape(&search.query),
        clear = clear_html,
        no_results = no_results_html,
        schedule = schedule_html,
        speakers = speakers_html,
    )
}

fn render_talk(item: &EnrichedTalk) -> String {
    let talk = &item.talk;
    let break_class = if talk.category.eq_ignore_ascii_case("break") {
        " lunch-break"
    } else {
        ""
    };
    let speakers: String = item
        .speaker_details
        .iter()
        .map(|s| {
            format!(
                r#"<div class="speaker"><span class="speaker-name">{}</span><span class="speaker-role">{}</span><a href="{}" target="_blank" rel="noopener" class="linkedin-link">in</a></div>"#,
                html_escape(&s.name),
                html_escape(&s.role),
                html_escape(&s.profile_link),
            )
        })
        .collect();
    let speakers_block = if speakers.is_empty() {
        String::new()
    } else {
        format!(r#"<div class="speakers">{}</div>"#, speakers)
    };

    format!(
        r#"<div class="timeline-item{break_class}" id="talk-{id}"><div class="time">{time}</div><div class="content"><div class="category-tag {cat_class}">{category}</div><h4>{title}</h4><p class="description">{description}</p>{speakers}</div></div>"#,
        break_class = break_class,
        id = html_escape(&talk.id),
        time = html_escape(&talk.time),
        cat_class = category_class(&talk.category),
        category = html_escape(&talk.category),
        title = html_escape(&talk.title),
        description = html_escape(&talk.description),
        speakers = speakers_block,
    )
}

fn render_speaker_card(s: &Speaker) -> String {
    format!(
        r#"<div class="speaker-card"><div class="speaker-avatar">👤</div><h4>{}</h4><p>{}</p><a href="{}" target="_blank" rel="noopener">Ver LinkedIn</a></div>"#,
        html_escape(&s.name),
        html_escape(&s.role),
        html_escape(&s.profile_link),
    )
}

/// `AI/ML` -> `ai-ml`; anything outside `[a-z0-9]` becomes a dash.
fn category_class(category: &str) -> String {
    category
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect()
}
