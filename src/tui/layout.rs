use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::article::AssembledArticle;
use crate::domain::richtext;
use crate::render::{format_date, format_edited};
use crate::tui::app::{TuiApp, View};

pub fn render(frame: &mut Frame, app: &TuiApp, site_title: &str) {
    let constraints = if app.is_preview() {
        vec![
            Constraint::Length(1), // Preview banner
            Constraint::Min(5),    // Main view
            Constraint::Length(1), // Status bar
        ]
    } else {
        vec![Constraint::Min(5), Constraint::Length(1)]
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(frame.area());

    let (main_area, status_area) = if app.is_preview() {
        render_preview_banner(frame, chunks[0]);
        (chunks[1], chunks[2])
    } else {
        (chunks[0], chunks[1])
    };

    match &app.view {
        View::List => render_listing(frame, app, site_title, main_area),
        View::LoadingArticle { uid } => render_loading(frame, uid, main_area),
        View::Article { article, scroll } => render_article(frame, article, *scroll, main_area),
    }

    render_status_bar(frame, app, status_area);
}

fn render_preview_banner(frame: &mut Frame, area: Rect) {
    let banner = Paragraph::new("Preview mode — x to exit")
        .style(Style::default().fg(Color::Black).bg(Color::Yellow));
    frame.render_widget(banner, area);
}

fn render_listing(frame: &mut Frame, app: &TuiApp, site_title: &str, area: Rect) {
    let items: Vec<ListItem> = app
        .listing
        .articles()
        .iter()
        .enumerate()
        .map(|(i, summary)| {
            let date = summary
                .first_publication_date
                .as_ref()
                .map(|d| d.format("%d %b %Y").to_string())
                .unwrap_or_else(|| "           ".to_string());

            let line = Line::from(vec![
                Span::styled(date, Style::default().fg(Color::Yellow)),
                Span::raw("  "),
                Span::styled(
                    summary.title.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw("  "),
                Span::styled(summary.subtitle.clone(), Style::default().fg(Color::DarkGray)),
            ]);

            let style = if i == app.selected {
                Style::default().bg(Color::Cyan).fg(Color::Black)
            } else {
                Style::default()
            };

            ListItem::new(line).style(style)
        })
        .collect();

    let title = format!(" {} ({} posts) ", site_title, app.listing.len());
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let list = List::new(items).block(block);
    frame.render_widget(list, area);
}

fn render_loading(frame: &mut Frame, uid: &str, area: Rect) {
    let block = Block::default()
        .title(" Loading ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let text = Text::from(vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("Loading {uid}..."),
            Style::default().fg(Color::DarkGray),
        )),
    ]);

    let paragraph = Paragraph::new(text).block(block).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn render_article(frame: &mut Frame, article: &AssembledArticle, scroll: u16, area: Rect) {
    let detail = &article.detail;
    let mut lines = Vec::new();

    lines.push(Line::from(Span::styled(
        detail.title.clone(),
        Style::default().add_modifier(Modifier::BOLD),
    )));
    if !detail.subtitle.is_empty() {
        lines.push(Line::from(Span::styled(
            detail.subtitle.clone(),
            Style::default().fg(Color::DarkGray),
        )));
    }
    lines.push(Line::from(""));

    let meta_style = Style::default().fg(Color::Yellow);
    lines.push(Line::from(Span::styled(
        format!(
            "{}  ·  {}  ·  {} min",
            format_date(detail.first_publication_date.as_ref()),
            detail.author,
            article.reading_time
        ),
        meta_style,
    )));
    if let Some(edited) = &detail.last_publication_date {
        lines.push(Line::from(Span::styled(format_edited(edited), meta_style)));
    }

    lines.push(Line::from(""));
    lines.push(Line::from("─".repeat(area.width.saturating_sub(2) as usize)));

    for section in &detail.content {
        lines.push(Line::from(""));
        if let Some(heading) = &section.heading {
            lines.push(Line::from(Span::styled(
                heading.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            )));
        }
        let body = richtext::as_text(&section.body);
        for line in body.lines() {
            lines.push(Line::from(line.to_string()));
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from("─".repeat(area.width.saturating_sub(2) as usize)));

    let mut footer = Vec::new();
    if let Some(title) = &article.previous.title {
        footer.push(Span::styled(
            format!("← {title}"),
            Style::default().fg(Color::Blue),
        ));
    }
    if article.previous.is_present() && article.next.is_present() {
        footer.push(Span::raw("   "));
    }
    if let Some(title) = &article.next.title {
        footer.push(Span::styled(
            format!("{title} →"),
            Style::default().fg(Color::Blue),
        ));
    }
    if !footer.is_empty() {
        lines.push(Line::from(footer));
    }

    let block = Block::default()
        .title(format!(" {} ", detail.title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let paragraph = Paragraph::new(Text::from(lines))
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));

    frame.render_widget(paragraph, area);
}

fn render_status_bar(frame: &mut Frame, app: &TuiApp, area: Rect) {
    let status = if app.listing.is_loading() {
        "Loading more posts...".to_string()
    } else if let Some(ref msg) = app.status_message {
        msg.clone()
    } else {
        match &app.view {
            View::List if app.listing.can_load_more() => {
                "j/k:Navigate  Enter:Open  l:Load more  q:Quit".to_string()
            }
            View::List => "j/k:Navigate  Enter:Open  q:Quit".to_string(),
            View::Article { .. } => {
                "j/k:Scroll  p:Previous  n:Next  o:Browser  Esc:Back  q:Quit".to_string()
            }
            View::LoadingArticle { .. } => "Loading...".to_string(),
        }
    };

    let paragraph =
        Paragraph::new(status).style(Style::default().fg(Color::White).bg(Color::DarkGray));

    frame.render_widget(paragraph, area);
}
