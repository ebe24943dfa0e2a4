pub mod app;
pub mod event;
pub mod layout;

use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::app::{AppContext, Result};
use crate::article;
use crate::listing::{self, Listing};

use self::app::{TuiApp, View};
use self::event::{Action, AppEvent, EventHandler};

type Tui = Terminal<CrosstermBackend<Stdout>>;

pub async fn run(ctx: Arc<AppContext>) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let result = run_app(&mut terminal, ctx).await;
    restore_terminal(&mut terminal)?;
    result
}

fn setup_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

async fn run_app(terminal: &mut Tui, ctx: Arc<AppContext>) -> Result<()> {
    // Initial page, fetched before the loop starts.
    let page = listing::initial_page(
        &*ctx.source,
        &ctx.normalizer,
        ctx.document_type(),
        ctx.config.site.page_size,
        ctx.preview_ref.as_deref(),
    )
    .await?;

    let mut app = TuiApp::new(Listing::from_page(page), ctx.preview_ref.clone());
    let event_handler = EventHandler::new(Duration::from_millis(100));
    let site_title = ctx.config.site.title.clone();

    loop {
        terminal.draw(|frame| layout::render(frame, &app, &site_title))?;

        match event_handler.next()? {
            AppEvent::Key(key) => {
                app.clear_status();
                match Action::from(key) {
                    Action::Quit => {
                        app.should_quit = true;
                    }
                    Action::MoveUp => {
                        app.move_up();
                    }
                    Action::MoveDown => {
                        app.move_down();
                    }
                    Action::Select => {
                        if matches!(app.view, View::List) {
                            if let Some(summary) = app.selected_article() {
                                let uid = summary.uid.clone();
                                open_article(terminal, &mut app, &ctx, &site_title, uid).await?;
                            }
                        }
                    }
                    Action::Back => {
                        if !matches!(app.view, View::List) {
                            app.view = View::List;
                        }
                    }
                    Action::LoadMore => {
                        if matches!(app.view, View::List) {
                            load_more(terminal, &mut app, &ctx, &site_title).await?;
                        }
                    }
                    Action::PreviousPost => {
                        if let View::Article { article, .. } = &app.view {
                            if let Some(uid) = article.previous.uid.clone() {
                                open_article(terminal, &mut app, &ctx, &site_title, uid).await?;
                            }
                        }
                    }
                    Action::NextPost => {
                        if let View::Article { article, .. } = &app.view {
                            if let Some(uid) = article.next.uid.clone() {
                                open_article(terminal, &mut app, &ctx, &site_title, uid).await?;
                            }
                        }
                    }
                    Action::OpenInBrowser => {
                        if let View::Article { article, .. } = &app.view {
                            let base = ctx.config.site.base_url.trim_end_matches('/');
                            if base.is_empty() {
                                app.set_status("No base_url configured".to_string());
                            } else {
                                let url = format!("{}{}", base, article.detail.path());
                                if let Err(e) = open::that(&url) {
                                    app.set_status(format!("Failed to open browser: {}", e));
                                }
                            }
                        }
                    }
                    Action::ExitPreview => {
                        if app.is_preview() {
                            app.exit_preview();
                            app.set_status("Preview mode off".to_string());
                        }
                    }
                    Action::None => {}
                }
            }
            AppEvent::Tick => {}
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Switch to the article view through the loading state: the placeholder
/// is drawn before the fetch starts, and no document field is touched
/// until the fetch resolves.
async fn open_article(
    terminal: &mut Tui,
    app: &mut TuiApp,
    ctx: &AppContext,
    site_title: &str,
    uid: String,
) -> Result<()> {
    app.view = View::LoadingArticle { uid: uid.clone() };
    terminal.draw(|frame| layout::render(frame, app, site_title))?;

    match article::assemble(
        &*ctx.source,
        &ctx.normalizer,
        ctx.document_type(),
        &uid,
        app.preview_ref.as_deref(),
    )
    .await
    {
        Ok(article) => {
            app.view = View::Article {
                article: Box::new(article),
                scroll: 0,
            };
        }
        Err(e) => {
            app.view = View::List;
            app.set_status(format!("Failed to load {}: {}", uid, e));
        }
    }

    Ok(())
}

/// One incremental fetch at a time: the claim is taken before the redraw
/// so the loading indication is visible for the whole request.
async fn load_more(
    terminal: &mut Tui,
    app: &mut TuiApp,
    ctx: &AppContext,
    site_title: &str,
) -> Result<()> {
    let Some(cursor) = app.listing.begin_load() else {
        return Ok(());
    };
    terminal.draw(|frame| layout::render(frame, app, site_title))?;

    match ctx.source.fetch_page(&cursor).await {
        Ok(response) => {
            let page = ctx.normalizer.summaries(&response);
            let added = app.listing.complete_load(page);
            app.set_status(format!("Loaded {} more posts", added));
        }
        Err(e) => {
            app.listing.abort_load();
            app.set_status(format!("Load more failed: {}", e));
        }
    }

    Ok(())
}
