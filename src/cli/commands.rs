use std::path::PathBuf;

use crate::app::{AppContext, Result};
use crate::article;
use crate::domain::richtext;
use crate::listing;
use crate::render::{format_date, format_edited};
use crate::site::SiteBuilder;

pub async fn list_posts(ctx: &AppContext) -> Result<()> {
    let page = listing::initial_page(
        &*ctx.source,
        &ctx.normalizer,
        ctx.document_type(),
        ctx.config.site.page_size,
        ctx.preview_ref.as_deref(),
    )
    .await?;

    if page.results.is_empty() {
        println!("No posts");
        return Ok(());
    }

    for summary in &page.results {
        println!(
            "{:<12} {}  — {} ({})",
            format_date(summary.first_publication_date.as_ref()),
            summary.title,
            summary.subtitle,
            summary.author
        );
    }

    if page.next_page.is_some() {
        println!("... more posts available");
    }

    Ok(())
}

pub async fn show_post(ctx: &AppContext, uid: &str) -> Result<()> {
    let article = article::assemble(
        &*ctx.source,
        &ctx.normalizer,
        ctx.document_type(),
        uid,
        ctx.preview_ref.as_deref(),
    )
    .await?;

    let detail = &article.detail;
    println!("{}", detail.title);
    if !detail.subtitle.is_empty() {
        println!("{}", detail.subtitle);
    }
    println!(
        "{}  ·  {}  ·  {} min",
        format_date(detail.first_publication_date.as_ref()),
        detail.author,
        article.reading_time
    );
    if let Some(edited) = &detail.last_publication_date {
        println!("{}", format_edited(edited));
    }

    for section in &detail.content {
        println!();
        if let Some(heading) = &section.heading {
            println!("## {}", heading);
        }
        println!("{}", richtext::as_text(&section.body));
    }

    println!();
    if let Some(title) = &article.previous.title {
        println!("← {}", title);
    }
    if let Some(title) = &article.next.title {
        println!("→ {}", title);
    }

    Ok(())
}

pub async fn build_site(ctx: &AppContext, output: Option<PathBuf>) -> Result<()> {
    let out_dir = output.unwrap_or_else(|| ctx.config.site.output_dir.clone());

    let builder = SiteBuilder::new(
        ctx.source.clone(),
        ctx.config.clone(),
        ctx.preview_ref.clone(),
    );
    let report = builder.build(&out_dir).await?;

    println!(
        "Generated {} article pages into {}",
        report.articles,
        report.out_dir.display()
    );

    Ok(())
}
