//! Full-page HTML for the generated site: the listing page and the
//! article pages.

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::article::AssembledArticle;
use crate::config::Config;
use crate::domain::{ArticleListPage, NeighborLink};
use crate::render::{body_html, format_date, format_edited};

/// Client-side half of the "load more" contract: fetch the cursor held in
/// `data-next`, append the results after the existing ones, then either
/// advance the cursor or remove the control. The button is disabled while
/// a request is pending so only one fetch is in flight.
const LOAD_MORE_SCRIPT: &str = r#"<script>
const button = document.getElementById('load-more');
button.addEventListener('click', async () => {
  button.disabled = true;
  button.textContent = 'Loading...';
  const response = await fetch(button.dataset.next).then(r => r.json());
  const list = document.getElementById('posts');
  for (const post of response.results) {
    const card = document.createElement('div');
    card.className = 'post-card';
    const link = document.createElement('a');
    link.href = '/post/' + post.uid;
    const title = document.createElement('h2');
    title.textContent = post.data.title;
    link.appendChild(title);
    const subtitle = document.createElement('p');
    subtitle.textContent = post.data.subtitle;
    const footer = document.createElement('footer');
    footer.textContent = post.data.author;
    card.append(link, subtitle, footer);
    list.appendChild(card);
  }
  if (response.next_page) {
    button.dataset.next = response.next_page;
    button.textContent = 'Load more posts';
    button.disabled = false;
  } else {
    button.remove();
  }
});
</script>"#;

pub fn listing_page(config: &Config, page: &ArticleListPage, preview: bool) -> String {
    let mut cards = String::new();
    for summary in &page.results {
        cards.push_str(&format!(
            concat!(
                "<div class=\"post-card\">",
                "<a href=\"{path}\"><h2>{title}</h2></a>",
                "<p>{subtitle}</p>",
                "<footer><time>{date}</time><span>{author}</span></footer>",
                "</div>"
            ),
            path = encode_double_quoted_attribute(&summary.path()),
            title = encode_text(&summary.title),
            subtitle = encode_text(&summary.subtitle),
            date = format_date(summary.first_publication_date.as_ref()),
            author = encode_text(&summary.author),
        ));
    }

    let mut body = format!("<section id=\"posts\">{cards}</section>");

    // The control only exists while the source reports more results.
    if let Some(next_page) = &page.next_page {
        body.push_str(&format!(
            "<button id=\"load-more\" data-next=\"{}\">Load more posts</button>",
            encode_double_quoted_attribute(next_page)
        ));
        body.push_str(LOAD_MORE_SCRIPT);
    }

    layout(config, &format!("Home | {}", config.site.title), &body, preview)
}

pub fn article_page(config: &Config, article: &AssembledArticle, preview: bool) -> String {
    let detail = &article.detail;
    let mut body = String::new();

    if !detail.banner_url.is_empty() {
        body.push_str(&format!(
            "<img class=\"banner\" src=\"{}\" alt=\"\" />",
            encode_double_quoted_attribute(&detail.banner_url)
        ));
    }

    body.push_str(&format!(
        concat!(
            "<article class=\"post\">",
            "<h1>{title}</h1>",
            "<div class=\"info\">",
            "<time>{date}</time>",
            "<span>{author}</span>",
            "<span>{minutes} min</span>",
            "</div>"
        ),
        title = encode_text(&detail.title),
        date = format_date(detail.first_publication_date.as_ref()),
        author = encode_text(&detail.author),
        minutes = article.reading_time,
    ));

    if let Some(edited) = &detail.last_publication_date {
        body.push_str(&format!(
            "<p class=\"edited\">{}</p>",
            encode_text(&format_edited(edited))
        ));
    }

    for section in &detail.content {
        body.push_str("<section>");
        if let Some(heading) = &section.heading {
            body.push_str(&format!("<h3>{}</h3>", encode_text(heading)));
        }
        body.push_str(&body_html(&section.body));
        body.push_str("</section>");
    }
    body.push_str("</article>");

    body.push_str(&neighbor_footer(&article.previous, &article.next));

    if !config.comments.repo.is_empty() {
        body.push_str(&comments_embed(config));
    }

    layout(
        config,
        &format!("{} | {}", detail.title, config.site.title),
        &body,
        preview,
    )
}

fn neighbor_footer(previous: &NeighborLink, next: &NeighborLink) -> String {
    let mut footer = String::from("<footer class=\"post-navigation\">");

    if let (Some(uid), Some(title)) = (&previous.uid, &previous.title) {
        footer.push_str(&format!(
            "<div class=\"previous\"><span>{}</span><a href=\"/post/{}\">Previous post</a></div>",
            encode_text(title),
            encode_double_quoted_attribute(uid)
        ));
    } else {
        footer.push_str("<div></div>");
    }

    if let (Some(uid), Some(title)) = (&next.uid, &next.title) {
        footer.push_str(&format!(
            "<div class=\"next\"><span>{}</span><a href=\"/post/{}\">Next post</a></div>",
            encode_text(title),
            encode_double_quoted_attribute(uid)
        ));
    } else {
        footer.push_str("<div></div>");
    }

    footer.push_str("</footer>");
    footer
}

/// Mount point plus third-party script for the comment widget. Comments
/// are correlated with pages by the configured issue term; nothing flows
/// back from the widget into this crate.
fn comments_embed(config: &Config) -> String {
    format!(
        concat!(
            "<section id=\"comments\">",
            "<script src=\"https://utteranc.es/client.js\"",
            " repo=\"{repo}\"",
            " issue-term=\"{term}\"",
            " theme=\"{theme}\"",
            " crossorigin=\"anonymous\" async></script>",
            "</section>"
        ),
        repo = encode_double_quoted_attribute(&config.comments.repo),
        term = encode_double_quoted_attribute(&config.comments.issue_term),
        theme = encode_double_quoted_attribute(&config.comments.theme),
    )
}

fn layout(config: &Config, title: &str, body: &str, preview: bool) -> String {
    let preview_banner = if preview {
        "<aside class=\"preview-mode\"><a href=\"/api/exit-preview\">Exit preview mode</a></aside>"
    } else {
        ""
    };

    format!(
        concat!(
            "<!doctype html>\n",
            "<html lang=\"en\">\n",
            "<head>\n",
            "<meta charset=\"utf-8\" />\n",
            "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\" />\n",
            "<title>{title}</title>\n",
            "</head>\n",
            "<body>\n",
            "<header class=\"site-header\"><a href=\"/\">{site_title}</a></header>\n",
            "<main class=\"container\">{body}</main>\n",
            "{preview}\n",
            "</body>\n",
            "</html>\n"
        ),
        title = encode_text(title),
        site_title = encode_text(&config.site.title),
        body = body,
        preview = preview_banner,
    )
}
