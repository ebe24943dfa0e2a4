//! # spacewalk
//!
//! A terminal-first reader and static site generator for a blog served
//! from a headless CMS.
//!
//! ## Architecture
//!
//! Spacewalk follows a modular pipeline architecture:
//!
//! ```text
//! Client → Normalizer → Listing / Article → Render → Site / TUI
//! ```
//!
//! - [`client`]: HTTP client for the repository's predicate-query API
//! - [`normalizer`]: Converts raw repository documents to domain models
//! - [`listing`]: Paginated listing state with append-only "load more"
//! - [`article`]: Article assembly (reading time, neighbor links)
//! - [`render`]: Rich text to HTML, page templates
//! - [`site`]: Static site generation
//! - [`tui`]: Interactive reader built with ratatui
//!
//! ## Quick Start
//!
//! ```bash
//! # Print the first page of posts
//! spacewalk list
//!
//! # Print one post with reading time and neighbors
//! spacewalk show my-first-post
//!
//! # Generate the static site
//! spacewalk build -o public
//!
//! # Launch the reader
//! spacewalk read
//!
//! # Render unpublished content
//! spacewalk read --preview-ref <REF>
//! ```

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires together all
/// components: config, content source, normalizer.
pub mod app;

/// Article assembly: reading-time estimation and chronological neighbor
/// lookup for the detail page.
pub mod article;

/// Command-line interface using clap.
///
/// Defines the CLI structure and subcommands:
/// - `list` - Print the first page of posts
/// - `show <uid>` - Print a single post
/// - `build [-o DIR]` - Generate the static site
/// - `read` - Launch the interactive reader
pub mod cli;

/// HTTP access to the content repository.
///
/// - [`ContentSource`](client::ContentSource): Async trait over the
///   repository's query surface
/// - [`HttpContentSource`](client::HttpContentSource): reqwest-based
///   implementation
pub mod client;

/// Configuration management.
///
/// Loads from `~/.config/spacewalk/config.toml`, with environment
/// overrides for the API endpoint and access token.
pub mod config;

/// Core domain models.
///
/// - [`ArticleSummary`](domain::ArticleSummary) / [`ArticleListPage`](domain::ArticleListPage)
/// - [`ArticleDetail`](domain::ArticleDetail) with rich-text sections
/// - [`NeighborLink`](domain::NeighborLink)
pub mod domain;

/// Listing-page data flow: initial fetch plus cursor-driven "load more"
/// that appends to in-memory state.
pub mod listing;

/// Raw document to domain model conversion.
pub mod normalizer;

/// Presentation: rich-text HTML rendering, date formatting, and the
/// full-page templates used by the static build.
pub mod render;

/// Static site generation.
pub mod site;

/// Terminal user interface.
///
/// A listing view with an explicit "load more" action and an article view
/// with a distinct loading state, neighbor navigation, and a preview
/// banner. Keybindings: j/k navigate, Enter opens, l loads more,
/// p/n jump to neighbors, o opens in browser, x exits preview, q quits.
pub mod tui;
