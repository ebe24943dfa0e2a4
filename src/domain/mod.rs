pub mod article;
pub mod richtext;

pub use article::{ArticleDetail, ArticleListPage, ArticleSummary, NeighborLink, Section};
