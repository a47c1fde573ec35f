//! Resource naming: `BlogPost` -> `blog_post` / `blog_posts`

use convert_case::{Case, Casing};

/// Singular path name of a model
#[must_use]
pub fn member_name(model_name: &str) -> String {
    model_name.to_case(Case::Snake)
}

/// Plural path name of a model
#[must_use]
pub fn collection_name(model_name: &str) -> String {
    pluralize(&member_name(model_name))
}

/// English plural of a word, irregular nouns included
#[must_use]
pub fn pluralize(word: &str) -> String {
    pluralizer::pluralize(word, 2, false)
}
