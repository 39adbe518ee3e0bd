// Job analysis: scrape a listings page, pull out job postings, rank them against a résumé.
// All model calls go through llm_client; all page fetching goes through scraping.

pub mod handlers;
pub mod models;
pub mod parsing;
pub mod pipeline;
pub mod prompts;

#[cfg(test)]
pub(crate) mod stubs;
