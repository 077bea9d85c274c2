//! AI-backed content endpoints: structured job postings, wellness tips, and
//! skill recommendations. Each builds a prompt, calls the text generator, and
//! funnels the raw output through the extractor — a failed call or
//! unparseable response degrades to the static catalog, never to an error.

pub mod handlers;
pub mod posting;
pub mod prompts;
pub mod skills;
pub mod wellness;
