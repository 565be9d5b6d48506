// Resume analysis: text intake, skill extraction, TF-IDF matching, and the
// pipeline that ties them to the job store and result recorder.

pub mod document;
pub mod handlers;
pub mod matcher;
pub mod service;
pub mod skills;
pub mod tfidf;
