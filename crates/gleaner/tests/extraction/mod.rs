use super::*;

mod concurrency;
mod documents;
mod pdf;
