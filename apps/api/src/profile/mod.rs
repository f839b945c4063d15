// Profile wizard: the user's career record, its completeness score and the
// sample profile. No model calls happen here.

pub mod completeness;
pub mod handlers;
pub mod models;
pub mod sample;
