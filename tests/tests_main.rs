#[path = "helpers/mod.rs"]
mod helpers;

#[path = "ide/mod.rs"]
mod ide;

#[path = "project/mod.rs"]
mod project;

#[path = "rules/mod.rs"]
mod rules;
