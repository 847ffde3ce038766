mod web;

pub use web::{run, Cfg};
