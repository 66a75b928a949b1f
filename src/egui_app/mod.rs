//! Desktop front end for the recipe lab.

pub mod controller;
pub mod state;
pub mod style;
pub mod ui;
