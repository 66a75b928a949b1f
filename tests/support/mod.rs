#![allow(dead_code)]

pub mod lab_env;
