// Not every test binary uses every helper.
#![allow(dead_code)]

pub mod backend_mock;
pub mod identity_mock;
