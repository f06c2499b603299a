#![allow(dead_code)]

pub mod agent;
pub mod error;
pub mod hitman;
pub mod mission;
pub mod referee;
pub mod sat;

pub mod utils {
    pub mod prelude {
        pub use anyhow::{anyhow, Context, Error};
        pub type Result<T> = anyhow::Result<T, Error>;
        pub use crate::error::HitmanError;

        pub use std::{
            collections::{BTreeSet, HashMap, HashSet},
            ops::{Add, Sub},
        };
    }
}

pub mod prelude {
    pub use super::agent::planner::*;
    pub use super::agent::*;
    pub use super::hitman::prelude::*;
    pub use super::mission::*;
    pub use super::referee::*;
    pub use super::sat::*;
    pub use super::utils::prelude::*;
}
