//! Navigation for GOAP agents: the [`NavWorld`] contract agents drive, plus a reference
//! [`NavGrid`] backend and [`Mover`] locomotion that hosts can build a world from.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod grid;
pub mod math;
pub mod mover;
pub mod navigator;
pub mod world;

pub use grid::{GridError, NavGrid};
pub use math::Vec3;
pub use mover::{MoveStatus, Mover};
pub use navigator::{NavPath, Navigator};
pub use world::NavWorld;
