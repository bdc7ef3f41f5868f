#![forbid(unsafe_code)]
#![cfg_attr(feature = "strict", deny(warnings))]

pub mod cell;
pub mod client;
pub mod clobber;
pub mod clobber_ai;
pub mod coord;
pub mod error;
pub mod event;
pub mod fen;
pub mod force;
pub mod grid;
pub mod hub;
pub mod piece;
pub mod remote;
pub mod selection;
pub mod tictactoe;
pub mod util;
