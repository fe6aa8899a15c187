// interaction/mod.rs
pub mod discord;
mod menu;

pub use menu::{
    Acknowledgement, FrontEnd, Menu, MenuAction, MenuOption, MenuState, Reply, TextCommand, Tone,
};
