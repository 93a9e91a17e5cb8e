//! Skill tracking CRUD.

pub mod handlers;
