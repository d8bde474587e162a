pub mod docs;
pub mod forum;
pub mod health;
