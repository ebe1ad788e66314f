pub mod access;
pub mod item;
pub mod list;
pub mod user;

#[cfg(test)]
pub(crate) mod mocks;
