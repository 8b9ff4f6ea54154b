pub mod dashboard;
pub mod session;
pub mod tickets;

#[cfg(test)]
pub(crate) mod testing;
