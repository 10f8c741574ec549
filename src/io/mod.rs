pub mod port;
pub mod privilege;
#[cfg(test)]
pub mod fake;
