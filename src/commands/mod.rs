pub mod inventory;
pub mod parse;
pub mod verify;

#[cfg(test)]
mod tests;
