pub mod api;
pub mod app;
pub mod calc;
pub mod db;
pub mod models;

#[cfg(test)]
mod test;
