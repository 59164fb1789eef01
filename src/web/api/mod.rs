pub mod health;
pub mod varsel;
