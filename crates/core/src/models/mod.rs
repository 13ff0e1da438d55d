pub mod currency;
pub mod pocket;
pub mod rates;
pub mod screen;
pub mod settings;
