pub mod controller;
pub mod disambiguator;
pub mod slots;
