pub mod converter;
pub mod dict;
pub mod okuri;
pub mod settings;
pub mod unicode;
pub mod user_dict;
