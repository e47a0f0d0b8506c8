pub mod dictionary;

pub use dictionary::Dictionary;
